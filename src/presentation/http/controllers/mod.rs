// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod auth;
pub mod ideas;
pub mod notifications;
