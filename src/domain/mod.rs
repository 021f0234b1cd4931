// src/domain/mod.rs
pub mod audit;
pub mod cursor;
pub mod errors;
pub mod idea;
pub mod notification;
pub mod user;
