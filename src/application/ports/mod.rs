// src/application/ports/mod.rs
pub mod security;
pub mod session_revocation;
pub mod time;

pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type TokenManagerPort = dyn security::TokenManager;
pub type ClockPort = dyn time::Clock;
pub type SessionRevocationPort = dyn session_revocation::SessionRevocationStore;
