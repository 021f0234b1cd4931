pub mod database;
pub mod repositories;
pub mod retry;
pub mod security;
pub mod time;
