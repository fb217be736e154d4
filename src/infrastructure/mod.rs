// src/infrastructure/mod.rs
pub mod audit;
pub mod database;
pub mod media;
pub mod repositories;
pub mod security;
pub mod time;
