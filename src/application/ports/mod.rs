// src/application/ports/mod.rs
pub mod media;
pub mod security;
pub mod session;
pub mod time;
