// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod clients;
pub mod logs;
pub mod scenarios;
