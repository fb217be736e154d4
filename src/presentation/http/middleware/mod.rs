// src/presentation/http/middleware/mod.rs
pub mod audit;
pub mod rate_limit;
