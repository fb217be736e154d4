// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_admin_user;
mod postgres_client;
mod postgres_scenario;

pub(crate) use error::map_sqlx;
pub use postgres_admin_user::PostgresAdminUserRepository;
pub use postgres_client::PostgresClientDirectory;
pub use postgres_scenario::PostgresScenarioRepository;
