// src/bin/create_admin.rs
//! Create an admin account, or reset the password and name of an existing one.
//!
//! Reads `ADMIN_EMAIL`, `ADMIN_PASSWORD` and `ADMIN_NAME` from the environment
//! (or `.env`), plus the usual `DATABASE_URL`.
use anyhow::{Context, Result, bail};
use backoffice_core::application::ports::security::PasswordHasher;
use backoffice_core::config::AppConfig;
use backoffice_core::domain::user::{Email, NewAdminUser, PasswordHash};
use backoffice_core::infrastructure::{
    database, repositories::PostgresAdminUserRepository, security::password::Argon2PasswordHasher,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@taghunter.fr".to_string());
    let password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    if password.len() < 8 {
        bail!("ADMIN_PASSWORD must be at least 8 characters");
    }
    let name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    let hash = Argon2PasswordHasher.hash(&password).await?;
    let new_user = NewAdminUser::new(Email::new(email)?, PasswordHash::new(hash)?, name);

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let repo = PostgresAdminUserRepository::new(pool);
    let admin = repo.upsert(new_user).await?;

    println!("admin {} (id {}) is ready", admin.email, admin.id);
    Ok(())
}
