use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::PasswordHasher,
};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;

/// Argon2id hashing in PHC string form, run off the async executor.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

fn hash_password(password: &str) -> ApplicationResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn verify_password(password: &str, expected_hash: &str) -> ApplicationResult<()> {
    // A stored hash we cannot parse is an operator problem, not a bad login.
    let parsed = PasswordHash::new(expected_hash)
        .map_err(|err| ApplicationError::infrastructure(format!("stored password hash: {err}")))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApplicationError::unauthorized("invalid credentials"))
}

async fn run_blocking<T, F>(job: F) -> ApplicationResult<T>
where
    F: FnOnce() -> ApplicationResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        let password = password.to_owned();
        run_blocking(move || hash_password(&password)).await
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        let password = password.to_owned();
        let expected_hash = expected_hash.to_owned();
        run_blocking(move || verify_password(&password, &expected_hash)).await
    }
}
