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

/// Argon2id with default parameters. Hashing runs on the blocking pool.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

async fn run_blocking<T, F>(f: F) -> ApplicationResult<T>
where
    F: FnOnce() -> ApplicationResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        let password = password.to_owned();
        run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))
        })
        .await
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        let password = password.to_owned();
        let expected_hash = expected_hash.to_owned();
        run_blocking(move || {
            let parsed = PasswordHash::new(&expected_hash)
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .map_err(|_| ApplicationError::unauthorized("invalid credentials"))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verifies_only_the_original_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("Corr3ct!Horse").await.unwrap();
        assert!(hasher.verify("Corr3ct!Horse", &hash).await.is_ok());
        assert!(matches!(
            hasher.verify("wrong", &hash).await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }
}
