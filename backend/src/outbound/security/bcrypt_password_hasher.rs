//! bcrypt-backed `PasswordHasher`.
//!
//! The work factor makes each call take tens of milliseconds, so hashing and
//! verification run on tokio's blocking pool.

use async_trait::async_trait;
use tokio::task;
use tracing::warn;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Work factor used for new hashes.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt hasher with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Hasher using [`DEFAULT_BCRYPT_COST`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher using `cost`, clamped to the range bcrypt accepts.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        if password.expose().is_empty() {
            return Err(PasswordHashError::EmptyInput);
        }
        let password = password.clone();
        let cost = self.cost;
        task::spawn_blocking(move || bcrypt::hash(password.expose(), cost))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        let password = password.clone();
        let hash = hash.clone();
        match task::spawn_blocking(move || bcrypt::verify(password.expose(), hash.as_str())).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(error)) => {
                warn!(%error, "stored password hash could not be verified");
                false
            }
            Err(error) => {
                warn!(%error, "password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(MIN_COST)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_only_the_original(hasher: BcryptPasswordHasher) {
        let hash = hasher
            .hash(&Password::new("secret1"))
            .await
            .expect("hashing succeeds");
        assert!(hasher.verify(&Password::new("secret1"), &hash).await);
        assert!(!hasher.verify(&Password::new("secret2"), &hash).await);
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_calls(hasher: BcryptPasswordHasher) {
        let password = Password::new("secret1");
        let first = hasher.hash(&password).await.expect("hash");
        let second = hasher.hash(&password).await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_input_is_rejected(hasher: BcryptPasswordHasher) {
        let err = hasher.hash(&Password::new("")).await.expect_err("empty");
        assert_eq!(err, PasswordHashError::EmptyInput);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_never_matches(hasher: BcryptPasswordHasher) {
        let bogus = PasswordHash::new("not-a-bcrypt-hash");
        assert!(!hasher.verify(&Password::new("secret1"), &bogus).await);
    }

    #[rstest]
    fn default_cost_is_ten() {
        assert_eq!(BcryptPasswordHasher::new().cost, 10);
    }

    #[rstest]
    #[case(0, MIN_COST)]
    #[case(12, 12)]
    #[case(99, MAX_COST)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::with_cost(requested).cost, expected);
    }
}
