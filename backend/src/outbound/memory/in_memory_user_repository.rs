//! In-memory `UserRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NewUser, UserId, UserProfile, UserRecord, Username};

use super::lock;

#[derive(Default)]
struct UserTable {
    rows: Vec<UserRecord>,
    last_id: i64,
}

/// Account store held in process memory. Identifiers start at 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_with_email_or_username(
        &self,
        email: &Email,
        username: &Username,
    ) -> Result<bool, UserRepositoryError> {
        let table = lock(&self.table, UserRepositoryError::query)?;
        Ok(table
            .rows
            .iter()
            .any(|row| &row.profile.email == email || &row.profile.username == username))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserRepositoryError> {
        let table = lock(&self.table, UserRepositoryError::query)?;
        Ok(table
            .rows
            .iter()
            .find(|row| &row.profile.email == email)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<UserRecord, UserRepositoryError> {
        let mut table = lock(&self.table, UserRepositoryError::query)?;
        if let Some(clash) = table.rows.iter().find(|row| {
            row.profile.email == user.email || row.profile.username == user.username
        }) {
            let constraint = if clash.profile.email == user.email {
                "users_email_key"
            } else {
                "users_username_key"
            };
            return Err(UserRepositoryError::duplicate(constraint));
        }

        let id = UserId::new(table.last_id + 1)
            .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        table.last_id = id.get();
        let record = UserRecord {
            profile: UserProfile {
                id,
                username: user.username.clone(),
                email: user.email.clone(),
            },
            password_hash: user.password_hash.clone(),
        };
        table.rows.push(record.clone());
        Ok(record)
    }
}
