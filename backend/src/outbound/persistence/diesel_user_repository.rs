//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NewUser, PasswordHash, UserId, UserProfile, UserRecord, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        return UserRepositoryError::duplicate(constraint);
    }
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserRepositoryError> {
    let invalid = |err: crate::domain::UserValidationError| {
        UserRepositoryError::query(format!("invalid user row {}: {err}", row.id))
    };
    Ok(UserRecord {
        profile: UserProfile {
            id: UserId::new(row.id).map_err(invalid)?,
            username: Username::new(&row.username).map_err(invalid)?,
            email: Email::new(&row.email).map_err(invalid)?,
        },
        password_hash: PasswordHash::new(row.password),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn exists_with_email_or_username(
        &self,
        email: &Email,
        username: &Username,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let hit: Option<i64> = users::table
            .filter(
                users::email
                    .eq(email.as_str())
                    .or(users::username.eq(username.as_str())),
            )
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(hit.is_some())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<UserRecord, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: user.username.as_str(),
            email: user.email.as_str(),
            password: user.password_hash.as_str(),
        };
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_record(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            UserRepositoryError::Duplicate { .. }
        ));
    }

    #[rstest]
    fn pool_failure_maps_to_connection() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            UserRepositoryError::connection("timed out")
        );
    }

    #[rstest]
    fn row_conversion_keeps_hash_and_identity() {
        let record = row_to_record(UserRow {
            id: 5,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "$2b$10$hash".into(),
        })
        .expect("valid row");
        assert_eq!(record.profile.id.get(), 5);
        assert_eq!(record.password_hash.as_str(), "$2b$10$hash");
    }

    #[rstest]
    fn row_with_blank_username_is_rejected() {
        let result = row_to_record(UserRow {
            id: 5,
            username: " ".into(),
            email: "alice@example.com".into(),
            password: "x".into(),
        });
        assert!(matches!(result, Err(UserRepositoryError::Query { .. })));
    }
}
