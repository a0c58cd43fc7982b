//! PostgreSQL-backed `PostRepository`.
//!
//! Author checks live in the `WHERE` clause of the mutating statement. When
//! it touches no row, a follow-up read decides between "missing" and "owned
//! by someone else"; the mutation itself never runs for a non-author.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{PostRepository, PostRepositoryError, PostSlice};
use crate::domain::{OwnedMutation, Post, PostContent, PostId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostContentUpdate, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel implementation of the post store.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let author = Username::new(&row.author).map_err(|err| {
        PostRepositoryError::query(format!("invalid author on post {}: {err}", row.id))
    })?;
    Ok(Post {
        id: PostId::new(row.id),
        title: row.title,
        content: row.content,
        author,
        created_at: row.created_at,
    })
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Classify a conditional mutation that affected no row.
async fn classify_miss<T>(
    conn: &mut AsyncPgConnection,
    id: PostId,
) -> Result<OwnedMutation<T>, PostRepositoryError> {
    let existing: Option<i64> = posts::table
        .filter(posts::id.eq(id.get()))
        .select(posts::id)
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    Ok(match existing {
        Some(_) => OwnedMutation::NotOwner,
        None => OwnedMutation::NotFound,
    })
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self, request: PageRequest) -> Result<PostSlice, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = posts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<PostRow> = posts::table
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(i64::from(request.limit()))
            .offset(saturating_i64(request.offset()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(PostSlice {
            posts: rows
                .into_iter()
                .map(row_to_post)
                .collect::<Result<_, _>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn insert(
        &self,
        author: &Username,
        content: &PostContent,
    ) -> Result<PostId, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            title: content.title(),
            content: content.content(),
            author: author.as_str(),
        };
        let id: i64 = diesel::insert_into(posts::table)
            .values(&row)
            .returning(posts::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(PostId::new(id))
    }

    async fn update_owned(
        &self,
        id: PostId,
        author: &Username,
        content: &PostContent,
    ) -> Result<OwnedMutation<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostContentUpdate {
            title: content.title(),
            content: content.content(),
        };
        let updated: Option<PostRow> = diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::author.eq(author.as_str())),
        )
        .set(&changes)
        .returning(PostRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match updated {
            Some(row) => row_to_post(row).map(OwnedMutation::Applied),
            None => classify_miss(&mut conn, id).await,
        }
    }

    async fn delete_owned(
        &self,
        id: PostId,
        author: &Username,
    ) -> Result<OwnedMutation<()>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::author.eq(author.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted > 0 {
            Ok(OwnedMutation::Applied(()))
        } else {
            classify_miss(&mut conn, id).await
        }
    }
}
