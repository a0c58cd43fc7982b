//! In-memory `PostRepository`.

use std::cmp::Reverse;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{PostRepository, PostRepositoryError, PostSlice};
use crate::domain::{OwnedMutation, Post, PostContent, PostId, Username};

use super::lock;

#[derive(Default)]
struct PostTable {
    rows: Vec<Post>,
    last_id: i64,
}

/// Post store held in process memory; `created_at` comes from the injected
/// clock.
pub struct InMemoryPostRepository {
    table: Mutex<PostTable>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPostRepository {
    /// Empty store stamping posts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(PostTable::default()),
            clock,
        }
    }
}

fn usize_saturating(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, request: PageRequest) -> Result<PostSlice, PostRepositoryError> {
        let table = lock(&self.table, PostRepositoryError::query)?;
        let mut ordered: Vec<&Post> = table.rows.iter().collect();
        ordered.sort_by_key(|post| Reverse((post.created_at, post.id)));
        let posts = ordered
            .into_iter()
            .skip(usize_saturating(request.offset()))
            .take(usize_saturating(u64::from(request.limit())))
            .cloned()
            .collect();
        Ok(PostSlice {
            posts,
            total: table.rows.len() as u64,
        })
    }

    async fn insert(
        &self,
        author: &Username,
        content: &PostContent,
    ) -> Result<PostId, PostRepositoryError> {
        let created_at = self.clock.utc();
        let mut table = lock(&self.table, PostRepositoryError::query)?;
        table.last_id += 1;
        let id = PostId::new(table.last_id);
        table.rows.push(Post {
            id,
            title: content.title().to_owned(),
            content: content.content().to_owned(),
            author: author.clone(),
            created_at,
        });
        Ok(id)
    }

    async fn update_owned(
        &self,
        id: PostId,
        author: &Username,
        content: &PostContent,
    ) -> Result<OwnedMutation<Post>, PostRepositoryError> {
        let mut table = lock(&self.table, PostRepositoryError::query)?;
        let Some(post) = table.rows.iter_mut().find(|post| post.id == id) else {
            return Ok(OwnedMutation::NotFound);
        };
        if !post.is_authored_by(author) {
            return Ok(OwnedMutation::NotOwner);
        }
        post.title = content.title().to_owned();
        post.content = content.content().to_owned();
        Ok(OwnedMutation::Applied(post.clone()))
    }

    async fn delete_owned(
        &self,
        id: PostId,
        author: &Username,
    ) -> Result<OwnedMutation<()>, PostRepositoryError> {
        let mut table = lock(&self.table, PostRepositoryError::query)?;
        let Some(index) = table.rows.iter().position(|post| post.id == id) else {
            return Ok(OwnedMutation::NotFound);
        };
        if !table.rows[index].is_authored_by(author) {
            return Ok(OwnedMutation::NotOwner);
        }
        table.rows.remove(index);
        Ok(OwnedMutation::Applied(()))
    }
}
