//! Post listing and author-guarded mutations.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Pagination};
use tracing::{error, info};

use crate::domain::ports::{PostRepository, PostRepositoryError, PostsCommand, PostsQuery};
use crate::domain::{Error, OwnedMutation, Post, PostContent, PostId, PostPage, Username};

const POST_NOT_FOUND: &str = "post not found";

/// Post service implementing [`PostsQuery`] and [`PostsCommand`].
#[derive(Clone)]
pub struct PostsService<R> {
    posts: Arc<R>,
}

impl<R> PostsService<R> {
    /// Create a new service over the given repository.
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }
}

fn map_repository_error(summary: &'static str) -> impl FnOnce(PostRepositoryError) -> Error {
    move |err| {
        let cause = err.to_string();
        error!(summary, %cause, "post repository failure");
        Error::internal(summary).with_cause(cause)
    }
}

#[async_trait]
impl<R> PostsQuery for PostsService<R>
where
    R: PostRepository,
{
    async fn list_posts(&self, request: PageRequest) -> Result<PostPage, Error> {
        let slice = self
            .posts
            .list(request)
            .await
            .map_err(map_repository_error("failed to fetch posts"))?;
        Ok(PostPage {
            posts: slice.posts,
            pagination: Pagination::compute(request, slice.total),
        })
    }
}

#[async_trait]
impl<R> PostsCommand for PostsService<R>
where
    R: PostRepository,
{
    async fn create_post(&self, author: &Username, content: PostContent) -> Result<PostId, Error> {
        let id = self
            .posts
            .insert(author, &content)
            .await
            .map_err(map_repository_error("failed to create post"))?;
        info!(post_id = %id, author = %author, "post created");
        Ok(id)
    }

    async fn update_post(
        &self,
        id: PostId,
        requester: &Username,
        content: PostContent,
    ) -> Result<Post, Error> {
        let outcome = self
            .posts
            .update_owned(id, requester, &content)
            .await
            .map_err(map_repository_error("failed to update post"))?;
        match outcome {
            OwnedMutation::Applied(post) => {
                info!(post_id = %id, author = %requester, "post updated");
                Ok(post)
            }
            OwnedMutation::NotFound => Err(Error::not_found(POST_NOT_FOUND)),
            OwnedMutation::NotOwner => Err(Error::forbidden("you can only edit your own posts")),
        }
    }

    async fn delete_post(&self, id: PostId, requester: &Username) -> Result<(), Error> {
        let outcome = self
            .posts
            .delete_owned(id, requester)
            .await
            .map_err(map_repository_error("failed to delete post"))?;
        match outcome {
            OwnedMutation::Applied(()) => {
                info!(post_id = %id, author = %requester, "post deleted");
                Ok(())
            }
            OwnedMutation::NotFound => Err(Error::not_found(POST_NOT_FOUND)),
            OwnedMutation::NotOwner => {
                Err(Error::forbidden("you can only delete your own posts"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPostRepository, PostSlice};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn make_service(repo: MockPostRepository) -> PostsService<MockPostRepository> {
        PostsService::new(Arc::new(repo))
    }

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    #[fixture]
    fn body() -> PostContent {
        PostContent::try_from_parts(Some("Title"), Some("Body")).expect("valid content")
    }

    fn post(id: i64, author: &str) -> Post {
        Post {
            id: PostId::new(id),
            title: "Title".into(),
            content: "Body".into(),
            author: username(author),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_builds_pagination_from_total() {
        let mut repo = MockPostRepository::new();
        repo.expect_list().times(1).return_once(|_| {
            Ok(PostSlice {
                posts: (1..=5).map(|id| post(id, "alice")).collect(),
                total: 15,
            })
        });

        let request = PageRequest::new(2, 10).expect("valid request");
        let page = make_service(repo)
            .list_posts(request)
            .await
            .expect("listing succeeds");

        assert_eq!(page.posts.len(), 5);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_previous_page);
    }

    #[rstest]
    #[tokio::test]
    async fn list_failure_keeps_cause() {
        let mut repo = MockPostRepository::new();
        repo.expect_list()
            .return_once(|_| Err(PostRepositoryError::query("syntax error")));

        let err = make_service(repo)
            .list_posts(PageRequest::default())
            .await
            .expect_err("listing fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "failed to fetch posts");
        assert_eq!(err.cause(), Some("post repository query failed: syntax error"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_stamps_requester_as_author(body: PostContent) {
        let mut repo = MockPostRepository::new();
        repo.expect_insert()
            .withf(|author, content| author.as_str() == "alice" && content.title() == "Title")
            .times(1)
            .return_once(|_, _| Ok(PostId::new(11)));

        let id = make_service(repo)
            .create_post(&username("alice"), body)
            .await
            .expect("create succeeds");
        assert_eq!(id.get(), 11);
    }

    #[rstest]
    #[case(OwnedMutation::NotFound, ErrorCode::NotFound, "post not found")]
    #[case(
        OwnedMutation::NotOwner,
        ErrorCode::Forbidden,
        "you can only edit your own posts"
    )]
    #[tokio::test]
    async fn update_maps_rejections(
        body: PostContent,
        #[case] outcome: OwnedMutation<Post>,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mut repo = MockPostRepository::new();
        repo.expect_update_owned()
            .return_once(move |_, _, _| Ok(outcome));

        let err = make_service(repo)
            .update_post(PostId::new(3), &username("bob"), body)
            .await
            .expect_err("update rejected");
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn update_returns_stored_post(body: PostContent) {
        let mut repo = MockPostRepository::new();
        repo.expect_update_owned()
            .return_once(|_, _, _| Ok(OwnedMutation::Applied(post(3, "alice"))));

        let updated = make_service(repo)
            .update_post(PostId::new(3), &username("alice"), body)
            .await
            .expect("update succeeds");
        assert_eq!(updated.author.as_str(), "alice");
    }

    #[rstest]
    #[case(OwnedMutation::Applied(()), None)]
    #[case(OwnedMutation::NotFound, Some(ErrorCode::NotFound))]
    #[case(OwnedMutation::NotOwner, Some(ErrorCode::Forbidden))]
    #[tokio::test]
    async fn delete_maps_outcomes(
        #[case] outcome: OwnedMutation<()>,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repo = MockPostRepository::new();
        repo.expect_delete_owned()
            .return_once(move |_, _| Ok(outcome));

        let result = make_service(repo)
            .delete_post(PostId::new(3), &username("bob"))
            .await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }
}
