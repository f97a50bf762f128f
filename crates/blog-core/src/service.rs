//! Post operations: the five use cases behind the HTTP API.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    CreatePost, NewPost, PageRequest, Pagination, Post, PostChanges, PostFilter, PostPage,
    PostWithAuthor, Requester,
};
use crate::error::{DomainError, Operation};
use crate::ports::PostRepository;

/// Stateless post service. Every call is one independent read and/or write
/// against the repository.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post owned by `author_id`.
    ///
    /// Any validation or storage problem, a duplicate slug included, is
    /// reported as an opaque creation failure.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        input: CreatePost,
    ) -> Result<Post, DomainError> {
        let new_post = NewPost::from_input(author_id, input, Utc::now());
        new_post
            .validate()
            .map_err(|e| failure(Operation::Create, e))?;

        let post = self
            .posts
            .create(new_post)
            .await
            .map_err(|e| failure(Operation::Create, e))?;

        tracing::info!(
            post_id = post.id,
            author_id = %author_id,
            slug = %post.slug,
            status = %post.status,
            "Post created"
        );

        Ok(post)
    }

    /// List published posts, newest publication first.
    pub async fn list_posts(
        &self,
        page: PageRequest,
        filter: PostFilter,
    ) -> Result<PostPage, DomainError> {
        let (posts, total) = self
            .posts
            .find_published(&filter, page)
            .await
            .map_err(|e| failure(Operation::List, e))?;

        tracing::debug!(
            page = page.page(),
            limit = page.limit(),
            total,
            returned = posts.len(),
            "Listed published posts"
        );

        Ok(PostPage {
            posts,
            pagination: Pagination::new(page, total),
        })
    }

    /// Fetch a published post by slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<PostWithAuthor, DomainError> {
        self.posts
            .find_published_by_slug(slug)
            .await
            .map_err(|e| failure(Operation::Fetch, e))?
            .ok_or(DomainError::NotFound)
    }

    pub async fn update_post(
        &self,
        id: i32,
        requester: &Requester,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.find_modifiable(id, requester, Operation::Update).await?;

        changes.apply_to(&mut post, Utc::now())?;
        post.validate().map_err(|e| failure(Operation::Update, e))?;

        let post = self
            .posts
            .save(post)
            .await
            .map_err(|e| failure(Operation::Update, e))?;

        tracing::info!(
            post_id = id,
            user_id = %requester.user_id,
            status = %post.status,
            "Post updated"
        );

        Ok(post)
    }

    /// Hard-delete a post. There is no way back.
    pub async fn delete_post(&self, id: i32, requester: &Requester) -> Result<(), DomainError> {
        self.find_modifiable(id, requester, Operation::Delete).await?;

        self.posts
            .delete(id)
            .await
            .map_err(|e| failure(Operation::Delete, e))?;

        tracing::info!(post_id = id, user_id = %requester.user_id, "Post deleted");

        Ok(())
    }

    async fn find_modifiable(
        &self,
        id: i32,
        requester: &Requester,
        operation: Operation,
    ) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(|e| failure(operation, e))?
            .ok_or(DomainError::NotFound)?;

        if !requester.can_modify(&post) {
            tracing::warn!(
                post_id = id,
                user_id = %requester.user_id,
                author_id = %post.author_id,
                "Rejected modification by non-author"
            );
            return Err(DomainError::Forbidden);
        }

        Ok(post)
    }
}

fn failure(operation: Operation, cause: impl std::fmt::Display) -> DomainError {
    tracing::error!(error = %cause, "{}", operation.failure_message());
    DomainError::failed(operation, cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Holds one post and counts writes; lookups by slug always fail.
    struct SinglePostRepository {
        post: Post,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl BaseRepository<Post, i32> for SinglePostRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
            Ok((id == self.post.id).then(|| self.post.clone()))
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(entity)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for SinglePostRepository {
        async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
            Err(RepoError::Constraint("duplicate key value violates unique constraint".into()))
        }

        async fn find_published(
            &self,
            _filter: &PostFilter,
            _page: PageRequest,
        ) -> Result<(Vec<PostWithAuthor>, u64), RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn find_published_by_slug(
            &self,
            _slug: &str,
        ) -> Result<Option<PostWithAuthor>, RepoError> {
            Err(RepoError::Query("relation \"posts\" does not exist".into()))
        }
    }

    fn repository(author_id: Uuid) -> Arc<SinglePostRepository> {
        let input = CreatePost {
            title: "Guarded".to_string(),
            content: "Secret plans".to_string(),
            ..Default::default()
        };
        Arc::new(SinglePostRepository {
            post: NewPost::from_input(author_id, input, Utc::now()).into_post(42),
            writes: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_forbidden_requester_never_writes() {
        let repo = repository(Uuid::new_v4());
        let service = PostService::new(repo.clone());
        let stranger = Requester::new(Uuid::new_v4(), vec!["user".to_string()]);

        let bad_status = PostChanges {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let update = service.update_post(42, &stranger, bad_status).await;
        let delete = service.delete_post(42, &stranger).await;

        assert!(matches!(update, Err(DomainError::Forbidden)));
        assert!(matches!(delete, Err(DomainError::Forbidden)));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let author = Uuid::new_v4();
        let service = PostService::new(repository(author));
        let requester = Requester::new(author, vec![]);

        let result = service.delete_post(7, &requester).await;
        let bad_status = PostChanges {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let update = service.update_post(7, &requester, bad_status).await;

        assert!(matches!(result, Err(DomainError::NotFound)));
        assert!(matches!(update, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_storage_failures_are_opaque() {
        let service = PostService::new(repository(Uuid::new_v4()));

        let create = service
            .create_post(
                Uuid::new_v4(),
                CreatePost {
                    title: "Duplicate".to_string(),
                    content: "...".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let list = service
            .list_posts(PageRequest::default(), PostFilter::default())
            .await
            .unwrap_err();
        let fetch = service.get_post_by_slug("anything").await.unwrap_err();

        assert_eq!(create.to_string(), "Failed to create post");
        assert_eq!(list.to_string(), "Failed to fetch posts");
        assert_eq!(fetch.to_string(), "Failed to fetch post");
    }

    #[tokio::test]
    async fn test_short_title_fails_creation_without_detail() {
        let service = PostService::new(repository(Uuid::new_v4()));

        let err = service
            .create_post(
                Uuid::new_v4(),
                CreatePost {
                    title: "Hi".to_string(),
                    content: "...".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Failed {
                operation: Operation::Create,
                ..
            }
        ));
    }
}
