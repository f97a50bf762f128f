use async_trait::async_trait;

use crate::domain::{NewPost, PageRequest, Post, PostFilter, PostWithAuthor};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post storage.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Insert a new post. A clashing slug is a `Constraint` error.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// One window of published posts matching `filter`, newest publication
    /// first, plus the total number of matches.
    async fn find_published(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError>;

    /// A published post by slug. Drafts are invisible here.
    async fn find_published_by_slug(&self, slug: &str)
    -> Result<Option<PostWithAuthor>, RepoError>;
}
