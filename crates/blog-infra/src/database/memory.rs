//! In-memory post repository - used when no database is configured.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Author, NewPost, PageRequest, Post, PostFilter, PostWithAuthor};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Store {
    posts: BTreeMap<i32, Post>,
    authors: HashMap<Uuid, Author>,
    last_id: i32,
}

impl Store {
    /// Same guarantees the posts table gives: length limits and a unique slug.
    fn check_constraints(&self, post: &Post) -> Result<(), RepoError> {
        post.validate()
            .map_err(|e| RepoError::Constraint(e.to_string()))?;

        let clash = self
            .posts
            .values()
            .any(|other| other.id != post.id && other.slug == post.slug);
        if clash {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint on slug '{}'",
                post.slug
            )));
        }

        Ok(())
    }

    fn with_author(&self, post: &Post) -> PostWithAuthor {
        PostWithAuthor {
            post: post.clone(),
            author: self.authors.get(&post.author_id).cloned(),
        }
    }
}

/// Posts kept in a map behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an author's public details available to listings.
    pub async fn add_author(&self, author: Author) {
        self.store.write().await.authors.insert(author.id, author);
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if !store.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        store.check_constraints(&post)?;

        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        match self.store.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = new_post.into_post(store.last_id + 1);
        store.check_constraints(&post)?;

        store.last_id = post.id;
        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_published(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&Post> = store.posts.values().filter(|p| filter.matches(p)).collect();
        // stable sort: equal timestamps stay in id order
        matching.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let posts = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|post| store.with_author(post))
            .collect();

        Ok((posts, total))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError> {
        let store = self.store.read().await;

        Ok(store
            .posts
            .values()
            .find(|p| p.slug == slug && p.status.is_published())
            .map(|post| store.with_author(post)))
    }
}
