use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::author::Author;
use super::slug::slugify;
use super::status::PostStatus;
use crate::error::DomainError;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 200;
pub const EXCERPT_MAX_CHARS: usize = 300;

/// Post entity - a blog post owned by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.title, self.excerpt.as_deref())
    }
}

/// A post together with its author's public details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<Author>,
}

/// Caller-supplied fields for a new post.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
}

/// A post that has not been stored yet; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Derive the stored shape of a post from the request of `author_id`.
    pub fn from_input(author_id: Uuid, input: CreatePost, now: DateTime<Utc>) -> Self {
        let status = PostStatus::requested_or_default(input.status.as_deref());

        Self {
            author_id,
            slug: slugify(&input.title),
            title: input.title,
            content: input.content,
            excerpt: input.excerpt,
            featured_image: input.featured_image,
            category: input.category,
            status,
            published_at: status.is_published().then_some(now),
            created_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.title, self.excerpt.as_deref())
    }

    pub fn into_post(self, id: i32) -> Post {
        Post {
            id,
            author_id: self.author_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            category: self.category,
            status: self.status,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Partial update of a post.
///
/// `None` leaves the stored value alone. `Some` is applied as given, the
/// empty string included. The status stays raw until it is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
}

impl PostChanges {
    /// Apply the changes to `post`. An unknown status is rejected before
    /// anything is modified.
    pub fn apply_to(self, post: &mut Post, now: DateTime<Utc>) -> Result<(), DomainError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<PostStatus>)
            .transpose()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if let Some(title) = self.title {
            post.slug = slugify(&title);
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = Some(excerpt);
        }
        if let Some(category) = self.category {
            post.category = Some(category);
        }
        if let Some(featured_image) = self.featured_image {
            post.featured_image = Some(featured_image);
        }
        if let Some(status) = status {
            // published_at is stamped once, on the way into published.
            if status.is_published() && !post.status.is_published() {
                post.published_at = Some(now);
            }
            post.status = status;
        }
        post.updated_at = now;
        Ok(())
    }
}

/// Length rules shared by the service and the storage backstop.
pub fn validate_fields(title: &str, excerpt: Option<&str>) -> Result<(), DomainError> {
    let title_len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
        return Err(DomainError::Validation(format!(
            "title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters"
        )));
    }

    if let Some(excerpt) = excerpt {
        if excerpt.chars().count() > EXCERPT_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "excerpt must be at most {EXCERPT_MAX_CHARS} characters"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn input(title: &str, status: Option<&str>) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: "Body".to_string(),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_post_published_gets_timestamp() {
        let now = Utc::now();
        let post = NewPost::from_input(Uuid::new_v4(), input("My First Post!", Some("published")), now);

        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_new_post_defaults_to_draft() {
        let now = Utc::now();
        for status in [None, Some("draft"), Some("scheduled")] {
            let post = NewPost::from_input(Uuid::new_v4(), input("Notes", status), now);
            assert_eq!(post.status, PostStatus::Draft);
            assert_eq!(post.published_at, None);
        }
    }

    #[test]
    fn test_changes_keep_original_publish_time() {
        let created = Utc::now() - TimeDelta::days(3);
        let mut post = NewPost::from_input(Uuid::new_v4(), input("Old news", Some("published")), created)
            .into_post(7);

        let changes = PostChanges {
            status: Some("published".to_string()),
            ..Default::default()
        };
        changes.apply_to(&mut post, Utc::now()).unwrap();

        assert_eq!(post.published_at, Some(created));
    }

    #[test]
    fn test_changes_publish_draft() {
        let created = Utc::now() - TimeDelta::hours(1);
        let mut post = NewPost::from_input(Uuid::new_v4(), input("Work in progress", None), created)
            .into_post(1);
        let now = Utc::now();

        let changes = PostChanges {
            title: Some("Finished Work".to_string()),
            status: Some("published".to_string()),
            ..Default::default()
        };
        changes.apply_to(&mut post, now).unwrap();

        assert_eq!(post.slug, "finished-work");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now));
        assert_eq!(post.updated_at, now);
    }

    #[test]
    fn test_changes_apply_empty_strings() {
        let mut post = NewPost::from_input(Uuid::new_v4(), input("Title", None), Utc::now())
            .into_post(1);
        post.excerpt = Some("Teaser".to_string());

        let changes = PostChanges {
            content: Some(String::new()),
            excerpt: Some(String::new()),
            ..Default::default()
        };
        changes.apply_to(&mut post, Utc::now()).unwrap();

        assert_eq!(post.content, "");
        assert_eq!(post.excerpt.as_deref(), Some(""));
        assert_eq!(post.title, "Title");
    }

    #[test]
    fn test_changes_reject_unknown_status_untouched() {
        let mut post = NewPost::from_input(Uuid::new_v4(), input("Steady", None), Utc::now())
            .into_post(1);
        let before = post.clone();

        let changes = PostChanges {
            title: Some("Renamed".to_string()),
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let err = changes.apply_to(&mut post, Utc::now()).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(post, before);
    }

    #[test]
    fn test_validate_lengths() {
        assert!(validate_fields("abc", None).is_ok());
        assert!(validate_fields("ab", None).is_err());
        assert!(validate_fields(&"x".repeat(201), None).is_err());
        assert!(validate_fields("Fine", Some(&"e".repeat(300))).is_ok());
        assert!(validate_fields("Fine", Some(&"e".repeat(301))).is_err());
    }
}
