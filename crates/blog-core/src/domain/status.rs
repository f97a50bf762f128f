use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visibility state of a post. Only published posts are publicly readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    /// Status for a freshly created post: anything other than an exact
    /// `"published"` or `"draft"` falls back to draft.
    pub fn requested_or_default(requested: Option<&str>) -> Self {
        requested
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_published(self) -> bool {
        self == PostStatus::Published
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid post status '{0}', expected 'draft' or 'published'")]
pub struct ParseStatusError(pub String);

impl FromStr for PostStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
