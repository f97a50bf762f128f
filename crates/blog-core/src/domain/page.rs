//! Listing rules: page arithmetic and the public post filter.

use serde::Serialize;

use super::post::{Post, PostWithAuthor};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Largest offset or limit a SQL backend accepts (a signed 64-bit bind).
const MAX_WINDOW: u64 = i64::MAX as u64;

/// A 1-based page window over the published posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Zero values are replaced by the defaults.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 {
                DEFAULT_LIMIT
            } else {
                limit.min(MAX_WINDOW)
            },
        }
    }

    /// Build a page window from raw query-string values.
    ///
    /// A leading run of digits is used and the rest ignored, so `"2.5"` and
    /// `"2abc"` both read as 2. Missing, non-numeric, zero or negative input
    /// never fails; it yields the default for that parameter.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_positive(page), parse_positive(limit))
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_WINDOW)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>) -> u64 {
    let Some(value) = raw.map(str::trim_start) else {
        return 0;
    };
    if value.starts_with('-') {
        return 0;
    }

    value
        .strip_prefix('+')
        .unwrap_or(value)
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Optional narrowing of the public listing. Only published posts are ever
/// listed, whatever the filter says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    category: Option<String>,
    search: Option<String>,
}

impl PostFilter {
    /// Empty strings count as "not provided".
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            search: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether `post` belongs in the public listing under this filter.
    ///
    /// Search is a case-insensitive substring match against the title or
    /// the content.
    pub fn matches(&self, post: &Post) -> bool {
        if !post.status.is_published() {
            return false;
        }

        if let Some(category) = self.category() {
            if post.category.as_deref() != Some(category) {
                return false;
            }
        }

        match self.search() {
            Some(search) => {
                let needle = search.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Pagination block returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            pages: total.div_ceil(request.limit()),
        }
    }
}

/// One page of published posts.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostWithAuthor>,
    pub pagination: Pagination,
}
