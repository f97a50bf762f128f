//! Domain entities - the core business objects.

mod author;
mod page;
pub mod post;
mod requester;
mod slug;
mod status;

pub use author::Author;
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, Pagination, PostFilter, PostPage};
pub use post::{CreatePost, NewPost, Post, PostChanges, PostWithAuthor};
pub use requester::{ADMIN_ROLE, Requester};
pub use slug::slugify;
pub use status::{ParseStatusError, PostStatus};
