use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The public face of the user who wrote a post.
///
/// Users are owned by the identity service; posts only ever expose these
/// three fields of their author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
