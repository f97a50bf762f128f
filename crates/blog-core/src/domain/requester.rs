use uuid::Uuid;

use super::post::Post;

/// Role that may modify any post.
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated caller of a write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl Requester {
    pub fn new(user_id: Uuid, roles: Vec<String>) -> Self {
        Self { user_id, roles }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Authors may change their own posts; admins may change any post.
    pub fn can_modify(&self, post: &Post) -> bool {
        post.author_id == self.user_id || self.has_role(ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreatePost, NewPost};
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        let input = CreatePost {
            title: "Ownership".to_string(),
            content: "...".to_string(),
            ..Default::default()
        };
        NewPost::from_input(author_id, input, Utc::now()).into_post(1)
    }

    #[test]
    fn test_author_and_admin_may_modify() {
        let author = Uuid::new_v4();
        let post = post_by(author);

        assert!(Requester::new(author, vec![]).can_modify(&post));
        assert!(Requester::new(Uuid::new_v4(), vec![ADMIN_ROLE.to_string()]).can_modify(&post));
    }

    #[test]
    fn test_stranger_may_not_modify() {
        let post = post_by(Uuid::new_v4());
        let stranger = Requester::new(Uuid::new_v4(), vec!["user".to_string(), "editor".to_string()]);

        assert!(!stranger.can_modify(&post));
    }
}
