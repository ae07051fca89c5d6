use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - owned by one user and one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(user_id: i32, post_id: i32, content: String) -> Self {
        Self {
            content,
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(self, id: i32) -> Comment {
        Comment {
            id,
            content: self.content,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at: self.created_at,
        }
    }
}
