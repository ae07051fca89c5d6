use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like entity. At most one per (user, post) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLike {
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

impl NewLike {
    pub fn new(user_id: i32, post_id: i32) -> Self {
        Self {
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(self, id: i32) -> Like {
        Like {
            id,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at: self.created_at,
        }
    }
}
