use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Editable body of a post. Every update replaces all of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    pub category: String,
    pub title: String,
    pub image1: Option<String>,
    pub intro_content: Option<String>,
    pub content1: Option<String>,
    pub quote: Option<String>,
    pub quote_author: Option<String>,
    pub main_content: Option<String>,
    pub image2: Option<String>,
    pub final_content: Option<String>,
}

/// Post entity - a blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    #[serde(flatten)]
    pub content: PostContent,
    pub created_at: NaiveDate,
}

/// A post about to be inserted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: PostContent,
    pub created_at: NaiveDate,
}

impl NewPost {
    /// Create a new post stamped with today's (UTC) date.
    pub fn new(content: PostContent) -> Self {
        Self {
            content,
            created_at: Utc::now().date_naive(),
        }
    }

    pub fn with_id(self, id: i32) -> Post {
        Post {
            id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_serializes_flat() {
        let post = NewPost::new(PostContent {
            category: "travel".to_string(),
            title: "Lisbon".to_string(),
            quote: Some("Saudade".to_string()),
            ..Default::default()
        })
        .with_id(7);

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Lisbon");
        assert_eq!(json["quote"], "Saudade");
        assert!(json["image1"].is_null());
        assert!(json.get("content").is_none());
    }
}
