use async_trait::async_trait;

use crate::domain::{
    Comment, ContactMessage, Like, NewComment, NewContactMessage, NewLike, NewPost,
    NewSubscription, NewUser, NewsletterSubscription, Post, PostContent, User,
};
use crate::error::RepoError;

/// Credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user. A taken username yields `RepoError::Constraint`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Delete a user together with their comments and likes, atomically.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Newest posts first, at most `limit`.
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite every content field. `created_at` changes only when given.
    async fn replace(
        &self,
        id: i32,
        content: PostContent,
        created_at: Option<chrono::NaiveDate>,
    ) -> Result<Post, RepoError>;

    /// Delete a post together with its comments and likes, atomically.
    async fn delete(&self, id: i32) -> Result<Post, RepoError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError>;

    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// A dangling user or post yields `RepoError::MissingReference`.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find(&self, user_id: i32, post_id: i32) -> Result<Option<Like>, RepoError>;

    /// Insert a like. A second like for the same pair yields `RepoError::Constraint`.
    async fn create(&self, like: NewLike) -> Result<Like, RepoError>;

    /// Remove the caller's like; `RepoError::NotFound` if there was none.
    async fn delete(&self, user_id: i32, post_id: i32) -> Result<(), RepoError>;

    async fn count_for_post(&self, post_id: i32) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ContactMessage>, RepoError>;

    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, RepoError>;
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<NewsletterSubscription>, RepoError>;

    /// A duplicate email yields `RepoError::Constraint`.
    async fn create(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription, RepoError>;
}
