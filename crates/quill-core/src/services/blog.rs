//! Blog content operations and their integrity rules.

use std::sync::Arc;

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::domain::{
    Comment, ContactMessage, Identity, Like, NewComment, NewContactMessage, NewLike, NewPost,
    NewSubscription, NewsletterSubscription, Post, PostContent, Role,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    CommentRepository, ContactRepository, LikeRepository, PostRepository, SubscriptionRepository,
};
use crate::services::AuthGateway;

/// Number of posts returned by the "recent" listing.
pub const RECENT_POSTS_LIMIT: u64 = 6;

/// Content store facade used by the HTTP handlers.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
    contacts: Arc<dyn ContactRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
        contacts: Arc<dyn ContactRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            likes,
            contacts,
            subscriptions,
        }
    }

    // --- Posts ---

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list().await?)
    }

    pub async fn recent_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.recent(RECENT_POSTS_LIMIT).await?)
    }

    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))
    }

    pub async fn create_post(&self, content: PostContent) -> Result<Post, DomainError> {
        let post = self.posts.create(NewPost::new(content)).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Full replace: optional fields left out of `content` are cleared.
    pub async fn update_post(
        &self,
        id: i32,
        content: PostContent,
        created_at: Option<NaiveDate>,
    ) -> Result<Post, DomainError> {
        self.posts
            .replace(id, content, created_at)
            .await
            .map_err(|e| not_found_as(e, "Post", id))
    }

    /// Delete a post and everything hanging off it. Returns the deleted post.
    pub async fn delete_post(&self, id: i32) -> Result<Post, DomainError> {
        let post = self
            .posts
            .delete(id)
            .await
            .map_err(|e| not_found_as(e, "Post", id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(post)
    }

    // --- Comments ---

    pub async fn add_comment(
        &self,
        author: &Identity,
        post_id: i32,
        content: String,
    ) -> Result<Comment, DomainError> {
        self.ensure_post_exists(post_id).await?;

        self.comments
            .create(NewComment::new(author.id, post_id, content))
            .await
            .map_err(|e| missing_post_as_not_found(e, post_id))
    }

    pub async fn comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.list_for_post(post_id).await?)
    }

    /// Only the author or an admin may delete a comment.
    pub async fn delete_comment(
        &self,
        caller: &Identity,
        comment_id: i32,
    ) -> Result<(), DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::not_found("Comment", comment_id))?;

        if !AuthGateway::authorize(caller, comment.user_id, Role::Admin) {
            tracing::warn!(
                comment_id,
                caller = caller.id,
                "Rejected comment deletion by non-owner"
            );
            return Err(DomainError::Forbidden(
                "Not authorized to delete this comment".into(),
            ));
        }

        self.comments
            .delete(comment_id)
            .await
            .map_err(|e| not_found_as(e, "Comment", comment_id))
    }

    // --- Likes ---

    /// The storage uniqueness constraint is the authority on duplicates.
    pub async fn like_post(&self, caller: &Identity, post_id: i32) -> Result<Like, DomainError> {
        self.ensure_post_exists(post_id).await?;

        self.likes
            .create(NewLike::new(caller.id, post_id))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Duplicate("You already liked this post".into())
                }
                other => missing_post_as_not_found(other, post_id),
            })
    }

    pub async fn unlike_post(&self, caller: &Identity, post_id: i32) -> Result<(), DomainError> {
        self.likes
            .delete(caller.id, post_id)
            .await
            .map_err(|e| not_found_as(e, "Like", post_id))
    }

    pub async fn like_count(&self, post_id: i32) -> Result<u64, DomainError> {
        Ok(self.likes.count_for_post(post_id).await?)
    }

    pub async fn is_liked_by(&self, caller: &Identity, post_id: i32) -> Result<bool, DomainError> {
        Ok(self.likes.find(caller.id, post_id).await?.is_some())
    }

    // --- Contact & newsletter ---

    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>, DomainError> {
        Ok(self.contacts.list().await?)
    }

    pub async fn submit_contact(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, DomainError> {
        ensure_email(&message.email)?;
        Ok(self.contacts.create(message).await?)
    }

    pub async fn subscriptions(&self) -> Result<Vec<NewsletterSubscription>, DomainError> {
        Ok(self.subscriptions.list().await?)
    }

    pub async fn subscribe(&self, email: String) -> Result<NewsletterSubscription, DomainError> {
        ensure_email(&email)?;
        self.subscriptions
            .create(NewSubscription { email })
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => DomainError::Duplicate("Email already subscribed".into()),
                other => other.into(),
            })
    }

    async fn ensure_post_exists(&self, post_id: i32) -> Result<(), DomainError> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Post", post_id)),
        }
    }
}

fn not_found_as(err: RepoError, entity_type: &'static str, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}

// The post can disappear between the existence check and the insert.
fn missing_post_as_not_found(err: RepoError, post_id: i32) -> DomainError {
    match err {
        RepoError::MissingReference(_) => DomainError::not_found("Post", post_id),
        other => other.into(),
    }
}

/// Subscriptions and contact messages only ever hold well-formed addresses.
fn ensure_email(email: &str) -> Result<(), DomainError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_email() {
        assert!(ensure_email("reader@example.com").is_ok());
        assert!(ensure_email("first.last@mail.example.org").is_ok());
        for bad in [
            "no-at-sign",
            "@example.com",
            "reader@example.",
            "two words@example.com",
            "a@@b.com",
            "a@b..com",
            "a@b.com@c.org",
            "a@-b.com",
        ] {
            assert!(ensure_email(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_repo_not_found_maps_to_entity() {
        let err = not_found_as(RepoError::NotFound, "Comment", 9);
        assert_eq!(err.to_string(), "Comment not found");

        let err = not_found_as(RepoError::Constraint("dup".into()), "Comment", 9);
        assert!(matches!(err, DomainError::Duplicate(_)));
    }
}
