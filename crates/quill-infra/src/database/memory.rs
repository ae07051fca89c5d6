//! In-memory store - used when no database is configured, and in tests.
//!
//! Every check-and-write runs under a single write lock, so the lock plays the
//! role a unique index or a transaction plays in the PostgreSQL store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{
    Comment, ContactMessage, Like, NewComment, NewContactMessage, NewLike, NewPost,
    NewSubscription, NewUser, NewsletterSubscription, Post, PostContent, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    CommentRepository, ContactRepository, LikeRepository, PostRepository, SubscriptionRepository,
    UserRepository,
};

/// Rows keyed by an auto-incrementing id starting at 1.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn insert(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

struct Tables {
    users: Table<User>,
    posts: Table<Post>,
    comments: Table<Comment>,
    likes: Table<Like>,
    contacts: Table<ContactMessage>,
    subscriptions: Table<NewsletterSubscription>,
}

/// In-memory implementation of every repository port. Data is lost on restart.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: Table::new(),
                posts: Table::new(),
                comments: Table::new(),
                likes: Table::new(),
                contacts: Table::new(),
                subscriptions: Table::new(),
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Tables {
    fn check_references(&self, user_id: i32, post_id: i32) -> Result<(), RepoError> {
        if !self.users.rows.contains_key(&user_id) {
            return Err(RepoError::MissingReference(format!("user {user_id}")));
        }
        if !self.posts.rows.contains_key(&post_id) {
            return Err(RepoError::MissingReference(format!("post {post_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        Ok(tables.users.insert(|id| user.with_id(id)))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.rows.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.comments.rows.retain(|_, c| c.user_id != id);
        tables.likes.rows.retain(|_, l| l.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        Ok(self.tables.write().await.posts.insert(|id| post.with_id(id)))
    }

    async fn replace(
        &self,
        id: i32,
        content: PostContent,
        created_at: Option<chrono::NaiveDate>,
    ) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.content = content;
        if let Some(date) = created_at {
            post.created_at = date;
        }
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.rows.remove(&id).ok_or(RepoError::NotFound)?;
        tables.comments.rows.retain(|_, c| c.post_id != id);
        tables.likes.rows.retain(|_, l| l.post_id != id);
        Ok(post)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.rows.get(&id).cloned())
    }

    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_references(comment.user_id, comment.post_id)?;
        Ok(tables.comments.insert(|id| comment.with_id(id)))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        match self.tables.write().await.comments.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn find(&self, user_id: i32, post_id: i32) -> Result<Option<Like>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .values()
            .find(|l| l.user_id == user_id && l.post_id == post_id)
            .cloned())
    }

    async fn create(&self, like: NewLike) -> Result<Like, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_references(like.user_id, like.post_id)?;
        if tables
            .likes
            .values()
            .any(|l| l.user_id == like.user_id && l.post_id == like.post_id)
        {
            return Err(RepoError::Constraint(format!(
                "like ({}, {}) already exists",
                like.user_id, like.post_id
            )));
        }
        Ok(tables.likes.insert(|id| like.with_id(id)))
    }

    async fn delete(&self, user_id: i32, post_id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.likes.rows.len();
        tables
            .likes
            .rows
            .retain(|_, l| !(l.user_id == user_id && l.post_id == post_id));

        if tables.likes.rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count_for_post(&self, post_id: i32) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.values().filter(|l| l.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<ContactMessage>, RepoError> {
        Ok(self.tables.read().await.contacts.values().cloned().collect())
    }

    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, RepoError> {
        Ok(self
            .tables
            .write()
            .await
            .contacts
            .insert(|id| message.with_id(id)))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<NewsletterSubscription>, RepoError> {
        Ok(self
            .tables
            .read()
            .await
            .subscriptions
            .values()
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .subscriptions
            .values()
            .any(|s| s.email == subscription.email)
        {
            return Err(RepoError::Constraint(format!(
                "email '{}' already subscribed",
                subscription.email
            )));
        }
        Ok(tables.subscriptions.insert(|id| subscription.with_id(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::Role;

    async fn seed(store: &InMemoryStore) -> (User, Post) {
        let user = UserRepository::create(
            store,
            NewUser::new("reader", "$argon2id$x".to_string(), Role::User),
        )
        .await
        .unwrap();
        let post = PostRepository::create(
            store,
            NewPost::new(PostContent {
                category: "news".into(),
                title: "Hello".into(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        (user, post)
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let store = InMemoryStore::new();
        let (user, post) = seed(&store).await;

        assert_eq!(user.id, 1);
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint_violation() {
        let store = InMemoryStore::new();
        seed(&store).await;

        let result = UserRepository::create(
            &store,
            NewUser::new("reader", "$argon2id$y".to_string(), Role::User),
        )
        .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        let store = InMemoryStore::new();
        seed(&store).await;

        assert!(store.find_by_username("reader").await.unwrap().is_some());
        assert!(store.find_by_username("Reader").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_is_missing_reference() {
        let store = InMemoryStore::new();
        let (user, _) = seed(&store).await;

        let result =
            CommentRepository::create(&store, NewComment::new(user.id, 99, "hi".into())).await;

        assert!(matches!(result, Err(RepoError::MissingReference(_))));
    }

    #[tokio::test]
    async fn test_unlike_without_like_is_not_found() {
        let store = InMemoryStore::new();
        let (user, post) = seed(&store).await;

        let result = LikeRepository::delete(&store, user.id, post.id).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
