//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use quill_core::domain::{
    Comment, ContactMessage, Like, NewComment, NewContactMessage, NewLike, NewPost,
    NewSubscription, NewUser, NewsletterSubscription, Post, PostContent, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    CommentRepository, ContactRepository, LikeRepository, PostRepository, SubscriptionRepository,
    UserRepository,
};

use super::entity::{comment, contact_message, like, newsletter_subscription, post, user};

/// PostgreSQL-backed store implementing every repository port.
pub struct PostgresStore {
    pub(crate) db: DatabaseConnection,
}

impl PostgresStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Classify a storage error. Unique and foreign-key violations are surfaced
/// as typed errors so callers never see raw driver messages.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::MissingReference(msg),
        _ => match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active: user::ActiveModel = new_user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        // Dropping the transaction without commit rolls it back.
        let txn = self.db.begin().await.map_err(map_db_err)?;

        comment::Entity::delete_many()
            .filter(comment::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        like::Entity::delete_many()
            .filter(like::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}

#[async_trait]
impl PostRepository for PostgresStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn replace(
        &self,
        id: i32,
        content: PostContent,
        created_at: Option<chrono::NaiveDate>,
    ) -> Result<Post, RepoError> {
        let existing = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        active.apply_content(content);
        if let Some(date) = created_at {
            active.created_at = sea_orm::Set(date);
        }

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        like::Entity::delete_many()
            .filter(like::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(existing.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        let result = comment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = new_comment.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = comment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for PostgresStore {
    async fn find(&self, user_id: i32, post_id: i32) -> Result<Option<Like>, RepoError> {
        let result = like::Entity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_like: NewLike) -> Result<Like, RepoError> {
        let active: like::ActiveModel = new_like.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, user_id: i32, post_id: i32) -> Result<(), RepoError> {
        let result = like::Entity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count_for_post(&self, post_id: i32) -> Result<u64, RepoError> {
        like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl ContactRepository for PostgresStore {
    async fn list(&self) -> Result<Vec<ContactMessage>, RepoError> {
        let result = contact_message::Entity::find()
            .order_by_asc(contact_message::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage, RepoError> {
        let active: contact_message::ActiveModel = message.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresStore {
    async fn list(&self) -> Result<Vec<NewsletterSubscription>, RepoError> {
        let result = newsletter_subscription::Entity::find()
            .order_by_asc(newsletter_subscription::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription, RepoError> {
        let active: newsletter_subscription::ActiveModel = subscription.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}
