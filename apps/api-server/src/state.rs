//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use quill_core::ports::{
    CommentRepository, ContactRepository, ImageStore, LikeRepository, PostRepository,
    SubscriptionRepository, UserRepository,
};
use quill_core::services::{AuthGateway, BlogService};
use quill_infra::{
    Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService, LocalImageStore,
};

#[cfg(feature = "postgres")]
use quill_infra::PostgresStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGateway,
    pub blog: BlogService,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Build the application state with the configured store.
    ///
    /// Without `DATABASE_URL` everything lives in memory and is lost on restart.
    pub async fn new(config: &AppConfig) -> io::Result<Self> {
        let images: Arc<dyn ImageStore> = Arc::new(
            LocalImageStore::new(&config.upload_dir, &config.public_base_url)
                .await
                .map_err(io::Error::other)?,
        );

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let db = quill_infra::database::connect(db_config)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    io::Error::other(e)
                })?;

            tracing::info!("Application state initialized (postgres)");
            return Ok(Self::with_store(
                Arc::new(PostgresStore::new(db)),
                config.jwt.clone(),
                images,
            ));
        }

        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        Ok(Self::with_store(
            Arc::new(InMemoryStore::new()),
            config.jwt.clone(),
            images,
        ))
    }

    /// Wire the services over a single store implementing every repository.
    pub fn with_store<S>(store: Arc<S>, jwt: JwtConfig, images: Arc<dyn ImageStore>) -> Self
    where
        S: UserRepository
            + PostRepository
            + CommentRepository
            + LikeRepository
            + ContactRepository
            + SubscriptionRepository
            + 'static,
    {
        let auth = AuthGateway::new(
            store.clone(),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(jwt)),
        );
        let blog = BlogService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        );

        Self { auth, blog, images }
    }
}
