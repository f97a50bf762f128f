//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::{PostRepository, TokenVerifier};
use blog_infra::{InMemoryPostRepository, JwtVerifier};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub tokens: Arc<dyn TokenVerifier>,
    /// Name of the storage backend in use, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state, falling back to in-memory storage when
    /// no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        if config.jwt.uses_default_secret() {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
        let tokens: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(config.jwt.clone()));

        let (repository, storage) = Self::repository(config).await;

        tracing::info!(storage, "Application state initialized");

        Self::with_repository(repository, tokens, storage)
    }

    pub fn with_repository(
        repository: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenVerifier>,
        storage: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(repository),
            tokens,
            storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        use blog_infra::PostgresPostRepository;
        use blog_infra::database::{connect, ensure_schema};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostRepository::new()), "memory");
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return (Arc::new(InMemoryPostRepository::new()), "memory");
            }
        };

        if let Err(e) = ensure_schema(&conn).await {
            tracing::error!("Failed to ensure database schema: {}", e);
        }

        (Arc::new(PostgresPostRepository::new(conn)), "postgres")
    }

    #[cfg(not(feature = "postgres"))]
    async fn repository(_config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryPostRepository::new()), "memory")
    }
}
