//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::{Clock, PostRepository, SystemClock, UserRepository};
use blog_infra::database::DatabaseConfig;
use blog_infra::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts: PostService::new(posts, clock),
            users,
        }
    }

    /// State backed by in-memory storage.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            clock,
        )
    }

    /// Build the application state, falling back to in-memory storage when the
    /// database is not configured or unreachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match blog_infra::database::connect(config).await {
                    Ok(conn) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::from_parts(
                            Arc::new(PostgresPostRepository::new(conn.clone())),
                            Arc::new(PostgresUserRepository::new(conn)),
                            clock,
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(clock)
    }
}
