use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{
    config,
    database::{MemoryStore, PgStore, Store},
};

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub store: Arc<dyn Store>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let store: Arc<dyn Store> = if let Some(db) = cfg.db.as_ref() {
            Arc::new(PgStore::connect(db).await.change_context(AppError)?)
        } else {
            tracing::warn!("No database configured, posts are kept in memory and lost on shutdown");
            Arc::new(MemoryStore::new())
        };

        Ok(Self::with_store(cfg, store))
    }

    #[must_use]
    pub fn with_store(cfg: config::Server, store: Arc<dyn Store>) -> Self {
        Self {
            config: Arc::new(cfg),
            store,
        }
    }
}
