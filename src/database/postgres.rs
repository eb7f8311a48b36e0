use async_trait::async_trait;

use super::{ErrorExt2, Pool, PoolConnection, Result, Store};
use crate::{
    config,
    schema::{Post, User},
    types::id::{
        marker::{PostMarker, UserMarker},
        Id,
    },
};

/// [`Store`] backed by PostgreSQL with an optional read replica.
#[derive(Debug, Clone)]
pub struct PgStore {
    primary: Pool,
    replica: Option<Pool>,
}

impl PgStore {
    #[tracing::instrument(skip_all, name = "db.connect_store")]
    pub async fn connect(cfg: &config::Database) -> Result<Self> {
        let primary = Pool::new(cfg, &cfg.primary).await?;
        let replica = match cfg.replica.as_ref() {
            Some(replica) => Some(Pool::new(cfg, replica).await?),
            None => None,
        };

        if primary.is_readonly() {
            tracing::warn!("primary database is read-only, skipping migrations");
        } else {
            primary.migrate().await?;
        }

        Ok(Self { primary, replica })
    }

    #[tracing::instrument(skip_all)]
    async fn db_write(&self) -> Result<PoolConnection> {
        self.primary.get().await
    }

    #[tracing::instrument(skip_all)]
    async fn db_read(&self) -> Result<PoolConnection> {
        if let Some(replica) = self.replica.as_ref() {
            match replica.get().await {
                Ok(conn) => return Ok(conn),
                // fallback
                Err(err) if err.is_unhealthy() => {}
                Err(err) => return Err(err),
            }
        }
        self.primary.get().await
    }

    /// Documents about to be modified must be the latest ones.
    #[tracing::instrument(skip_all)]
    async fn db_read_prefer_primary(&self) -> Result<PoolConnection> {
        match (self.primary.get().await, self.replica.as_ref()) {
            (Ok(conn), ..) => Ok(conn),
            (Err(e), Some(replica)) if e.is_unhealthy() => replica.get().await,
            (Err(e), ..) => Err(e),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, id: Id<UserMarker>) -> Result<Option<User>> {
        let mut conn = self.db_read_prefer_primary().await?;
        User::by_id(&mut conn, id).await
    }

    async fn find_post(&self, id: Id<PostMarker>) -> Result<Option<Post>> {
        let mut conn = self.db_read_prefer_primary().await?;
        Post::find(&mut conn, id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut conn = self.db_read().await?;
        Post::list(&mut conn).await
    }

    async fn save_post(&self, post: &Post) -> Result<()> {
        let mut conn = self.db_write().await?;
        post.save(&mut conn).await
    }

    async fn delete_post(&self, id: Id<PostMarker>) -> Result<bool> {
        let mut conn = self.db_write().await?;
        Post::delete(&mut conn, id).await
    }
}
