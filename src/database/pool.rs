use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::{str::FromStr, time::Duration};

use super::{Error, ErrorExt2, Result};
use crate::config;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

#[derive(Clone)]
pub struct Pool {
    pool: sqlx::PgPool,
    readonly: bool,
}

impl Pool {
    pub(crate) async fn new(
        global_cfg: &config::Database,
        pool_cfg: &config::DbPoolConfig,
    ) -> Result<Self> {
        let mut pool_opts = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(global_cfg.timeout_secs.get()))
            .max_connections(pool_cfg.pool_size.get());

        if let Some(min_idle) = pool_cfg.min_idle {
            pool_opts = pool_opts.min_connections(min_idle.get());
        }

        let mut connect_opts =
            PgConnectOptions::from_str(pool_cfg.url.as_str()).change_context(Error::InvalidUrl)?;

        if global_cfg.enforce_tls {
            connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
        }

        if pool_cfg.readonly {
            connect_opts = connect_opts.options([("default_transaction_read_only", "on")]);
        }

        let pool = Self {
            pool: pool_opts.connect_lazy_with(connect_opts),
            readonly: pool_cfg.readonly,
        };

        match pool.wait_until_healthy().await {
            Ok(..) => {}
            Err(err) if err.is_unhealthy() => {
                tracing::warn!("database pool is not healthy yet, connecting lazily");
            }
            Err(err) => return Err(err),
        }

        Ok(pool)
    }
}

impl From<sqlx::PgPool> for Pool {
    fn from(pool: sqlx::PgPool) -> Self {
        Self {
            pool,
            readonly: false,
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pool.fmt(f)
    }
}

impl Pool {
    #[inline(always)]
    #[must_use]
    pub fn connections(&self) -> u32 {
        self.pool.size()
    }

    #[must_use]
    pub const fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Always goes through [`sqlx::Pool::acquire`] so a pool whose
    /// connections were all reaped or never opened reconnects on demand.
    #[tracing::instrument(name = "db.connect", skip(self))]
    pub async fn get(&self) -> Result<PoolConnection> {
        self.pool.acquire().await.map_err(acquire_error)
    }

    #[tracing::instrument(skip(self))]
    pub async fn wait_until_healthy(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }

    #[tracing::instrument(skip_all, name = "db.migrations.run_pending")]
    pub async fn migrate(&self) -> Result<()> {
        let now = tokio::time::Instant::now();
        tracing::info!("Performing database migrations... (this may take a while)");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .change_context(Error::Migration)?;

        let elapsed = now.elapsed();
        tracing::info!("Successfully performed database migrations! took {elapsed:.2?}");
        Ok(())
    }
}

/// Failing to reach the database is reported as an unhealthy pool so
/// callers can fall back to another pool.
fn acquire_error(error: sqlx::Error) -> Report<Error> {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(..) | sqlx::Error::Tls(..) => {
            Report::new(error).change_context(Error::UnhealthyPool)
        }
        error => Report::new(Error::Internal(error)),
    }
}
