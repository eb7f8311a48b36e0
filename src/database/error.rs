use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid Postgres connection
    /// url for either the primary or the replica pool.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by an [`sqlx`] error.
    #[error("received a pool error: {0}")]
    Internal(sqlx::Error),
    /// The database pool (primary) is currently in read mode
    /// (most likely due to maintenance) and should not perform
    /// any writes.
    #[error("database is currently in read mode")]
    Readonly,
    /// Either the primary or replica database pools do not
    /// have reliable connection to transact to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
    /// Pending migrations could not be applied.
    #[error("failed to run database migrations")]
    Migration,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| match &e {
            sqlx::Error::Database(err) if err.message().ends_with("read-only transaction") => {
                Report::new(e).change_context(Error::Readonly)
            }
            _ => Report::new(Error::Internal(e)),
        })
    }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// This trait deals with `error_stack::Report<Error>` because it is
/// annoying to check which variant is the current one:
///
/// ```rust,ignore
/// let result = store.find_post(id).await;
/// if let Err(e) = result {
///     let is_unhealthy = e.downcast_ref::<agora::database::Error>()
///         .map(|v| matches!(v, agora::database::Error::UnhealthyPool))
///         .unwrap_or_default();
///     ...
/// }
/// ```
pub trait ErrorExt2 {
    fn is_unhealthy(&self) -> bool;
    fn is_readonly(&self) -> bool;
}

impl ErrorExt2 for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        self.downcast_ref::<Error>()
            .map(|v| matches!(v, Error::UnhealthyPool))
            .unwrap_or_default()
    }

    fn is_readonly(&self) -> bool {
        self.downcast_ref::<Error>()
            .map(|v| matches!(v, Error::Readonly))
            .unwrap_or_default()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ext2() {
        let report = Report::new(Error::UnhealthyPool);
        assert!(report.is_unhealthy());
        assert!(!report.is_readonly());

        let report = Report::new(sqlx::Error::PoolTimedOut).change_context(Error::Readonly);
        assert!(report.is_readonly());
        assert!(!report.is_unhealthy());
    }

    #[test]
    fn test_into_db_error() {
        let result: std::result::Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let report = result.into_db_error().unwrap_err();
        assert!(matches!(
            report.current_context(),
            Error::Internal(sqlx::Error::RowNotFound)
        ));
    }
}
