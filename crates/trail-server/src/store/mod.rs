//! Trail storage
//!
//! Persistence rules (id generation, referential checks, insert/update/delete
//! semantics) live in storage-side procedures and a read view. This module
//! only knows how to call them. Handlers depend on the [`TrailStore`] trait
//! so the procedure mechanics can be swapped or faked in tests.

pub mod postgres;

use async_trait::async_trait;

use crate::models::{Trail, TrailFields, TrailId};

pub use postgres::PgTrailStore;

/// Errors surfaced by a [`TrailStore`]
///
/// Both variants carry the underlying driver message; route handlers map
/// either to a 500 response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Could not obtain or keep a connection
    #[error("Database connection failed: {0}")]
    Unavailable(sqlx::Error),

    /// The statement or procedure itself failed
    #[error("{0}")]
    Procedure(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => StoreError::Unavailable(err),
            other => StoreError::Procedure(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository over the trail procedures and detail view
///
/// Every operation runs on its own connection, released on every exit path.
#[async_trait]
pub trait TrailStore: Send + Sync {
    /// All rows of the detail view; empty when there are none
    async fn list(&self) -> StoreResult<Vec<Trail>>;

    /// One trail, or `None` when the id has no row
    async fn get(&self, id: TrailId) -> StoreResult<Option<Trail>>;

    /// Insert a trail and return its storage-assigned id
    async fn create(&self, fields: &TrailFields) -> StoreResult<TrailId>;

    /// Existence check used before updates
    async fn exists(&self, id: TrailId) -> StoreResult<bool>;

    async fn update(&self, id: TrailId, fields: &TrailFields) -> StoreResult<()>;

    /// Delete by id. Unknown ids are not an error.
    async fn delete(&self, id: TrailId) -> StoreResult<()>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().starts_with("Database connection failed"));
    }

    #[test]
    fn test_other_errors_are_procedure_failures() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Procedure(_)));
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
    }
}
