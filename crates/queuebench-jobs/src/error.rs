//! Error types for the queuebench harness.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the harness.
///
/// Startup callers treat every variant as fatal; the producer logs and
/// suppresses them so a failed submission never takes down the batch.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Queue service rejected or failed an operation
    #[error("Queue error: {0}")]
    Queue(#[from] underway::queue::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migrate(#[source] sqlx::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
