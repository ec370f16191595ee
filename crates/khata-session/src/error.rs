//! # Session Error Type
//!
//! Everything that can go wrong at the session boundary. All variants
//! are recoverable: the operator is shown the message, the in-memory
//! order survives, and retry is a deliberate operator action.

use thiserror::Error;

use khata_core::CoreError;
use khata_db::DbError;

/// Errors surfaced to the operator at the session boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A business rule rejected the operation; no I/O was attempted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage boundary failed; any open transaction rolled back.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
