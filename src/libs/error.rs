//! Classified error kinds for store and validation failures.
//!
//! Every fallible core operation returns one of four kinds so that callers
//! (the CLI and the HTTP transport) can react precisely: validation and
//! conflict errors are user-correctable, not-found errors target a missing
//! id, and store errors are unexpected storage failures that get logged and
//! surfaced as a generic failure. No kind is retried automatically.

use crate::libs::messages::Message;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed required input; the caller must correct and resubmit.
    #[error("{0}")]
    Validation(Message),

    /// Uniqueness violation; the caller must choose a different identifying value.
    #[error("{0}")]
    Conflict(Message),

    /// The operation targeted an id that does not exist.
    #[error("{0}")]
    NotFound(Message),

    /// Underlying storage failure, unexpected for the request.
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // Encoding a column value for storage failed; classify with the store.
        Error::Store(rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
    }
}
