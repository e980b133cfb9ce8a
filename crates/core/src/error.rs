use codenav_api::{ApiError, DumpId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeNavError {
    #[error("missing dump {0}")]
    MissingDump(DumpId),
    /// The token is malformed or its counters do not describe a reachable state.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
    #[error(transparent)]
    Collaborator(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodeNavError>;
