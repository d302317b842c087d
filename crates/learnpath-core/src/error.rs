use thiserror::Error;

/// Error type shared by the snapshot, introspection and generation crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The database rejected a catalog query or could not be reached.
    #[error("database error: {0}")]
    Db(String),
    /// The snapshot breaks one of its structural invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The database uses something the mirror cannot represent.
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("other error: {0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }
}

/// Convenience alias for results returned by the learnpath crates.
pub type Result<T> = std::result::Result<T, Error>;
