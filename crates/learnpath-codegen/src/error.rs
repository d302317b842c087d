use thiserror::Error;

/// Errors raised while rendering or writing the mirror.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A database name cannot be turned into a Rust identifier.
    #[error("invalid identifier for {what} `{name}`")]
    InvalidIdentifier { what: &'static str, name: String },
    /// The snapshot holds something the mirror cannot express.
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type CodegenResult<T> = std::result::Result<T, CodegenError>;
