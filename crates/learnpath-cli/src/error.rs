use thiserror::Error;

use learnpath_codegen::CodegenError;
use learnpath_core::Error as CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
    #[error("schema drift: {0} issue(s) between the mirror and the database")]
    Drift(usize),
}

pub type CliResult<T> = Result<T, CliError>;
