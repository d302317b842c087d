//! Where a command gets its snapshot from: a live database or a `schema.json`.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use sqlx::postgres::PgPoolOptions;

use learnpath_core::{DatabaseSchema, redact_connection_string, validate_schema};
use learnpath_introspect::{Adapter, IntrospectOptions, PostgresAdapter};

use crate::error::{CliError, CliResult};

#[derive(Args, Debug, Clone, Default)]
pub struct ConnArgs {
    /// Database connection string (flag form).
    #[arg(long, value_name = "CONNECTION_STRING")]
    pub conn: Option<String>,
    /// Database connection string (positional form).
    #[arg(value_name = "CONNECTION_STRING")]
    pub conn_pos: Option<String>,
    #[arg(
        long = "database-url",
        env = "DATABASE_URL",
        hide = true,
        hide_env_values = true
    )]
    pub database_url: Option<String>,
}

impl ConnArgs {
    /// `--conn`, then the positional argument, then `DATABASE_URL`.
    pub fn resolve(&self) -> CliResult<String> {
        match (&self.conn, &self.conn_pos) {
            (Some(_), Some(_)) => Err(CliError::InvalidConfig(
                "use either --conn or positional connection string".to_string(),
            )),
            (Some(value), None) | (None, Some(value)) => Ok(value.clone()),
            (None, None) => self.database_url.clone().ok_or_else(|| {
                CliError::InvalidConfig(
                    "connection string is required (--conn, argument or DATABASE_URL)"
                        .to_string(),
                )
            }),
        }
    }

    pub fn is_given(&self) -> bool {
        self.conn.is_some() || self.conn_pos.is_some()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[command(flatten)]
    pub conn: ConnArgs,
    /// Read a snapshot written by `introspect` instead of connecting.
    #[arg(long, value_name = "SNAPSHOT")]
    pub from: Option<PathBuf>,
    /// Schema name(s) to include.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: Vec<String>,
}

pub fn detect_engine(conn: &str) -> CliResult<&'static str> {
    if conn.starts_with("postgres://") || conn.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        Err(CliError::UnsupportedEngine(redact_connection_string(conn).to_string()))
    }
}

/// Connects and introspects; the snapshot is validated before it is returned.
pub async fn introspect_live(conn: &str, options: IntrospectOptions) -> CliResult<DatabaseSchema> {
    let engine = detect_engine(conn)?;
    let redacted = redact_connection_string(conn);
    tracing::info!(event = "engine_detected", engine = %engine, connection = %redacted);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(conn)
        .await?;
    let adapter = PostgresAdapter::new(pool);

    tracing::info!(event = "introspection_started", engine = adapter.engine());
    let snapshot = adapter.introspect(&options).await?;
    validate_schema(&snapshot)?;
    tracing::info!(
        event = "introspection_finished",
        schemas = snapshot.schemas.len(),
        enums = snapshot.enums.len(),
        composite_types = snapshot.composite_types.len()
    );

    Ok(snapshot)
}

/// Loads the snapshot for `generate`/`check` from `--from` or a live database.
pub async fn load_snapshot(
    args: &SourceArgs,
    schemas: Vec<String>,
    include_views: bool,
) -> CliResult<DatabaseSchema> {
    let Some(path) = &args.from else {
        let conn = args.conn.resolve()?;
        let options = IntrospectOptions {
            include_views,
            include_materialized_views: include_views,
            ..IntrospectOptions::for_schemas(schemas)
        };
        return introspect_live(&conn, options).await;
    };

    if args.conn.is_given() {
        return Err(CliError::InvalidConfig("use either --from or a connection string".to_string()));
    }

    let content = fs::read_to_string(path)?;
    let snapshot: DatabaseSchema = serde_json::from_str(&content)?;
    validate_schema(&snapshot)?;
    tracing::info!(event = "snapshot_loaded", path = %path.display());

    Ok(snapshot)
}
