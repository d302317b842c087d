use std::path::{Path, PathBuf};

use clap::Args;

use learnpath_codegen::write_bytes_atomic;
use learnpath_core::{DatabaseSchema, build_fk_graph_report};
use learnpath_introspect::IntrospectOptions;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::source::{ConnArgs, introspect_live};

#[derive(Args, Debug)]
pub struct IntrospectArgs {
    #[command(flatten)]
    pub conn: ConnArgs,
    /// Output path for the snapshot.
    #[arg(long, default_value = "schema.json")]
    pub out: PathBuf,
    /// Also write the JSON Schema of the snapshot format to this path.
    #[arg(long, value_name = "PATH")]
    pub json_schema: Option<PathBuf>,
    /// Schema name(s) to include.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: Vec<String>,
    /// Fail when foreign keys form a cycle.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
    /// Include system schemas such as pg_catalog.
    #[arg(long, default_value_t = false)]
    pub include_system_schemas: bool,
    /// Skip indexes.
    #[arg(long, default_value_t = false)]
    pub no_indexes: bool,
    /// Skip table and column comments.
    #[arg(long, default_value_t = false)]
    pub no_comments: bool,
}

pub async fn run_introspect(args: IntrospectArgs, config: &CliConfig) -> CliResult<()> {
    let conn = args.conn.resolve()?;
    let options = IntrospectOptions {
        include_system_schemas: args.include_system_schemas,
        include_views: config.include_views,
        include_materialized_views: config.include_views,
        include_indexes: !args.no_indexes,
        include_comments: !args.no_comments,
        ..IntrospectOptions::for_schemas(config.schemas_or(&args.schema))
    };

    let snapshot = introspect_live(&conn, options).await?;
    log_fk_order(&snapshot, args.strict)?;

    write_json(&args.out, &snapshot)?;
    tracing::info!(event = "schema_written", path = %args.out.display());

    if let Some(path) = &args.json_schema {
        write_json(path, &schemars::schema_for!(DatabaseSchema))?;
        tracing::info!(event = "json_schema_written", path = %path.display());
    }

    Ok(())
}

fn log_fk_order(snapshot: &DatabaseSchema, strict: bool) -> CliResult<()> {
    let report = build_fk_graph_report(snapshot);
    tracing::info!(
        event = "fk_graph",
        nodes = report.summary.nodes,
        edges = report.summary.edges
    );

    match (&report.topo_order, &report.cycle) {
        (Some(order), _) => {
            tracing::info!(event = "fk_order", order = %order.join(" -> "));
            Ok(())
        }
        (None, cycle) => {
            let nodes = cycle.as_deref().unwrap_or_default().join(", ");
            tracing::warn!(event = "fk_cycle", nodes = %nodes);
            if strict {
                return Err(CliError::InvalidConfig(format!(
                    "foreign key graph contains a cycle: {nodes}"
                )));
            }
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let mut data = serde_json::to_vec_pretty(value)?;
    data.push(b'\n');
    write_bytes_atomic(path, &data)?;
    Ok(())
}
