use clap::Args;

use learnpath_codegen::{DriftReport, check_schema_drift};
use learnpath_types::{SCHEMAS, SchemaDef};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::source::{SourceArgs, load_snapshot};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub async fn run_check(args: CheckArgs, config: &CliConfig) -> CliResult<()> {
    let schemas = config.schemas_or(&args.source.schema);
    let declared = declared_schemas(&schemas)?;
    let snapshot = load_snapshot(&args.source, schemas, config.include_views).await?;

    let mut report = DriftReport::default();
    for schema in declared {
        report.merge(check_schema_drift(schema, &snapshot));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    if report.is_clean() {
        tracing::info!(event = "check_passed");
        Ok(())
    } else {
        tracing::warn!(event = "drift_detected", issues = report.issues.len());
        Err(CliError::Drift(report.issues.len()))
    }
}

fn declared_schemas(names: &[String]) -> CliResult<Vec<&'static SchemaDef>> {
    names
        .iter()
        .map(|name| {
            SCHEMAS
                .iter()
                .find(|schema| schema.name == name.as_str())
                .ok_or_else(|| {
                    CliError::InvalidConfig(format!("schema `{name}` is not part of the mirror"))
                })
        })
        .collect()
}

/// Human-readable report, one issue per line.
fn render_report(report: &DriftReport) -> String {
    if report.is_clean() {
        return "mirror matches the database\n".to_string();
    }

    let mut lines: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
    lines.push(format!("{} issue(s)", report.issues.len()));
    lines.join("\n") + "\n"
}
