use std::path::PathBuf;

use clap::Args;

use learnpath_codegen::{RenderOptions, render_database, write_files};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::source::{SourceArgs, load_snapshot};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory of the generated module (defaults to the config value).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub async fn run_generate(args: GenerateArgs, config: &CliConfig) -> CliResult<()> {
    let schemas = config.schemas_or(&args.source.schema);
    let snapshot = load_snapshot(&args.source, schemas.clone(), config.include_views).await?;

    let options = RenderOptions {
        postgrest_version: config.postgrest_version.clone(),
        schemas,
        include_views: config.include_views,
        type_overrides: config.type_overrides.clone(),
    };
    let files = render_database(&snapshot, &options)?;
    tracing::info!(event = "mirror_rendered", files = files.len());

    let out_dir = args.out_dir.unwrap_or_else(|| config.out_dir.clone());
    let summary = write_files(&out_dir, &files)?;
    tracing::info!(
        event = "mirror_written",
        dir = %out_dir.display(),
        written = summary.written,
        unchanged = summary.unchanged,
        removed = summary.removed
    );

    Ok(())
}
