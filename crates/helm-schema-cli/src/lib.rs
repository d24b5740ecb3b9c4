mod error;
pub mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use helm_schema_docs::{ChartDocs, ValuesDocSource};
use helm_schema_enrich::{ValueCommentIndex, enrich_schema};
use serde_json::Value;

pub use error::{CliError, CliResult};
pub use logging::{ColorMode, LogFormat};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "helm-schema-enrich",
    version,
    about = "Add helm-docs descriptions and defaults to a Helm values JSON schema"
)]
pub struct Cli {
    /// Root directory of the chart whose values are documented
    #[arg(long, env = "CHART_DIR", value_name = "DIR")]
    pub chart_dir: PathBuf,

    /// JSON schema to enrich
    #[arg(long = "schema-in", env = "SCHEMA_IN_PATH", value_name = "FILE")]
    pub schema_in_path: PathBuf,

    /// Where to write the enriched JSON schema
    #[arg(long = "schema-out", env = "SCHEMA_OUT_PATH", value_name = "FILE")]
    pub schema_out_path: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[arg(long, value_enum, default_value_t = LogFormat::PrettyCompact)]
    pub log_format: LogFormat,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub chart_dir: PathBuf,
    pub schema_in_path: PathBuf,
    pub schema_out_path: PathBuf,
}

impl From<&Cli> for EnrichOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            chart_dir: cli.chart_dir.clone(),
            schema_in_path: cli.schema_in_path.clone(),
            schema_out_path: cli.schema_out_path.clone(),
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the chart or schema cannot be read, a documented default is
/// not valid JSON, or the output cannot be written. Nothing is written on error.
pub fn run(cli: &Cli) -> CliResult<()> {
    run_with_options(&EnrichOptions::from(cli))
}

/// Enrich the schema described by `opts` and write the result.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_options(opts: &EnrichOptions) -> CliResult<()> {
    if !opts.chart_dir.is_dir() {
        return Err(CliError::ChartDirNotFound {
            path: opts.chart_dir.clone(),
        });
    }

    let docs = ChartDocs::from_local_path(&opts.chart_dir);
    let schema = enrich_schema_file(&docs, &opts.schema_in_path)?;

    let json = serde_json::to_vec_pretty(&schema).map_err(CliError::SerializeSchema)?;
    write_output(&opts.schema_out_path, &json)?;

    tracing::info!(
        chart = %opts.chart_dir.display(),
        output = %opts.schema_out_path.display(),
        "wrote enriched schema"
    );
    Ok(())
}

/// Enrich the JSON schema at `schema_in_path` with the values documented by `source`.
///
/// # Errors
///
/// Returns an error if the documented values cannot be enumerated, a default cannot
/// be decoded, or the schema cannot be read or parsed.
pub fn enrich_schema_file(
    source: &impl ValuesDocSource,
    schema_in_path: &Path,
) -> CliResult<Value> {
    let values = source.documented_values()?;
    let index = ValueCommentIndex::from_documented_values(&values)?;
    tracing::debug!(
        documented = values.len(),
        distinct = index.len(),
        "indexed documented values"
    );

    let mut schema = load_json_file(schema_in_path)?;
    enrich_schema(&mut schema, &index);
    Ok(schema)
}

fn load_json_file(path: &Path) -> CliResult<Value> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadSchema {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::ParseSchema {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, data: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| CliError::CreateOutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| CliError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path).map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    Ok(())
}
