use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("chart directory {path} does not exist")]
    ChartDirNotFound { path: PathBuf },

    #[error("chart documentation error: {0}")]
    Docs(#[from] helm_schema_docs::Error),

    #[error(transparent)]
    Enrich(#[from] helm_schema_enrich::Error),

    #[error("failed to read schema {path}")]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema {path}")]
    ParseSchema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize schema")]
    SerializeSchema(#[source] serde_json::Error),

    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CliResult<T> = std::result::Result<T, CliError>;
