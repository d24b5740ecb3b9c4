use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

use color_eyre::eyre;
use serde_json::Value;
use vfs::VfsPath;

pub mod prelude {
    pub use crate::write;
    pub use crate::{Builder, LogLevel};
    pub use googletest::{assert_that, matcher::MatcherBase, matchers::*};
    pub use similar_asserts::assert_eq as sim_assert_eq;
}

/// Returns the workspace root directory via the `CARGO_WORKSPACE_DIR` env var
/// set in `.cargo/config.toml`.
///
/// # Panics
///
/// Panics if `CARGO_WORKSPACE_DIR` is not set.
#[must_use]
pub fn workspace_root() -> PathBuf {
    PathBuf::from(
        std::env::var("CARGO_WORKSPACE_DIR")
            .expect("CARGO_WORKSPACE_DIR must be set in .cargo/config.toml"),
    )
}

/// Returns the path to the workspace `testdata/` directory.
#[must_use]
pub fn workspace_testdata() -> PathBuf {
    workspace_root().join("testdata")
}

/// Reads a file relative to the workspace `testdata/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
#[must_use]
pub fn read_testdata(relative_path: &str) -> String {
    let path = workspace_testdata().join(relative_path);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Reads and parses a JSON file relative to the workspace `testdata/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read or is not valid JSON.
#[must_use]
pub fn read_testdata_json(relative_path: &str) -> Value {
    let raw = read_testdata(relative_path);
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("parse {relative_path}: {e}"))
}

/// Returns a vfs view of a chart under `testdata/charts/`.
#[must_use]
pub fn testdata_chart(name: &str) -> VfsPath {
    let dir = workspace_testdata().join("charts").join(name);
    VfsPath::new(vfs::PhysicalFS::new(dir))
}

/// Write `data` into the virtual filesystem at `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write(path: &VfsPath, data: impl AsRef<[u8]>) -> eyre::Result<VfsPath> {
    let _ = path.parent().create_dir_all();
    let mut file = path.create_file()?;
    file.write_all(data.as_ref())?;
    Ok(path.clone())
}

pub type LogLevel = tracing::metadata::Level;

static INIT_EYRE: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    env_filter: Option<String>,
    log_level: LogLevel,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            env_filter: None,
            log_level: LogLevel::DEBUG,
        }
    }
}

impl Builder {
    /// Initialize test.
    ///
    /// This ensures `color_eyre` is setup once and a test writer for tracing is installed.
    ///
    /// # Panics
    ///
    /// Panics if `color_eyre` installation fails.
    pub fn build(self) {
        INIT_EYRE.call_once(|| {
            color_eyre::install().expect("failed to install eyre");
        });
        let directive = self
            .env_filter
            .unwrap_or_else(|| self.log_level.to_string().to_ascii_lowercase());
        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.log_level.into())
            .parse_lossy(directive);
        // another test may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .without_time()
            .with_test_writer()
            .try_init();
    }

    /// Default log level for tracing inside the test.
    #[must_use]
    pub fn with_log_level(mut self, log_level: impl Into<LogLevel>) -> Self {
        self.log_level = log_level.into();
        self
    }

    /// Configure the tracing subscribers env filter, taking precedence over the log level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

/// Create a new builder.
#[must_use]
pub fn builder() -> Builder {
    Builder::default()
}
