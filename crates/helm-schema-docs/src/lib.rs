mod chart;
mod comments;
mod values;

pub use chart::ChartMetadata;
pub use comments::{ValueComment, parse_value_comments};
pub use values::{flatten_values, format_default, yaml_to_json};

use std::io::Read;
use std::path::Path;

use vfs::VfsPath;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vfs error: {0}")]
    Vfs(#[from] vfs::VfsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no Chart.yaml found in chart directory {path:?}")]
    MissingChartYaml { path: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single documented chart value, as helm-docs would render it in a values table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentedValue {
    /// Dotted key path of the value, e.g. `image.tag`.
    pub key: String,
    /// Default rendered as text, usually wrapped in backticks (`` `"latest"` ``).
    pub default_text: String,
    /// Description taken from the `# --` comment above the value.
    pub auto_description: String,
}

impl DocumentedValue {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        default_text: impl Into<String>,
        auto_description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            default_text: default_text.into(),
            auto_description: auto_description.into(),
        }
    }
}

/// Source of documented chart values.
pub trait ValuesDocSource {
    /// Enumerate all documented values.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying chart cannot be read or parsed.
    fn documented_values(&self) -> Result<Vec<DocumentedValue>>;
}

impl ValuesDocSource for Vec<DocumentedValue> {
    fn documented_values(&self) -> Result<Vec<DocumentedValue>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ChartDocumentation {
    pub chart: ChartMetadata,
    pub values: Vec<DocumentedValue>,
}

/// Value documentation of a chart directory.
#[derive(Debug, Clone)]
pub struct ChartDocs {
    chart_dir: VfsPath,
}

impl ChartDocs {
    #[must_use]
    pub fn new(chart_dir: VfsPath) -> Self {
        Self { chart_dir }
    }

    #[must_use]
    pub fn from_local_path(path: &Path) -> Self {
        Self::new(VfsPath::new(vfs::PhysicalFS::new(path)))
    }
}

impl ValuesDocSource for ChartDocs {
    fn documented_values(&self) -> Result<Vec<DocumentedValue>> {
        load_chart_documentation(&self.chart_dir).map(|docs| docs.values)
    }
}

/// Load the chart metadata and value documentation of a chart directory.
///
/// A chart without a `values.yaml` has no documented values.
///
/// # Errors
///
/// Returns an error if `Chart.yaml` is missing or malformed, or if
/// `values.yaml` cannot be read or parsed.
pub fn load_chart_documentation(chart_dir: &VfsPath) -> Result<ChartDocumentation> {
    let chart = chart::read_chart_yaml(chart_dir)?;

    let values_path = chart_dir.join("values.yaml")?;
    if !values_path.is_file()? {
        tracing::debug!(chart = ?chart.name, "chart has no values.yaml");
        return Ok(ChartDocumentation {
            chart,
            values: Vec::new(),
        });
    }

    let mut src = String::new();
    values_path.open_file()?.read_to_string(&mut src)?;
    let values = document_values(&src)?;

    tracing::debug!(
        chart = ?chart.name,
        values = values.len(),
        "loaded chart value documentation"
    );
    Ok(ChartDocumentation { chart, values })
}

/// Produce one [`DocumentedValue`] per documented row of a `values.yaml` document.
///
/// # Errors
///
/// Returns an error if the document is not valid YAML.
pub fn document_values(values_yaml: &str) -> Result<Vec<DocumentedValue>> {
    let is_blank = values_yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if is_blank {
        return Ok(Vec::new());
    }

    let doc: serde_yaml::Value = serde_yaml::from_str(values_yaml)?;
    let comments = parse_value_comments(values_yaml);

    flatten_values(&doc, |key| comments.contains_key(key))
        .into_iter()
        .map(|(key, value)| {
            let comment = comments.get(&key);
            let default_text = match comment.and_then(|c| c.default.clone()) {
                Some(text) => text,
                None => format_default(value)?,
            };
            let auto_description = comment.map(|c| c.description.clone()).unwrap_or_default();
            Ok(DocumentedValue {
                key,
                default_text,
                auto_description,
            })
        })
        .collect()
}
