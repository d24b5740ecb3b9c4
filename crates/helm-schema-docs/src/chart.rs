use std::io::Read;

use serde::Deserialize;
use vfs::VfsPath;

use crate::{Error, Result};

/// The subset of `Chart.yaml` the value documentation cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub app_version: Option<String>,
    pub description: Option<String>,
}

pub(crate) fn read_chart_yaml(chart_dir: &VfsPath) -> Result<ChartMetadata> {
    let chart_yaml = chart_dir.join("Chart.yaml")?;
    let chart_template_yaml = chart_dir.join("Chart.template.yaml")?;

    let path = if chart_yaml.is_file()? {
        chart_yaml
    } else if chart_template_yaml.is_file()? {
        chart_template_yaml
    } else {
        return Err(Error::MissingChartYaml {
            path: chart_dir.as_str().to_string(),
        });
    };

    let mut bytes = Vec::new();
    path.open_file()?.read_to_end(&mut bytes)?;

    let doc: ChartMetadata = serde_yaml::from_slice(&bytes)?;
    Ok(doc)
}
