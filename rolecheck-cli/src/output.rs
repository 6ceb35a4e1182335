use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use rolecheck::RunReport;

/// Writes the report as pretty-printed JSON, creating parent directories as needed.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serializing run report")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
