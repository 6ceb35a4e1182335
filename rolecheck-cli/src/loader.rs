use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use rolecheck::Document;

/// Loads every `*.txt` file directly inside `dir`, sorted by file name.
///
/// Invalid UTF-8 is replaced rather than rejected. The document id is the file name.
pub fn discover_documents(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        bail!("Missing folder: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_txt = path.extension().and_then(|ext| ext.to_str()) == Some("txt");
        if is_txt && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        bail!("No .txt files found in {}", dir.display());
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(document = %id, bytes = bytes.len(), "loaded document");
        documents.push(Document::new(id, String::from_utf8_lossy(&bytes).into_owned()));
    }
    Ok(documents)
}
