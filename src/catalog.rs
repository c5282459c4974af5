//! Slug catalogs: plain-text exports of CMS slugs, one per line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Load slugs from a file.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn load_slugs(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read slug catalog {}", path.display()))?;

    let slugs = parse_slugs(&contents);
    info!("Loaded {} slugs from {}", slugs.len(), path.display());
    Ok(slugs)
}

pub fn parse_slugs(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
