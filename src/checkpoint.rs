use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{SiteConfig, SitesFile};

pub fn render_checkpoint(sites: &[SiteConfig]) -> Result<String> {
    let file = SitesFile {
        sites: sites.to_vec(),
    };
    let mut rendered =
        serde_json::to_string_pretty(&file).context("Failed to serialize site positions")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Overwrite `path` with the current site positions.
///
/// The new content goes to a sibling temp file first and is renamed over the
/// target, so a crash mid-write leaves the previous checkpoint intact.
pub fn write_checkpoint(path: &Path, sites: &[SiteConfig]) -> Result<()> {
    let rendered = render_checkpoint(sites)?;
    let tmp_path = temp_path(path);

    fs::write(&tmp_path, rendered.as_bytes())
        .with_context(|| format!("Failed to write checkpoint to {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move checkpoint into place at {:?}", path))?;

    info!(
        action = "save",
        component = "checkpoint",
        file_path = ?path,
        site_count = sites.len(),
        "Saved log positions"
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "checkpoint".into());
    name.push(".tmp");
    path.with_file_name(name)
}
