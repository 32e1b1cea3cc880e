use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(alias = "SiteName")]
    pub site_name: String,

    #[serde(alias = "Path")]
    pub path: PathBuf,

    /// Zero-based whitespace-split field holding the status code.
    #[serde(alias = "IndexOfStatusCode")]
    pub index_of_status_code: usize,

    /// Lines already consumed from the newest log file.
    #[serde(default, alias = "CurrentRow")]
    pub current_row: u64,
}

impl SiteConfig {
    pub fn new(site_name: impl Into<String>, path: impl Into<PathBuf>, column: usize) -> Self {
        Self {
            site_name: site_name.into(),
            path: path.into(),
            index_of_status_code: column,
            current_row: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesFile {
    #[serde(alias = "Sites")]
    pub sites: Vec<SiteConfig>,
}

impl SitesFile {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for site in &self.sites {
            if site.site_name.trim().is_empty() {
                anyhow::bail!("Site with log path {:?} has an empty siteName", site.path);
            }
            if !seen.insert(site.site_name.as_str()) {
                anyhow::bail!("Duplicate siteName '{}'", site.site_name);
            }
        }
        Ok(())
    }
}

pub fn parse_sites(content: &str) -> Result<Vec<SiteConfig>> {
    let file: SitesFile = serde_json::from_str(content).context("Invalid sites JSON")?;
    file.validate()?;
    Ok(file.sites)
}

pub fn load_sites(config_path: &Path) -> Result<Vec<SiteConfig>> {
    let start_time = Instant::now();

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read sites config {:?}", config_path))?;
    let sites = parse_sites(&content)
        .with_context(|| format!("Failed to load sites config {:?}", config_path))?;

    info!(
        action = "loaded",
        component = "site_config",
        file_path = ?config_path,
        site_count = sites.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Loaded site positions"
    );
    Ok(sites)
}
