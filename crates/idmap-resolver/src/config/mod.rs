//! Configuration loading for idmap.
//! Reads idmap.toml from the current directory or path in IDMAP_CONFIG env var.

use std::path::{Path, PathBuf};
use std::time::Duration;

use idmap_common::{FillValue, IdMapError, MultiHits, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::SourceSelection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_sources")]
    pub sources: String,
    /// `N/A`, `passthrough` or any custom string. Unset inherits from the first source.
    #[serde(default)]
    pub fill_value: Option<String>,
    #[serde(default = "default_multi_hits")]
    pub multi_hits: String,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_sources()    -> String { "all".to_string() }
fn default_multi_hits() -> String { "first".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory holding the BioMart exports. Defaults to `<cache dir>/idmap`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_ensembl_file")]
    pub ensembl_file: String,
    #[serde(default = "default_hgnc_file")]
    pub hgnc_file: String,
    #[serde(default = "default_true")]
    pub symbol_aliases: bool,
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

fn default_ensembl_file() -> String { "ensembl.tsv".to_string() }
fn default_hgnc_file()    -> String { "hgnc.tsv".to_string() }
fn default_true()         -> bool { true }

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            ensembl_file: default_ensembl_file(),
            hgnc_file: default_hgnc_file(),
            symbol_aliases: default_true(),
            use_cache: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_species")]
    pub species: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()     -> String { idmap_sources::MYGENE_BASE_URL.to_string() }
fn default_species()      -> String { "human".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            species: default_species(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            fill_value: None,
            multi_hits: default_multi_hits(),
            local: LocalConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from idmap.toml.
    /// Checks IDMAP_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var("IDMAP_CONFIG")
            .unwrap_or_else(|_| "idmap.toml".to_string());

        if !Path::new(&path).exists() {
            info!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }
        Self::from_file(Path::new(&path))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IdMapError::InvalidConfiguration(format!("cannot read {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResolverConfig = toml::from_str(content)?;
        config.selection()?;
        Ok(config)
    }

    pub fn selection(&self) -> Result<SourceSelection> {
        self.sources.parse()
    }

    pub fn multi_hits(&self) -> MultiHits {
        MultiHits::from_name(&self.multi_hits)
    }

    pub fn fill_value(&self) -> Option<FillValue> {
        self.fill_value.as_deref().map(FillValue::parse)
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.local.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("idmap"),
        }
    }

    pub fn ensembl_path(&self) -> PathBuf {
        self.data_dir().join(&self.local.ensembl_file)
    }

    pub fn hgnc_path(&self) -> PathBuf {
        self.data_dir().join(&self.local.hgnc_file)
    }
}

#[cfg(test)]
mod tests;
