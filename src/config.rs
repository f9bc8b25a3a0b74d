//! Runtime configuration.
//!
//! Each setting resolves in priority order:
//! 1. CLI flag (`--backend`, `--catalog`)
//! 2. Config file (`--config`, or `<config_dir>/menu-finder/config.json`)
//! 3. Environment (`MFIND_BACKEND_URL`, `MFIND_CATALOG`)
//! 4. Built-in default
//!
//! When no catalog path resolves, the catalog is read from the backend.
use crate::catalog::CatalogSource;
use crate::cli::GlobalArgs;
use crate::query::DEFAULT_SUGGESTION_LIMIT;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV: &str = "MFIND_BACKEND_URL";
pub const CATALOG_ENV: &str = "MFIND_CATALOG";

/// On-disk config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    /// Catalog JSON path; relative paths resolve against the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_limit: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub catalog: CatalogSource,
    pub suggestion_limit: usize,
    pub recommendation_limit: Option<usize>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("menu-finder").join("config.json"))
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let mut config: ConfigFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config {}", path.display()))?;
    validate_config(&config)?;
    if let (Some(catalog), Some(dir)) = (config.catalog.as_ref(), path.parent()) {
        if catalog.is_relative() {
            config.catalog = Some(dir.join(catalog));
        }
    }
    Ok(config)
}

pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.suggestion_limit == Some(0) {
        return Err(anyhow!("suggestion_limit must be at least 1"));
    }
    if let Some(url) = config.backend_url.as_deref() {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("backend_url must be an http(s) URL, got {url:?}"));
        }
    }
    Ok(())
}

/// Resolve settings from CLI flags, the config file and the process
/// environment.
pub fn resolve_settings(args: &GlobalArgs) -> Result<Settings> {
    let file = match args.config.as_deref() {
        Some(path) => Some(load_config(path)?),
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => Some(load_config(&path)?),
            None => None,
        },
    };
    Ok(resolve_with(args, file.as_ref(), |key| {
        std::env::var(key).ok().filter(|value| !value.trim().is_empty())
    }))
}

fn resolve_with(
    args: &GlobalArgs,
    file: Option<&ConfigFile>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let backend_url = args
        .backend
        .clone()
        .or_else(|| file.and_then(|f| f.backend_url.clone()))
        .or_else(|| env(BACKEND_URL_ENV))
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let catalog = args
        .catalog
        .clone()
        .or_else(|| file.and_then(|f| f.catalog.clone()))
        .or_else(|| env(CATALOG_ENV).map(PathBuf::from))
        .map(CatalogSource::File)
        .unwrap_or_else(|| CatalogSource::Backend(backend_url.clone()));
    Settings {
        backend_url,
        catalog,
        suggestion_limit: file
            .and_then(|f| f.suggestion_limit)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT),
        recommendation_limit: file.and_then(|f| f.recommendation_limit),
    }
}
