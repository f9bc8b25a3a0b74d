//! Where the catalog comes from at startup.
use super::Item;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Catalog input resolved from config: a local JSON export or the
/// backend's item listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    /// Backend base URL; items are read from `GET {base}/platos`.
    Backend(String),
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Backend(base) => platos_url(base),
        }
    }
}

/// Read the full item list from `source`, preserving its order.
pub fn read_items(source: &CatalogSource) -> Result<Vec<Item>> {
    match source {
        CatalogSource::File(path) => {
            let bytes = fs::read(path).with_context(|| format!("read catalog {}", path.display()))?;
            parse_items(&bytes).with_context(|| format!("parse catalog {}", path.display()))
        }
        CatalogSource::Backend(base) => {
            let url = platos_url(base);
            let mut response = ureq::get(&url)
                .call()
                .with_context(|| format!("fetch catalog from {url}"))?;
            let items: Vec<Item> = response
                .body_mut()
                .read_json()
                .with_context(|| format!("parse catalog from {url}"))?;
            Ok(items)
        }
    }
}

/// Parse a JSON array of items.
pub fn parse_items(bytes: &[u8]) -> Result<Vec<Item>> {
    serde_json::from_slice(bytes).context("parse catalog JSON")
}

fn platos_url(base: &str) -> String {
    format!("{}/platos", base.trim_end_matches('/'))
}
