//! In-memory item catalog.
//!
//! The catalog is loaded exactly once per session and never mutated
//! afterwards. Facets are derived at load time and cached alongside the
//! items, so every consumer sees the same view of the data.
mod facets;
mod source;

pub use facets::Facets;
pub use source::{read_items, CatalogSource};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One food item as published by the backend.
///
/// Nutrient values are optional: `None` means the source had no value,
/// which is distinct from a measured zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub company: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub saturated_fat: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub sugars: Option<f64>,
    #[serde(default)]
    pub seals: Vec<String>,
    /// Source identifier of the item, when the backend exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Physical state (`solid` or `liquid`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The four nutrients that carry range filters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
    ];

    pub fn index(self) -> usize {
        match self {
            Nutrient::Calories => 0,
            Nutrient::Protein => 1,
            Nutrient::Fat => 2,
            Nutrient::Carbs => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
        }
    }

    pub fn value(self, item: &Item) -> Option<f64> {
        match self {
            Nutrient::Calories => item.calories,
            Nutrient::Protein => item.protein,
            Nutrient::Fat => item.fat,
            Nutrient::Carbs => item.carbs,
        }
    }
}

/// Load-once store holding the session's items in source order.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: Vec<Item>,
    facets: Facets,
    loaded: bool,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that is already loaded with `items`.
    #[cfg(test)]
    pub(crate) fn from_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        store.loaded = true;
        store.facets = Facets::derive(&items);
        store.items = items;
        store
    }

    /// Populate the store. A second call is rejected and leaves the
    /// existing items untouched.
    pub fn load(&mut self, items: Vec<Item>) -> Result<()> {
        if self.loaded {
            return Err(anyhow!(
                "catalog already loaded ({} items)",
                self.items.len()
            ));
        }
        self.facets = Facets::derive(&items);
        self.items = items;
        self.loaded = true;
        tracing::info!(items = self.items.len(), "catalog loaded");
        Ok(())
    }

    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
