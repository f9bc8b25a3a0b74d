//! Filter predicate engine.
//!
//! `evaluate` is a pure conjunction of four clauses checked in a fixed
//! order: name text, facets, nutrient ranges, seals. The first failing
//! clause short-circuits.
use crate::catalog::{Item, Nutrient};

/// Inclusive numeric range. The default is unbounded on both sides, so it
/// admits negative values too.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl Default for NumericRange {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    /// An absent value only satisfies the wide-open default range.
    pub fn admits(&self, value: Option<f64>) -> bool {
        match value {
            Some(value) => value >= self.min && value <= self.max,
            None => self.is_unbounded(),
        }
    }
}

/// How the seal dimension constrains results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SealMode {
    #[default]
    Any,
    /// Only items carrying no seal at all.
    None,
    /// Only items carrying this seal label.
    Specific(String),
}

impl SealMode {
    pub fn admits(&self, seals: &[String]) -> bool {
        match self {
            SealMode::Any => true,
            SealMode::None => seals.is_empty(),
            SealMode::Specific(seal) => seals.iter().any(|s| s == seal),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SealMode::Any => "any",
            SealMode::None => "none",
            SealMode::Specific(seal) => seal,
        }
    }
}

/// Filter constraints for one query, rebuilt from the controls each time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub restaurant: Option<String>,
    pub category: Option<String>,
    pub seal: SealMode,
    pub ranges: [NumericRange; 4],
}

impl FilterState {
    pub fn range(&self, nutrient: Nutrient) -> &NumericRange {
        &self.ranges[nutrient.index()]
    }

    pub fn set_range(&mut self, nutrient: Nutrient, range: NumericRange) {
        self.ranges[nutrient.index()] = range;
    }
}

/// Case-insensitive substring match of `text` in the item name.
/// Empty text matches every item.
pub fn name_matches(item: &Item, text: &str) -> bool {
    text.is_empty() || item.name.to_lowercase().contains(&text.to_lowercase())
}

pub fn evaluate(item: &Item, text: &str, filters: &FilterState) -> bool {
    if !name_matches(item, text) {
        return false;
    }
    if let Some(restaurant) = filters.restaurant.as_deref() {
        if item.company != restaurant {
            return false;
        }
    }
    if let Some(category) = filters.category.as_deref() {
        if item.category != category {
            return false;
        }
    }
    let in_ranges = Nutrient::ALL
        .iter()
        .all(|nutrient| filters.range(*nutrient).admits(nutrient.value(item)));
    if !in_ranges {
        return false;
    }
    filters.seal.admits(&item.seals)
}

/// Apply `evaluate` over the catalog, keeping catalog order.
pub fn filter_catalog(items: &[Item], text: &str, filters: &FilterState) -> Vec<Item> {
    items
        .iter()
        .filter(|item| evaluate(item, text, filters))
        .cloned()
        .collect()
}

/// Up to `limit` items whose name matches `text`, in catalog order.
/// Blank text yields nothing so the picklist stays closed.
pub fn suggest<'a>(items: &'a [Item], text: &str, limit: usize) -> Vec<&'a Item> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
