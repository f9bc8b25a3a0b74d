//! Distinct restaurant/category/seal values offered as filter choices.
use super::Item;
use serde::Serialize;
use std::collections::BTreeSet;

/// Facet values projected from a catalog, each in lexicographic order.
///
/// Blank values are not offered: an item with no category contributes
/// nothing to `categories`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    restaurants: BTreeSet<String>,
    categories: BTreeSet<String>,
    seals: BTreeSet<String>,
}

impl Facets {
    pub fn derive(items: &[Item]) -> Self {
        let mut facets = Facets::default();
        for item in items {
            insert_non_blank(&mut facets.restaurants, &item.company);
            insert_non_blank(&mut facets.categories, &item.category);
            for seal in &item.seals {
                insert_non_blank(&mut facets.seals, seal);
            }
        }
        facets
    }

    pub fn restaurants(&self) -> &BTreeSet<String> {
        &self.restaurants
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn seals(&self) -> &BTreeSet<String> {
        &self.seals
    }
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}
