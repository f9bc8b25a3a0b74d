//! Projections of query state into display rows, picklist entries and
//! recommendation cards.
//!
//! Renderers are pure: they build view models and never touch a
//! terminal. Every projected element carries the item name that
//! activating it feeds back into the query controller.
mod cards;
mod suggest;
mod table;
mod text;

pub use cards::{render_cards, RecommendationCard};
pub use suggest::{render_suggestions, SuggestionEntry};
pub use table::{Cell, Column, TableView, COLUMNS};
pub use text::{format_cards, format_facets, format_suggestions, format_table};

/// Marker shown in place of an absent value.
pub const NO_VALUE: &str = "n/a";

/// Display form of a nutrient value; zero prints as `0`.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_value_not_a_gap() {
        assert_eq!(format_number(0.0), "0");
        assert_ne!(format_number(0.0), NO_VALUE);
        assert_eq!(format_number(300.0), "300");
        assert_eq!(format_number(12.5), "12.5");
    }
}
