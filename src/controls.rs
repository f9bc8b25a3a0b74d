//! Filter control values and their translation into a `FilterState`.
//!
//! Controls hold what the user typed or selected, verbatim. They are
//! resolved into a `FilterState` once per query, never cached.
use crate::catalog::{Facets, Nutrient};
use crate::filter::{FilterState, NumericRange, SealMode};
use std::collections::BTreeSet;

/// Text entered in one nutrient's min/max pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub min: String,
    pub max: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterControls {
    /// Selected restaurant; `None` is the "all restaurants" choice.
    pub restaurant: Option<String>,
    pub category: Option<String>,
    pub seal: SealMode,
    pub ranges: [RangeInput; 4],
}

impl FilterControls {
    pub fn range_input(&self, nutrient: Nutrient) -> &RangeInput {
        &self.ranges[nutrient.index()]
    }

    pub fn range_input_mut(&mut self, nutrient: Nutrient) -> &mut RangeInput {
        &mut self.ranges[nutrient.index()]
    }

    /// Translate the control values into the constraints for one query.
    ///
    /// Blank or unparsable bounds fall back to the open default so a
    /// half-typed number never hides the whole catalog.
    pub fn resolve_filter_state(&self) -> FilterState {
        let mut state = FilterState {
            restaurant: non_blank(self.restaurant.as_deref()),
            category: non_blank(self.category.as_deref()),
            seal: self.seal.clone(),
            ..FilterState::default()
        };
        let open = NumericRange::default();
        for nutrient in Nutrient::ALL {
            let input = self.range_input(nutrient);
            let range = NumericRange::new(
                parse_bound(&input.min, nutrient, "min").unwrap_or(open.min),
                parse_bound(&input.max, nutrient, "max").unwrap_or(open.max),
            );
            state.set_range(nutrient, range);
        }
        state
    }

    pub fn cycle_restaurant(&mut self, facets: &Facets, delta: isize) {
        self.restaurant = cycle_choice(self.restaurant.as_deref(), facets.restaurants(), delta);
    }

    pub fn cycle_category(&mut self, facets: &Facets, delta: isize) {
        self.category = cycle_choice(self.category.as_deref(), facets.categories(), delta);
    }

    /// Step through `Any`, `None`, then every known seal label.
    pub fn cycle_seal(&mut self, facets: &Facets, delta: isize) {
        let mut choices = vec![SealMode::Any, SealMode::None];
        choices.extend(facets.seals().iter().cloned().map(SealMode::Specific));
        let current = choices.iter().position(|c| *c == self.seal).unwrap_or(0);
        self.seal = choices[step(current, choices.len(), delta)].clone();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a seal selection: `any`, `none`, or a seal label.
pub fn parse_seal_mode(value: &str) -> SealMode {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
        SealMode::Any
    } else if trimmed.eq_ignore_ascii_case("none") {
        SealMode::None
    } else {
        SealMode::Specific(trimmed.to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_bound(text: &str, nutrient: Nutrient, which: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!(
                nutrient = nutrient.label(),
                bound = which,
                input = trimmed,
                "ignoring unparsable range bound"
            );
            None
        }
    }
}

fn cycle_choice(current: Option<&str>, values: &BTreeSet<String>, delta: isize) -> Option<String> {
    // Position 0 is the unset choice; facet values follow in order.
    let choices = values.iter().collect::<Vec<_>>();
    let position = current
        .and_then(|c| choices.iter().position(|v| v.as_str() == c))
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let next = step(position, choices.len() + 1, delta);
    if next == 0 {
        None
    } else {
        Some(choices[next - 1].clone())
    }
}

fn step(position: usize, len: usize, delta: isize) -> usize {
    let len = len as isize;
    (((position as isize + delta) % len + len) % len) as usize
}
