mod state;
mod view;

use super::worker::LookupWorker;
use super::Focus;
use crate::catalog::Nutrient;
use crate::query::QueryController;
use crate::render::{RecommendationCard, SuggestionEntry, TableView};

/// One editable control in the filter pane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FilterField {
    Restaurant,
    Category,
    Seal,
    Min(Nutrient),
    Max(Nutrient),
}

const FILTER_FIELDS: [FilterField; 11] = [
    FilterField::Restaurant,
    FilterField::Category,
    FilterField::Seal,
    FilterField::Min(Nutrient::Calories),
    FilterField::Max(Nutrient::Calories),
    FilterField::Min(Nutrient::Protein),
    FilterField::Max(Nutrient::Protein),
    FilterField::Min(Nutrient::Fat),
    FilterField::Max(Nutrient::Fat),
    FilterField::Min(Nutrient::Carbs),
    FilterField::Max(Nutrient::Carbs),
];

pub(super) struct App {
    controller: QueryController,
    worker: LookupWorker,
    recommendation_limit: Option<usize>,
    focus: Focus,
    /// Highlighted entry per pane, indexed by `Focus::index`. The search
    /// pane uses `suggestion_cursor` instead.
    selection: [usize; 4],
    /// Picklist entry the user moved onto; `None` until Up/Down is pressed,
    /// so Enter searches the typed text.
    suggestion_cursor: Option<usize>,
    table: TableView,
    suggestions: Vec<SuggestionEntry>,
    cards: Vec<RecommendationCard>,
    message: Option<String>,
    show_help: bool,
}
