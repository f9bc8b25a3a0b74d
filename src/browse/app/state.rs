//! Application state and query triggers for the browser.

use super::super::worker::LookupWorker;
use super::super::Focus;
use super::{App, FilterField, FILTER_FIELDS};
use crate::query::{LookupRequest, QueryController};
use crate::render::{render_cards, render_suggestions, TableView};

impl App {
    pub(in crate::browse) fn new(
        controller: QueryController,
        worker: LookupWorker,
        recommendation_limit: Option<usize>,
    ) -> Self {
        let mut app = Self {
            controller,
            worker,
            recommendation_limit,
            focus: Focus::Search,
            selection: [0; 4],
            suggestion_cursor: None,
            table: TableView::default(),
            suggestions: Vec::new(),
            cards: Vec::new(),
            message: None,
            show_help: false,
        };
        // Start with the whole catalog on screen.
        let request = app.controller.search();
        app.apply(request);
        app
    }

    pub(in crate::browse) fn focus(&self) -> Focus {
        self.focus
    }

    pub(in crate::browse) fn next_focus(&mut self) {
        let idx = (self.focus.index() + 1) % Focus::ALL.len();
        self.focus = Focus::ALL[idx];
        self.close_suggestions();
    }

    pub(in crate::browse) fn prev_focus(&mut self) {
        let idx = if self.focus.index() == 0 {
            Focus::ALL.len() - 1
        } else {
            self.focus.index() - 1
        };
        self.focus = Focus::ALL[idx];
        self.close_suggestions();
    }

    pub(in crate::browse) fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub(in crate::browse) fn is_help_shown(&self) -> bool {
        self.show_help
    }

    pub(in crate::browse) fn move_selection(&mut self, delta: isize) {
        if self.focus == Focus::Search {
            self.move_suggestion_cursor(delta);
            return;
        }
        let idx = self.focus.index();
        let max = self.pane_len(self.focus);
        if max == 0 {
            self.selection[idx] = 0;
            return;
        }
        let next = self.selection[idx] as isize + delta;
        self.selection[idx] = next.clamp(0, max as isize - 1) as usize;
    }

    /// Close the picklist. Returns `false` when none was open.
    pub(in crate::browse) fn close_suggestions(&mut self) -> bool {
        let was_open = !self.suggestions.is_empty();
        self.controller.dismiss_suggestions();
        self.suggestions.clear();
        self.suggestion_cursor = None;
        was_open
    }

    /// Enter in any pane: pick the suggestion under the cursor, the
    /// highlighted row or card, or run the typed search.
    pub(in crate::browse) fn activate(&mut self) {
        let selected = self.selection[self.focus.index()];
        let request = match (self.focus, self.suggestion_cursor) {
            (Focus::Search, Some(cursor)) => self.controller.select_suggestion(cursor),
            (Focus::Search | Focus::Filters, _) => self.controller.search(),
            (Focus::Results, _) => {
                if self.table.rows().is_empty() {
                    return;
                }
                self.controller.activate_row(selected)
            }
            (Focus::Recommendations, _) => {
                if self.cards.is_empty() {
                    return;
                }
                self.controller.activate_recommendation(selected)
            }
        };
        self.apply(request);
    }

    /// Typed character, routed by focus.
    pub(in crate::browse) fn input(&mut self, ch: char) {
        match self.focus {
            Focus::Search => {
                self.controller.type_char(ch);
                self.refresh_suggestions();
            }
            Focus::Filters => self.edit_filter(Some(ch)),
            Focus::Results | Focus::Recommendations => {}
        }
    }

    pub(in crate::browse) fn backspace(&mut self) {
        match self.focus {
            Focus::Search => {
                self.controller.backspace();
                self.refresh_suggestions();
            }
            Focus::Filters => self.edit_filter(None),
            Focus::Results | Focus::Recommendations => {}
        }
    }

    /// Left/Right on a facet control cycles its value.
    pub(in crate::browse) fn cycle_filter(&mut self, delta: isize) {
        if self.focus != Focus::Filters {
            return;
        }
        let field = self.selected_filter();
        let facets = self.controller.catalog().facets().clone();
        let controls = self.controller.controls_mut();
        match field {
            FilterField::Restaurant => controls.cycle_restaurant(&facets, delta),
            FilterField::Category => controls.cycle_category(&facets, delta),
            FilterField::Seal => controls.cycle_seal(&facets, delta),
            FilterField::Min(_) | FilterField::Max(_) => {}
        }
    }

    pub(in crate::browse) fn reset_filters(&mut self) {
        self.controller.controls_mut().reset();
        self.set_message("filters reset; press Enter to search".to_string());
    }

    /// Apply lookup outcomes that arrived since the last tick.
    pub(in crate::browse) fn poll_lookups(&mut self) {
        for outcome in self.worker.drain() {
            if self
                .controller
                .complete_lookup(outcome.seq, outcome.recommendations)
            {
                self.render_cards();
            }
        }
    }

    pub(in crate::browse) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(super) fn selected_filter(&self) -> FilterField {
        FILTER_FIELDS[self.selection[Focus::Filters.index()].min(FILTER_FIELDS.len() - 1)]
    }

    pub(super) fn controller(&self) -> &QueryController {
        &self.controller
    }

    fn edit_filter(&mut self, ch: Option<char>) {
        let field = self.selected_filter();
        let controls = self.controller.controls_mut();
        let text = match field {
            FilterField::Min(nutrient) => &mut controls.range_input_mut(nutrient).min,
            FilterField::Max(nutrient) => &mut controls.range_input_mut(nutrient).max,
            FilterField::Restaurant | FilterField::Category | FilterField::Seal => return,
        };
        match ch {
            Some(ch) if ch.is_ascii_digit() || ch == '.' || ch == '-' => text.push(ch),
            Some(_) => {}
            None => {
                text.pop();
            }
        }
    }

    /// Re-render every view from controller state, then hand the lookup
    /// (if any) to the worker.
    fn apply(&mut self, request: Option<LookupRequest>) {
        self.table.render(self.controller.results());
        self.suggestions.clear();
        self.suggestion_cursor = None;
        self.render_cards();
        self.selection[Focus::Results.index()] = 0;
        self.message = None;
        if let Some(request) = request {
            self.worker.dispatch(request);
        }
    }

    fn render_cards(&mut self) {
        self.cards = render_cards(
            self.controller.recommendations(),
            self.recommendation_limit,
        );
        self.selection[Focus::Recommendations.index()] = 0;
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = render_suggestions(self.controller.suggestions());
        self.suggestion_cursor = None;
    }

    /// Down enters the picklist at its top; Up from the top leaves it.
    fn move_suggestion_cursor(&mut self, delta: isize) {
        let len = self.suggestions.len() as isize;
        if len == 0 {
            self.suggestion_cursor = None;
            return;
        }
        let next = match self.suggestion_cursor {
            Some(cursor) => cursor as isize + delta,
            None if delta > 0 => delta - 1,
            None => return,
        };
        self.suggestion_cursor = if next < 0 {
            None
        } else {
            Some(next.min(len - 1) as usize)
        };
    }

    fn pane_len(&self, focus: Focus) -> usize {
        match focus {
            Focus::Search => 0,
            Focus::Filters => FILTER_FIELDS.len(),
            Focus::Results => self.table.rows().len(),
            Focus::Recommendations => self.cards.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{caesar_salad, item};
    use crate::catalog::{CatalogStore, Nutrient};
    use crate::filter::SealMode;
    use crate::recommend::{RecommendationResponse, RecommendationSource};
    use anyhow::Result;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    struct FixedSource;

    impl RecommendationSource for FixedSource {
        fn lookup(&self, name: &str) -> Result<RecommendationResponse> {
            Ok(RecommendationResponse {
                base_item: name.to_string(),
                recommendations: vec![item("Cobb Salad", "B", "Salad")],
            })
        }
    }

    fn app() -> App {
        let mut soda = item("Soda", "B", "Drinks");
        soda.seals = vec!["High sugars".to_string()];
        let catalog = CatalogStore::from_items(vec![
            caesar_salad(),
            soda,
            item("Cobb Salad", "B", "Salad"),
        ]);
        let controller = QueryController::new(catalog, 5).expect("controller");
        App::new(controller, LookupWorker::new(Arc::new(FixedSource)), None)
    }

    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.cards.is_empty() && Instant::now() < deadline {
            app.poll_lookups();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn starts_with_full_catalog() {
        let mut app = app();
        assert_eq!(app.table.rows().len(), 3);
        settle(&mut app);
        assert_eq!(app.cards[0].name, "Cobb Salad");
        assert_eq!(app.controller().recommendation_base(), Some("Caesar Salad"));
    }

    #[test]
    fn enter_searches_typed_text_while_suggestions_show() {
        let mut app = app();
        for ch in "sal".chars() {
            app.input(ch);
        }
        assert_eq!(app.suggestions.len(), 2);
        app.activate();
        assert_eq!(app.controller().text(), "sal");
        assert!(app.suggestions.is_empty());
        let names = app
            .controller()
            .results()
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Caesar Salad", "Cobb Salad"]);
    }

    #[test]
    fn moving_into_picklist_then_enter_picks_suggestion() {
        let mut app = app();
        for ch in "sal".chars() {
            app.input(ch);
        }
        app.move_selection(1);
        app.move_selection(1);
        app.move_selection(1);
        assert_eq!(app.suggestion_cursor, Some(1));
        app.move_selection(-1);
        app.move_selection(-1);
        assert_eq!(app.suggestion_cursor, None);

        app.move_selection(1);
        app.activate();
        assert_eq!(app.controller().text(), "Caesar Salad");
        assert!(app.suggestions.is_empty());
        assert_eq!(app.table.rows().len(), 1);
    }

    #[test]
    fn closing_suggestions_keeps_typed_text() {
        let mut app = app();
        assert!(!app.close_suggestions());
        for ch in "cobb".chars() {
            app.input(ch);
        }
        app.move_selection(1);
        assert!(app.close_suggestions());
        assert!(app.suggestions.is_empty());
        assert_eq!(app.suggestion_cursor, None);
        assert_eq!(app.controller().text(), "cobb");
        assert!(!app.close_suggestions());
    }

    #[test]
    fn filter_pane_edits_controls() {
        let mut app = app();
        app.next_focus();
        assert_eq!(app.focus(), Focus::Filters);

        app.move_selection(2);
        assert_eq!(app.selected_filter(), FilterField::Seal);
        app.cycle_filter(1);
        assert_eq!(app.controller().controls().seal, SealMode::None);

        app.move_selection(2);
        assert_eq!(app.selected_filter(), FilterField::Max(Nutrient::Calories));
        for ch in "25x0".chars() {
            app.input(ch);
        }
        app.backspace();
        assert_eq!(
            app.controller().controls().range_input(Nutrient::Calories).max,
            "25"
        );

        app.activate();
        assert!(app.table.rows().is_empty());

        app.reset_filters();
        app.activate();
        assert_eq!(app.table.rows().len(), 3);
    }

    #[test]
    fn row_and_card_activation_requery() {
        let mut app = app();
        settle(&mut app);
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus(), Focus::Results);
        app.move_selection(1);
        app.activate();
        assert_eq!(app.controller().text(), "Soda");

        app.next_focus();
        settle(&mut app);
        app.activate();
        assert_eq!(app.controller().text(), "Cobb Salad");
        assert_eq!(app.table.rows().len(), 1);
    }
}
