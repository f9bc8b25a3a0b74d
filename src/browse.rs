//! Interactive catalog browser.
//!
//! | Pane | Purpose |
//! |------|---------|
//! | Search | Text input with live name suggestions |
//! | Filters | Restaurant, category, seal and nutrient range controls |
//! | Results | Table of items matching the last query |
//! | Recommendations | Items the backend reports as similar to the first result |
//!
//! Every activation (Enter on a suggestion, row or card) re-enters the
//! query controller with that item's name.
mod app;
mod terminal;
mod ui;
mod worker;

use crate::query::QueryController;
use crate::recommend::RecommendationSource;
use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};
use std::sync::Arc;

const EVENT_POLL_MS: u64 = 100;

/// Keyboard focus; each pane handles its own keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Search,
    Filters,
    Results,
    Recommendations,
}

impl Focus {
    const ALL: [Focus; 4] = [
        Focus::Search,
        Focus::Filters,
        Focus::Results,
        Focus::Recommendations,
    ];

    fn index(self) -> usize {
        match self {
            Focus::Search => 0,
            Focus::Filters => 1,
            Focus::Results => 2,
            Focus::Recommendations => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Focus::Search => "Search",
            Focus::Filters => "Filters",
            Focus::Results => "Results",
            Focus::Recommendations => "Recommendations",
        }
    }
}

/// Run the browser. Requires an interactive terminal on stdin and stdout.
pub fn run(
    controller: QueryController,
    source: Arc<dyn RecommendationSource>,
    recommendation_limit: Option<usize>,
) -> Result<()> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        return Err(anyhow!(
            "browse needs an interactive terminal; use `mfind search` for scripted queries"
        ));
    }
    ui::run_tui(controller, source, recommendation_limit)
}
