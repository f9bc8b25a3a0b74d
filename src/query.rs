//! Query controller: the single entry point for every search trigger.
//!
//! Typed search, suggestion picks, row activation and recommendation
//! activation all end in `run_query`, so the text field, the result
//! table and the recommendation panel always describe the same query.
//!
//! Recommendation lookups are not performed here. `run_query` returns a
//! `LookupRequest` tagged with a sequence number; the caller performs it
//! (inline or on a worker) and reports back through `complete_lookup`.
//! Only the most recently issued sequence number is accepted, so a slow
//! answer to an older query cannot overwrite a newer one.
use crate::catalog::{CatalogStore, Item};
use crate::controls::FilterControls;
use crate::filter::{filter_catalog, suggest};
use crate::recommend::{fetch_recommendations, Recommendation, RecommendationSource};
use anyhow::{anyhow, Result};

/// Default number of autocomplete entries offered per keystroke.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    /// Results are rendered; a recommendation lookup is outstanding.
    Querying,
}

/// Recommendation lookup issued by a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub name: String,
}

pub struct QueryController {
    catalog: CatalogStore,
    text: String,
    controls: FilterControls,
    results: Vec<Item>,
    suggestions: Vec<Item>,
    suggestion_limit: usize,
    recommendations: Vec<Recommendation>,
    recommendation_base: Option<String>,
    phase: QueryPhase,
    last_seq: u64,
    pending: Option<LookupRequest>,
}

impl QueryController {
    pub fn new(catalog: CatalogStore, suggestion_limit: usize) -> Result<Self> {
        if !catalog.is_loaded() {
            return Err(anyhow!("catalog must be loaded before queries can run"));
        }
        Ok(Self {
            catalog,
            text: String::new(),
            controls: FilterControls::default(),
            results: Vec::new(),
            suggestions: Vec::new(),
            suggestion_limit,
            recommendations: Vec::new(),
            recommendation_base: None,
            phase: QueryPhase::Idle,
            last_seq: 0,
            pending: None,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut FilterControls {
        &mut self.controls
    }

    pub fn results(&self) -> &[Item] {
        &self.results
    }

    pub fn suggestions(&self) -> &[Item] {
        &self.suggestions
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Name the recommendations on display were requested for. It only
    /// changes when a lookup completes or a query comes back empty.
    pub fn recommendation_base(&self) -> Option<&str> {
        self.recommendation_base.as_deref()
    }

    /// Name of the lookup still in flight, if any.
    pub fn pending_lookup(&self) -> Option<&str> {
        self.pending.as_ref().map(|request| request.name.as_str())
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    /// Keystroke path: update the text and the picklist without
    /// running a query.
    pub fn type_char(&mut self, ch: char) {
        self.text.push(ch);
        self.refresh_suggestions();
    }

    pub fn backspace(&mut self) {
        self.text.pop();
        self.refresh_suggestions();
    }

    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Explicit search action over the current text.
    pub fn search(&mut self) -> Option<LookupRequest> {
        let text = self.text.clone();
        self.run_query(&text)
    }

    pub fn select_suggestion(&mut self, index: usize) -> Option<LookupRequest> {
        let name = self.suggestions.get(index)?.name.clone();
        self.run_query(&name)
    }

    pub fn activate_row(&mut self, index: usize) -> Option<LookupRequest> {
        let name = self.results.get(index)?.name.clone();
        self.run_query(&name)
    }

    pub fn activate_recommendation(&mut self, index: usize) -> Option<LookupRequest> {
        let name = self.recommendations.get(index)?.name.clone();
        self.run_query(&name)
    }

    /// Set the text, filter the catalog with the current controls and
    /// issue a lookup for the first result's name.
    ///
    /// An empty result set clears the recommendation panel and
    /// invalidates any lookup still in flight.
    pub fn run_query(&mut self, text: &str) -> Option<LookupRequest> {
        self.text = text.to_string();
        self.suggestions.clear();
        let filters = self.controls.resolve_filter_state();
        self.results = filter_catalog(self.catalog.all(), text, &filters);
        self.last_seq += 1;
        tracing::debug!(
            text,
            seq = self.last_seq,
            results = self.results.len(),
            "query run"
        );

        let Some(first) = self.results.first() else {
            self.recommendations.clear();
            self.recommendation_base = None;
            self.pending = None;
            self.phase = QueryPhase::Idle;
            return None;
        };
        let request = LookupRequest {
            seq: self.last_seq,
            name: first.name.clone(),
        };
        self.pending = Some(request.clone());
        self.phase = QueryPhase::Querying;
        Some(request)
    }

    /// Accept the outcome of a lookup. Returns `false` and leaves the
    /// panel untouched when `seq` is not the latest issued lookup.
    pub fn complete_lookup(&mut self, seq: u64, recommendations: Vec<Recommendation>) -> bool {
        let request = match self.pending.take() {
            Some(request) if request.seq == seq => request,
            other => {
                self.pending = other;
                tracing::debug!(seq, latest = self.last_seq, "dropping stale recommendations");
                return false;
            }
        };
        self.recommendation_base = Some(request.name);
        self.recommendations = recommendations;
        self.phase = QueryPhase::Idle;
        true
    }

    /// Perform `request` inline against `source`.
    pub fn resolve_lookup(
        &mut self,
        request: Option<LookupRequest>,
        source: &dyn RecommendationSource,
    ) {
        if let Some(request) = request {
            let recommendations = fetch_recommendations(source, &request.name);
            self.complete_lookup(request.seq, recommendations);
        }
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = suggest(self.catalog.all(), &self.text, self.suggestion_limit)
            .into_iter()
            .cloned()
            .collect();
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
