//! Recommendation client for the backend's `/recomendar` endpoint.
//!
//! The client does I/O only. Similarity is computed by the backend and
//! treated as opaque here.
//!
//! # Failure handling
//!
//! `RecommendationSource::lookup` reports errors, but the query flow only
//! goes through `fetch_recommendations`, which logs the failure and
//! resolves to an empty list. No retry and no request timeout are
//! configured; a hung backend leaves the lookup pending.
use crate::catalog::Item;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A catalog-shaped item returned as similar to a queried one.
pub type Recommendation = Item;

/// Body of `GET /recomendar?nombre=<name>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(rename = "plato_base")]
    pub base_item: String,
    #[serde(rename = "recomendaciones", default)]
    pub recommendations: Vec<Recommendation>,
}

/// Anything that can answer "what is similar to this item name".
pub trait RecommendationSource: Send + Sync {
    fn lookup(&self, name: &str) -> Result<RecommendationResponse>;
}

/// Blocking HTTP client bound to one backend base URL.
pub struct HttpRecommendationClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpRecommendationClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/recomendar", self.base_url)
    }
}

impl RecommendationSource for HttpRecommendationClient {
    fn lookup(&self, name: &str) -> Result<RecommendationResponse> {
        let url = self.endpoint();
        let start = std::time::Instant::now();
        let mut response = self
            .agent
            .get(&url)
            .query("nombre", name)
            .call()
            .with_context(|| format!("request recommendations for {name:?} from {url}"))?;
        let body: RecommendationResponse = response
            .body_mut()
            .read_json()
            .with_context(|| format!("parse recommendations for {name:?}"))?;
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis(),
            base = %body.base_item,
            count = body.recommendations.len(),
            "recommendations received"
        );
        Ok(body)
    }
}

/// Look up recommendations for `name`, degrading any failure to an
/// empty list.
pub fn fetch_recommendations(source: &dyn RecommendationSource, name: &str) -> Vec<Recommendation> {
    match source.lookup(name) {
        Ok(response) => response.recommendations,
        Err(err) => {
            tracing::warn!(
                item = name,
                error = %format!("{err:#}"),
                "recommendation lookup failed"
            );
            Vec::new()
        }
    }
}
