//! Background recommendation lookups.
//!
//! Each lookup runs on its own thread so the event loop keeps handling
//! keys while the backend answers. Outcomes come back over a channel and
//! are applied on the event-loop thread; the controller discards any
//! outcome whose sequence number is no longer current. In-flight lookups
//! are never cancelled.
use crate::query::LookupRequest;
use crate::recommend::{fetch_recommendations, Recommendation, RecommendationSource};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub(super) struct LookupOutcome {
    pub(super) seq: u64,
    pub(super) recommendations: Vec<Recommendation>,
}

pub(super) struct LookupWorker {
    source: Arc<dyn RecommendationSource>,
    tx: Sender<LookupOutcome>,
    rx: Receiver<LookupOutcome>,
}

impl LookupWorker {
    pub(super) fn new(source: Arc<dyn RecommendationSource>) -> Self {
        let (tx, rx) = channel();
        Self { source, tx, rx }
    }

    pub(super) fn dispatch(&self, request: LookupRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let recommendations = fetch_recommendations(source.as_ref(), &request.name);
            // The receiver is gone once the UI has exited.
            let _ = tx.send(LookupOutcome {
                seq: request.seq,
                recommendations,
            });
        });
    }

    /// Outcomes that have arrived since the last call, oldest first.
    pub(super) fn drain(&self) -> Vec<LookupOutcome> {
        self.rx.try_iter().collect()
    }
}
