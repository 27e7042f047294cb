// Search form handler: validates input, runs the adapter, writes the outcome into AppState.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, info_span, Instrument};
use traffic_ai::{GeminiService, TrafficAdapter, TrafficService};
use uuid::Uuid;

use super::state::AppState;

pub struct SearchController<S = GeminiService> {
    adapter: Arc<TrafficAdapter<S>>,
    state: Arc<Mutex<AppState>>,
}

impl<S> Clone for SearchController<S> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> SearchController<S>
where
    S: TrafficService + 'static,
{
    pub fn new(adapter: TrafficAdapter<S>) -> Self {
        Self {
            adapter: Arc::new(adapter),
            state: Arc::new(Mutex::new(AppState::new())),
        }
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> AppState {
        self.lock_state().clone()
    }

    /// Run one search. Blank input is ignored and returns `false`.
    ///
    /// Overlapping submits are not cancelled; whichever finishes last is shown.
    pub async fn submit(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }

        let query_id = Uuid::new_v4();
        let span = info_span!("search", %query_id);
        let location = query.to_string();

        self.lock_state().begin_query();
        info!(parent: &span, location = %location, "submitting traffic query");

        let adapter = Arc::clone(&self.adapter);
        let task = tokio::spawn(async move { adapter.query(&location).await }.instrument(span.clone()));

        // The adapter never fails; a join error means the task itself blew up.
        match task.await {
            Ok(result) => self.lock_state().finish_query(result),
            Err(err) => {
                tracing::error!(parent: &span, error = %err, "traffic query task failed");
                self.lock_state().fail_query();
            }
        }
        true
    }

    // A poisoned lock only means a panic mid-update; the state is still usable.
    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
