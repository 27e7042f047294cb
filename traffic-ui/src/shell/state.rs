// UI-local state for one screen. Replaced wholesale by each finished query.

use serde::Serialize;
use tracing::{debug, warn};
use traffic_core::QueryResult;

pub const QUERY_FAILED_BANNER: &str =
    "Failed to analyze traffic. Please check your API connection.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub loading: bool,
    pub result: Option<QueryResult>,
    pub error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_query(&mut self) {
        debug!("query started");
        self.loading = true;
        self.error = None;
    }

    // Last query to finish wins; there is no ordering guard.
    pub fn finish_query(&mut self, result: QueryResult) {
        debug!(location = %result.assessment.location, "query finished");
        self.result = Some(result);
        self.loading = false;
    }

    pub fn fail_query(&mut self) {
        warn!("query failed, showing error banner");
        self.error = Some(QUERY_FAILED_BANNER.to_string());
        self.loading = false;
    }

    /// Nothing searched yet.
    pub fn is_idle(&self) -> bool {
        !self.loading && self.result.is_none() && self.error.is_none()
    }

    /// Result panels are only shown when not loading.
    pub fn visible_result(&self) -> Option<&QueryResult> {
        if self.loading {
            None
        } else {
            self.result.as_ref()
        }
    }
}
