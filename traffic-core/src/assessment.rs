//! Canned assessments for the two degraded paths of a query.
//!
//! - missing credential: deterministic, offline-safe, not an error
//! - fetch failure: the live call failed, the error text is carried along

use crate::{CongestionLevel, RoadColor, TrafficAssessment};

pub const MISSING_CREDENTIAL_EXPLANATION: &str = "Mock data because API key is missing";

pub const FETCH_FAILURE_MESSAGE: &str = "Could not fetch real traffic data";

impl TrafficAssessment {
    /// Assessment used when no service credential is configured.
    pub fn missing_credential(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            lat: 0.0,
            lng: 0.0,
            congestion_level: CongestionLevel::Low,
            road_color: RoadColor::Green,
            confidence: "High".into(),
            message: CongestionLevel::Low.status_message().into(),
            explanation: MISSING_CREDENTIAL_EXPLANATION.into(),
        }
    }

    /// Assessment used when either service call failed.
    pub fn fetch_failure(location: impl Into<String>, error_text: impl AsRef<str>) -> Self {
        Self {
            location: location.into(),
            lat: 0.0,
            lng: 0.0,
            congestion_level: CongestionLevel::Medium,
            road_color: RoadColor::Orange,
            confidence: "Medium".into(),
            message: FETCH_FAILURE_MESSAGE.into(),
            explanation: format!("Error: {}", error_text.as_ref()),
        }
    }

    /// True for either canned assessment.
    pub fn is_degraded(&self) -> bool {
        self.explanation == MISSING_CREDENTIAL_EXPLANATION || self.message == FETCH_FAILURE_MESSAGE
    }
}
