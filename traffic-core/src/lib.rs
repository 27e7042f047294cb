//! traffic-core: the records that flow between the traffic-query adapter and the UI.
//!
//! Design rules:
//! - Every record is created fresh per query and replaced by the next one.
//! - The level -> color/message mapping is fixed, but parsed assessments are
//!   never rejected for breaking it; callers may check with `follows_status_mapping`.
//! - JSON field names match the service schema (camelCase).

use serde::{Deserialize, Serialize};

pub mod assessment;

pub use assessment::{FETCH_FAILURE_MESSAGE, MISSING_CREDENTIAL_EXPLANATION};

/// Coarse traffic-severity classification returned by the AI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub const ALL: [CongestionLevel; 3] = [
        CongestionLevel::Low,
        CongestionLevel::Medium,
        CongestionLevel::High,
    ];

    /// Road color the map overlay uses for this level.
    pub fn road_color(self) -> RoadColor {
        match self {
            CongestionLevel::Low => RoadColor::Green,
            CongestionLevel::Medium => RoadColor::Orange,
            CongestionLevel::High => RoadColor::Red,
        }
    }

    /// Headline shown on the status card.
    pub fn status_message(self) -> &'static str {
        match self {
            CongestionLevel::Low => "Smooth Traffic",
            CongestionLevel::Medium => "Moderate Traffic",
            CongestionLevel::High => "High Congestion",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::Low => "Low",
            CongestionLevel::Medium => "Medium",
            CongestionLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadColor {
    Green,
    Orange,
    Red,
}

impl RoadColor {
    pub fn as_str(self) -> &'static str {
        match self {
            RoadColor::Green => "green",
            RoadColor::Orange => "orange",
            RoadColor::Red => "red",
        }
    }
}

/// Structured traffic estimate for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficAssessment {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub congestion_level: CongestionLevel,
    pub road_color: RoadColor,
    /// Free text from the service ("High", "Medium", "85%", ...).
    pub confidence: String,
    pub message: String,
    pub explanation: String,
}

impl TrafficAssessment {
    /// True when level, color and message are one of the three fixed combinations.
    pub fn follows_status_mapping(&self) -> bool {
        self.road_color == self.congestion_level.road_color()
            && self.message == self.congestion_level.status_message()
    }
}

/// A map link the service returned to back up its location claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapReference {
    pub uri: String,
    pub title: String,
}

/// The adapter's only return value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub assessment: TrafficAssessment,
    /// Service order is kept as-is.
    pub references: Vec<MapReference>,
}

impl QueryResult {
    pub fn new(assessment: TrafficAssessment, references: Vec<MapReference>) -> Self {
        Self {
            assessment,
            references,
        }
    }

    /// A result with no supporting references (mock and fallback paths).
    pub fn unreferenced(assessment: TrafficAssessment) -> Self {
        Self::new(assessment, Vec::new())
    }
}
