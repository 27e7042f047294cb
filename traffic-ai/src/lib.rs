// This defines the JSON format that we accept from the AI model
// Parse and validate it
// Convert the stuff here to what the rest of the app can understand

use serde::{Deserialize, Serialize};
use thiserror::Error;
use traffic_core::{CongestionLevel, RoadColor, TrafficAssessment};

pub mod adapter;
pub mod config;
pub mod prompt;
pub mod service;
pub mod wire;

pub use adapter::TrafficAdapter;
pub use config::AiConfig;
pub use service::{GeminiService, TrafficService};
pub use wire::{GroundingChunk, MapsSource};

/// Assessment object the model must return for the structured call.
/// Unknown fields and out-of-enum values are schema violations.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AiAssessmentV1 {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub congestion_level: CongestionLevel,
    pub road_color: RoadColor,
    pub confidence: String,
    pub message: String,
    pub explanation: String,
}

impl AiAssessmentV1 {
    /// Parse the raw completion text.
    pub fn parse(text: &str) -> Result<Self, AiError> {
        serde_json::from_str(text.trim()).map_err(AiError::InvalidAssessment)
    }
}

impl From<AiAssessmentV1> for TrafficAssessment {
    fn from(ai: AiAssessmentV1) -> Self {
        Self {
            location: ai.location,
            lat: ai.lat,
            lng: ai.lng,
            congestion_level: ai.congestion_level,
            road_color: ai.road_color,
            confidence: ai.confidence,
            message: ai.message,
            explanation: ai.explanation,
        }
    }
}

/// Everything that can go wrong talking to the AI service.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("service returned no completion text")]
    EmptyResponse,

    #[error("invalid assessment json: {0}")]
    InvalidAssessment(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{
        "location": "Manhattan, NY",
        "lat": 40.7831,
        "lng": -73.9712,
        "congestionLevel": "High",
        "roadColor": "red",
        "confidence": "High",
        "message": "High Congestion",
        "explanation": "Weekday 6pm, bridges and tunnels backed up."
    }"#;

    #[test]
    fn test_parse_valid_assessment() {
        let ai = AiAssessmentV1::parse(GOOD).unwrap();
        let a: TrafficAssessment = ai.into();
        assert_eq!(a.location, "Manhattan, NY");
        assert_eq!(a.congestion_level, CongestionLevel::High);
        assert_eq!(a.road_color, RoadColor::Red);
        assert!((a.lng + 73.9712).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_enum_value_rejected() {
        let bad = GOOD.replace("\"red\"", "\"purple\"");
        assert!(matches!(
            AiAssessmentV1::parse(&bad),
            Err(AiError::InvalidAssessment(_))
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        let bad = GOOD.replace("\"lat\": 40.7831,", "");
        assert!(AiAssessmentV1::parse(&bad).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let bad = GOOD.replace("\"lat\"", "\"speedKmh\": 12, \"lat\"");
        assert!(AiAssessmentV1::parse(&bad).is_err());
    }

    #[test]
    fn test_mapping_is_not_enforced_after_parse() {
        let odd = GOOD.replace("\"High Congestion\"", "\"Smooth Traffic\"");
        let a: TrafficAssessment = AiAssessmentV1::parse(&odd).unwrap().into();
        assert!(!a.follows_status_mapping());
    }

    #[test]
    fn test_not_json_rejected() {
        let err = AiAssessmentV1::parse("Sorry, I can't help with that.").unwrap_err();
        assert!(err.to_string().starts_with("invalid assessment json"));
    }
}
