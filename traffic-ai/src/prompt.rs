//! Prompt text and response schema for the two service calls.

use chrono::{DateTime, TimeZone};
use serde_json::{json, Value};
use std::fmt::Display;
use traffic_core::CongestionLevel;

/// Instruction for the structured assessment call.
pub fn assessment_prompt<Tz>(location: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rules: Vec<String> = CongestionLevel::ALL
        .iter()
        .rev()
        .map(|level| {
            format!(
                "- {}: roadColor {}, message \"{}\"",
                level.as_str(),
                level.road_color().as_str(),
                level.status_message()
            )
        })
        .collect();

    format!(
        "You are a smart traffic congestion analysis system.\n\
         Input Location: \"{location}\"\n\
         Current Date/Time: {now}\n\
         \n\
         Task:\n\
         1. Determine the approximate center latitude and longitude for \"{location}\".\n\
         2. Determine the current traffic congestion level based on typical patterns for this area and time.\n\
         3. Classify as: Low, Medium, or High.\n\
         Rules:\n\
         {rules}",
        now = now.format("%-m/%-d/%Y, %-I:%M:%S %p"),
        rules = rules.join("\n"),
    )
}

/// Instruction for the map-grounding call.
pub fn grounding_prompt(location: &str) -> String {
    format!(
        "Show the location of {location} on Google Maps and highlight traffic-heavy intersections or major routes nearby."
    )
}

/// Response schema the structured call is constrained to.
pub fn assessment_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "location": { "type": "STRING" },
            "lat": { "type": "NUMBER", "description": "Latitude of the location" },
            "lng": { "type": "NUMBER", "description": "Longitude of the location" },
            "congestionLevel": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
            "roadColor": { "type": "STRING", "enum": ["green", "orange", "red"] },
            "confidence": { "type": "STRING" },
            "message": { "type": "STRING" },
            "explanation": {
                "type": "STRING",
                "description": "Detailed reasoning considering time and patterns."
            }
        },
        "required": [
            "location",
            "lat",
            "lng",
            "congestionLevel",
            "roadColor",
            "confidence",
            "message",
            "explanation"
        ]
    })
}
