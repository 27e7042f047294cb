//! Traffic-query adapter: location text in, `QueryResult` out, never an error.

use chrono::Local;
use traffic_core::{MapReference, QueryResult, TrafficAssessment};

use crate::config::AiConfig;
use crate::prompt::{assessment_prompt, assessment_schema, grounding_prompt};
use crate::service::{GeminiService, TrafficService};
use crate::{AiAssessmentV1, AiError};

pub struct TrafficAdapter<S = GeminiService> {
    config: AiConfig,
    service: S,
}

impl TrafficAdapter<GeminiService> {
    /// Adapter backed by the live HTTP service.
    pub fn from_config(config: AiConfig) -> Self {
        let service = GeminiService::new(&config);
        Self { config, service }
    }
}

impl<S: TrafficService> TrafficAdapter<S> {
    pub fn new(config: AiConfig, service: S) -> Self {
        Self { config, service }
    }

    /// Assess traffic at `location`.
    ///
    /// Without a credential this returns the canned Low/green assessment and
    /// makes no service call. Any failure of either service call yields the
    /// Medium/orange fallback with the error text in `explanation`. In both
    /// degraded cases `references` is empty.
    pub async fn query(&self, location: &str) -> QueryResult {
        if !self.config.has_credential() {
            tracing::warn!(location = %location, "API key missing, returning mock traffic data");
            return QueryResult::unreferenced(TrafficAssessment::missing_credential(location));
        }

        match self.live_query(location).await {
            Ok(result) => {
                tracing::info!(
                    location = %location,
                    level = result.assessment.congestion_level.as_str(),
                    references = result.references.len(),
                    "traffic assessment received"
                );
                if !result.assessment.follows_status_mapping() {
                    tracing::debug!(
                        level = result.assessment.congestion_level.as_str(),
                        road_color = result.assessment.road_color.as_str(),
                        message = %result.assessment.message,
                        "assessment does not follow the level/color/message mapping"
                    );
                }
                result
            }
            Err(err) => {
                tracing::error!(location = %location, error = %err, "AI service error");
                QueryResult::unreferenced(TrafficAssessment::fetch_failure(
                    location,
                    err.to_string(),
                ))
            }
        }
    }

    // Structured call first, then grounding. The order is incidental.
    async fn live_query(&self, location: &str) -> Result<QueryResult, AiError> {
        let prompt = assessment_prompt(location, &Local::now());
        let text = self
            .service
            .structured_assessment(&prompt, &assessment_schema())
            .await?;
        let assessment: TrafficAssessment = AiAssessmentV1::parse(&text)?.into();

        let chunks = self
            .service
            .grounding_chunks(&grounding_prompt(location))
            .await?;
        let total = chunks.len();
        let references: Vec<MapReference> = chunks
            .into_iter()
            .filter_map(|c| c.into_reference())
            .collect();
        tracing::debug!(
            chunks = total,
            kept = references.len(),
            "grounding chunks filtered to map references"
        );

        Ok(QueryResult::new(assessment, references))
    }
}
