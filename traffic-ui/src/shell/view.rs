// View models for the map, status card and references panel.

use serde::Serialize;
use tracing::{debug, trace};
use traffic_core::{MapReference, QueryResult, RoadColor, TrafficAssessment};

use super::state::AppState;

pub const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);
pub const DEFAULT_ZOOM: u8 = 2;
pub const FOCUSED_ZOOM: u8 = 15;

pub const NO_REFERENCES_PLACEHOLDER: &str = "No grounding sources available.";

/// Hex color for overlays of the given road color.
pub fn overlay_hex(color: RoadColor) -> &'static str {
    match color {
        RoadColor::Red => "#ef4444",
        RoadColor::Orange => "#f97316",
        RoadColor::Green => "#10b981",
    }
}

/// Map center and zoom. Keeps its position between queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapViewport {
    /// Recenter on the assessment. A zero latitude or longitude leaves the view alone,
    /// which is what the mock and fallback assessments carry.
    pub fn follow(&mut self, assessment: &TrafficAssessment) -> bool {
        if assessment.lat == 0.0 || assessment.lng == 0.0 {
            trace!("assessment has no usable coordinates, keeping viewport");
            return false;
        }
        self.center = (assessment.lat, assessment.lng);
        self.zoom = FOCUSED_ZOOM;
        debug!(lat = assessment.lat, lng = assessment.lng, "viewport recentered");
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleOverlay {
    pub center: (f64, f64),
    pub radius_m: f64,
    pub color: &'static str,
    pub fill_opacity: f32,
    /// `None` means no outline.
    pub stroke_weight: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: (f64, f64),
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub viewport: MapViewport,
    pub status_badge: &'static str,
    pub overlays: Vec<CircleOverlay>,
    pub marker: Option<Marker>,
}

impl MapView {
    pub fn build(state: &AppState, viewport: MapViewport) -> Self {
        let status_badge = if state.loading {
            "Processing..."
        } else {
            "Live System Active"
        };

        let mut view = Self {
            viewport,
            status_badge,
            overlays: Vec::new(),
            marker: None,
        };

        if let Some(result) = state.visible_result() {
            let color = overlay_hex(result.assessment.road_color);
            let center = viewport.center;
            view.overlays = vec![
                CircleOverlay {
                    center,
                    radius_m: 800.0,
                    color,
                    fill_opacity: 0.2,
                    stroke_weight: Some(2.0),
                },
                CircleOverlay {
                    center,
                    radius_m: 150.0,
                    color,
                    fill_opacity: 0.4,
                    stroke_weight: None,
                },
            ];
            view.marker = Some(Marker {
                position: center,
                popup: result.assessment.message.clone(),
            });
        }

        view
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    pub headline: String,
    pub location: String,
    pub confidence: String,
    pub tone: RoadColor,
}

impl StatusCard {
    pub fn from_assessment(assessment: &TrafficAssessment) -> Self {
        Self {
            headline: assessment.message.clone(),
            location: assessment.location.clone(),
            confidence: assessment.confidence.clone(),
            tone: assessment.road_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencesPanel {
    pub references: Vec<MapReference>,
}

impl ReferencesPanel {
    pub fn from_result(result: &QueryResult) -> Self {
        Self {
            references: result.references.clone(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.references
            .is_empty()
            .then_some(NO_REFERENCES_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traffic_core::CongestionLevel;

    fn shibuya() -> TrafficAssessment {
        TrafficAssessment {
            location: "Shibuya".into(),
            lat: 35.6595,
            lng: 139.7005,
            congestion_level: CongestionLevel::High,
            road_color: RoadColor::Red,
            confidence: "High".into(),
            message: "High Congestion".into(),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_viewport_follows_real_coordinates() {
        let mut vp = MapViewport::default();
        assert!(vp.follow(&shibuya()));
        assert_eq!(vp.center, (35.6595, 139.7005));
        assert_eq!(vp.zoom, FOCUSED_ZOOM);

        // mock result at (0, 0) keeps the last view
        assert!(!vp.follow(&TrafficAssessment::missing_credential("x")));
        assert_eq!(vp.center, (35.6595, 139.7005));
    }

    #[test]
    fn test_viewport_ignores_zero_longitude() {
        let mut vp = MapViewport::default();
        let mut a = shibuya();
        a.lng = 0.0;
        assert!(!vp.follow(&a));
        assert_eq!(vp, MapViewport::default());
    }

    #[test]
    fn test_map_overlays_only_with_visible_result() {
        let mut state = AppState::new();
        let view = MapView::build(&state, MapViewport::default());
        assert!(view.overlays.is_empty());
        assert_eq!(view.status_badge, "Live System Active");

        state.finish_query(QueryResult::unreferenced(shibuya()));
        let mut vp = MapViewport::default();
        vp.follow(&shibuya());
        let view = MapView::build(&state, vp);
        assert_eq!(view.overlays.len(), 2);
        assert_eq!(view.overlays[0].color, "#ef4444");
        assert_eq!(view.overlays[0].radius_m, 800.0);
        assert_eq!(view.overlays[1].stroke_weight, None);
        assert_eq!(view.marker.unwrap().popup, "High Congestion");

        state.begin_query();
        let view = MapView::build(&state, vp);
        assert!(view.overlays.is_empty());
        assert_eq!(view.status_badge, "Processing...");
    }

    #[test]
    fn test_references_placeholder() {
        let panel = ReferencesPanel::from_result(&QueryResult::unreferenced(shibuya()));
        assert_eq!(panel.placeholder(), Some(NO_REFERENCES_PLACEHOLDER));
    }
}
