// Plain-text rendering of the current screen.

use std::fmt::Write;

use super::state::AppState;
use super::view::{MapView, MapViewport, ReferencesPanel, StatusCard};

pub const IDLE_TITLE: &str = "Ready for Analysis";
pub const IDLE_HINT: &str = "Enter any location to get AI-powered traffic insights.";

pub fn render_screen(state: &AppState, viewport: MapViewport) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_screen(&mut out, state, viewport);
    out
}

fn write_screen(out: &mut String, state: &AppState, viewport: MapViewport) -> std::fmt::Result {
    let map = MapView::build(state, viewport);

    writeln!(out, "== Traffic Insight ==  [{}]", map.status_badge)?;
    writeln!(
        out,
        "map: center ({:.4}, {:.4}) zoom {}",
        map.viewport.center.0, map.viewport.center.1, map.viewport.zoom
    )?;
    if let Some(outer) = map.overlays.first() {
        writeln!(
            out,
            "overlay: {} within {:.0} m",
            outer.color, outer.radius_m
        )?;
    }

    if let Some(error) = &state.error {
        writeln!(out)?;
        writeln!(out, "! {error}")?;
    }

    if state.loading {
        writeln!(out)?;
        writeln!(out, "Scanning Grid...")?;
        return Ok(());
    }

    let Some(result) = state.visible_result() else {
        if state.error.is_none() {
            writeln!(out)?;
            writeln!(out, "{IDLE_TITLE}")?;
            writeln!(out, "{IDLE_HINT}")?;
        }
        return Ok(());
    };

    let card = StatusCard::from_assessment(&result.assessment);
    writeln!(out)?;
    writeln!(out, "Current Status ({})", card.tone.as_str())?;
    writeln!(out, "  {}", card.headline)?;
    writeln!(out, "  {}", card.location)?;
    writeln!(out, "  AI Confidence: {}", card.confidence)?;

    writeln!(out)?;
    writeln!(out, "AI Traffic Summary")?;
    writeln!(out, "  {}", result.assessment.explanation)?;

    let panel = ReferencesPanel::from_result(result);
    writeln!(out)?;
    writeln!(out, "Location Sources")?;
    match panel.placeholder() {
        Some(text) => writeln!(out, "  {text}")?,
        None => {
            for reference in &panel.references {
                writeln!(out, "  - {} <{}>", reference.title, reference.uri)?;
            }
        }
    }

    Ok(())
}
