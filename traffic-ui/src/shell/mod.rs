// Presentation shell for Traffic Insight.
// Headless: state + view models; `render` turns them into text.

pub mod controller;
pub mod render;
pub mod state;
pub mod view;

pub use controller::SearchController;
pub use state::AppState;
pub use view::{MapView, MapViewport, ReferencesPanel, StatusCard};
