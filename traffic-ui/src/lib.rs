//! traffic-ui: presentation shell for the traffic-query adapter.
//!
//! The shell holds no business logic. It keeps `loading` / `result` / `error`
//! state, derives view models from it, and renders them as text.

pub mod shell;

pub use shell::{AppState, MapView, MapViewport, ReferencesPanel, SearchController, StatusCard};
