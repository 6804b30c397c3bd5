//! Application state management.
//!
//! State is organized into logical groupings that correspond to different
//! areas of functionality. All mutation flows through the timeline,
//! playback, and layer coordinator types so the future-check and
//! exclusivity invariants hold under any event ordering.

pub mod clock;
mod layers;
mod playback;
mod settings;
mod timeline;

pub use layers::{Basemap, LayerVisibility, OverlayLayer};
pub use playback::{PlaybackController, PlaybackSpeed, PlaybackTick};
pub use settings::UiSettings;
pub use timeline::{DisplayFields, TimelineState};

/// Root application state containing all sub-states.
pub struct AppState {
    /// The authoritative observation time.
    pub timeline: TimelineState,

    /// Playback loop over the timeline.
    pub playback: PlaybackController,

    /// Which layers are visible.
    pub layers: LayerVisibility,

    /// Persisted user preferences.
    pub settings: UiSettings,

    /// Application status message displayed in the top bar.
    pub status_message: String,

    /// Whether the welcome dialog is open.
    pub welcome_open: bool,

    /// Which source's info dialog is open, if any.
    pub info_open: Option<crate::sources::DataSource>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let now = clock::now_utc();
        let settings = UiSettings::load();
        let welcome_open = !settings.dont_show_welcome;

        Self {
            timeline: TimelineState::new(now, now.date_naive()),
            playback: PlaybackController::new(),
            layers: LayerVisibility::default(),
            settings,
            status_message: "Ready".to_string(),
            welcome_open,
            info_open: None,
        }
    }
}
