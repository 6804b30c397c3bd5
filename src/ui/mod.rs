//! UI modules for the SatView application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, clickable observation time, and status
//! - Left panel: Imagery, overlay, and basemap controls
//! - Central canvas: Slippy map
//! - Bottom panel: Time stepping and playback controls
//! - Modals: Welcome dialog and per-source info

mod bottom_panel;
mod canvas;
mod left_panel;
mod modals;
mod top_bar;

pub use bottom_panel::render_bottom_panel;
pub use canvas::{render_canvas, MapView};
pub use left_panel::render_left_panel;
pub use modals::render_modals;
pub use top_bar::render_top_bar;
