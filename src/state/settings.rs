//! Persisted UI settings.
//!
//! Settings are persisted to localStorage so they survive page reloads.
//! On native builds persistence is a no-op and defaults apply each run.

use serde::{Deserialize, Serialize};

/// Small set of user preferences that outlive the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSettings {
    /// Skip the welcome dialog on startup.
    pub dont_show_welcome: bool,
}

impl UiSettings {
    /// localStorage key for persisting settings.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "satview_ui_settings";

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded UI settings from localStorage");
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse UI settings: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Save settings to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return,
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize UI settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save UI settings: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
