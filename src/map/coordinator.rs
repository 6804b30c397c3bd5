//! Layer visibility coordination.
//!
//! One generic coordinator handles every imagery source and overlay. It
//! owns the layer handles, enforces imagery exclusivity, keeps tile layers
//! in sync with the observation time, and re-asserts stacking order after
//! every mutation. All map access goes through the `TileMap` trait.

use chrono::{DateTime, Utc};

use super::{LayerHandle, LayerSpec, TileMap};
use crate::sources::DataSource;
use crate::state::{Basemap, LayerVisibility, OverlayLayer, PlaybackController};

/// Drives layer lifecycle on the map.
///
/// Stacking order, bottom to top: basemap, imagery, borders, labels.
#[derive(Default)]
pub struct LayerCoordinator {
    basemap: Option<LayerHandle>,
    imagery: Option<(DataSource, LayerHandle)>,
    borders: Option<LayerHandle>,
    labels: Option<LayerHandle>,
    /// Request timestamp baked into the current imagery layer. Time sync
    /// rebuilds the layer only when this changes.
    last_time_string: Option<String>,
}

impl LayerCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the initial basemap and default-on overlays.
    pub fn init(&mut self, map: &mut dyn TileMap, vis: &LayerVisibility) {
        match map.create_tile_layer(LayerSpec::Basemap(vis.basemap)) {
            Ok(h) => {
                map.add_to_map(h);
                self.basemap = Some(h);
            }
            Err(e) => log::error!("Failed to create basemap layer: {}", e),
        }
        for overlay in OverlayLayer::ALL {
            if vis.is_overlay_visible(overlay) {
                self.show_overlay(map, overlay);
            }
        }
        self.restack(map);
    }

    /// Toggles an imagery source on or off.
    ///
    /// Activating a source deactivates the other two (at most one imagery
    /// layer is visible). Activating the daily source stops playback.
    /// Deactivating the active source only hides its layer.
    pub fn toggle_imagery(
        &mut self,
        map: &mut dyn TileMap,
        vis: &mut LayerVisibility,
        playback: &mut PlaybackController,
        source: DataSource,
        current: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        if vis.is_imagery_active(source) {
            vis.active_imagery = None;
            if let Some((_, handle)) = self.imagery {
                map.remove_from_map(handle);
            }
            log::info!("{} layer hidden", source.label());
            return;
        }

        vis.active_imagery = Some(source);
        if source.is_daily() && playback.is_playing() {
            log::info!("Playback stopped, the daily layer has no sub-day frames");
            playback.stop();
        }

        // Exclusivity: tear down a different source's layer entirely.
        if let Some((active, handle)) = self.imagery {
            if active != source {
                map.destroy_layer(handle);
                self.imagery = None;
                self.last_time_string = None;
            }
        }

        self.refresh_imagery(map, source, current, now);
        self.restack(map);
    }

    /// Toggles a geographic overlay, independent of imagery state.
    pub fn toggle_overlay(
        &mut self,
        map: &mut dyn TileMap,
        vis: &mut LayerVisibility,
        overlay: OverlayLayer,
    ) {
        let visible = !vis.is_overlay_visible(overlay);
        vis.set_overlay_visible(overlay, visible);
        if visible {
            self.show_overlay(map, overlay);
            self.restack(map);
        } else if let Some(handle) = self.overlay_slot(overlay) {
            map.remove_from_map(handle);
        }
    }

    /// Swaps the basemap, then re-raises everything above it.
    pub fn set_basemap(
        &mut self,
        map: &mut dyn TileMap,
        vis: &mut LayerVisibility,
        basemap: Basemap,
    ) {
        if vis.basemap == basemap {
            return;
        }
        vis.basemap = basemap;
        if let Some(handle) = self.basemap.take() {
            map.destroy_layer(handle);
        }
        match map.create_tile_layer(LayerSpec::Basemap(basemap)) {
            Ok(h) => {
                map.add_to_map(h);
                self.basemap = Some(h);
            }
            Err(e) => log::error!("Failed to create basemap layer: {}", e),
        }
        self.restack(map);
        log::info!("Basemap switched to {}", basemap.label());
    }

    /// Re-syncs the active imagery layer with the observation time.
    ///
    /// A no-op when the source's request timestamp has not changed since
    /// the layer was last built.
    pub fn sync_time(
        &mut self,
        map: &mut dyn TileMap,
        vis: &LayerVisibility,
        current: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        let Some(source) = vis.active_imagery else {
            return;
        };
        if self.refresh_imagery(map, source, current, now) {
            self.restack(map);
        }
    }

    /// Rebuilds the imagery layer for `source` if needed. Returns true
    /// when the map changed.
    fn refresh_imagery(
        &mut self,
        map: &mut dyn TileMap,
        source: DataSource,
        current: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(time) = source.request_time(current, now) else {
            // Unavailable imagery is torn down, not left stale.
            self.last_time_string = None;
            if let Some((_, handle)) = self.imagery.take() {
                map.destroy_layer(handle);
                log::warn!("No {} imagery for the selected time", source.label());
                return true;
            }
            return false;
        };

        if self.last_time_string.as_deref() == Some(time.as_str()) {
            if let Some((active, handle)) = self.imagery {
                if active == source {
                    // Same timestamp: re-add if hidden, otherwise nothing
                    // to do.
                    if !map.is_on_map(handle) {
                        map.add_to_map(handle);
                        return true;
                    }
                    return false;
                }
            }
        }

        // The old layer's handle is never reused once the timestamp moved
        // on, so destroy it rather than leaving it parked in the stack.
        if let Some((_, handle)) = self.imagery.take() {
            map.destroy_layer(handle);
        }
        match map.create_tile_layer(LayerSpec::Imagery {
            source,
            time: time.clone(),
        }) {
            Ok(handle) => {
                map.add_to_map(handle);
                self.imagery = Some((source, handle));
                self.last_time_string = Some(time);
            }
            Err(e) => {
                log::error!("Failed to create {} layer: {}", source.label(), e);
                self.last_time_string = None;
            }
        }
        true
    }

    fn show_overlay(&mut self, map: &mut dyn TileMap, overlay: OverlayLayer) {
        let slot = match overlay {
            OverlayLayer::CountryBorders => &mut self.borders,
            OverlayLayer::CountryLabels => &mut self.labels,
        };
        if slot.is_none() {
            match map.create_tile_layer(LayerSpec::Overlay(overlay)) {
                Ok(h) => *slot = Some(h),
                Err(e) => {
                    log::error!("Failed to create {} layer: {}", overlay.label(), e);
                    return;
                }
            }
        }
        if let Some(handle) = *slot {
            map.add_to_map(handle);
        }
    }

    fn overlay_slot(&self, overlay: OverlayLayer) -> Option<LayerHandle> {
        match overlay {
            OverlayLayer::CountryBorders => self.borders,
            OverlayLayer::CountryLabels => self.labels,
        }
    }

    /// Re-asserts stacking order by raising layers bottom-up above the
    /// basemap.
    fn restack(&self, map: &mut dyn TileMap) {
        if let Some((_, handle)) = self.imagery {
            if map.is_on_map(handle) {
                map.bring_to_front(handle);
            }
        }
        for slot in [self.borders, self.labels] {
            if let Some(handle) = slot {
                if map.is_on_map(handle) {
                    map.bring_to_front(handle);
                }
            }
        }
    }
}
