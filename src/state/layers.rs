//! Layer visibility state.

use crate::sources::DataSource;

/// The two available basemaps. Exactly one is visible at all times.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Basemap {
    Osm,
    #[default]
    Satellite,
}

impl Basemap {
    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Osm => "OpenStreetMap",
            Basemap::Satellite => "Satellite (Esri)",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::Osm => "© OpenStreetMap contributors",
            Basemap::Satellite => "© Esri, Maxar, Earthstar Geographics",
        }
    }

    pub const ALL: [Basemap; 2] = [Basemap::Osm, Basemap::Satellite];
}

/// Geographic vector overlays, independent of imagery exclusivity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverlayLayer {
    CountryBorders,
    CountryLabels,
}

impl OverlayLayer {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayLayer::CountryBorders => "Country Borders",
            OverlayLayer::CountryLabels => "Country Labels",
        }
    }

    pub const ALL: [OverlayLayer; 2] =
        [OverlayLayer::CountryBorders, OverlayLayer::CountryLabels];
}

/// Visibility flags for everything drawn on the map.
///
/// At most one imagery source is active at a time; the Option encodes
/// that directly. Overlays toggle independently of imagery and of each
/// other.
pub struct LayerVisibility {
    /// The active imagery source, if any.
    pub active_imagery: Option<DataSource>,

    /// Show country border polylines.
    pub borders: bool,

    /// Show country name labels.
    pub labels: bool,

    /// Which basemap is underneath everything else.
    pub basemap: Basemap,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            active_imagery: None,
            borders: true,
            labels: true,
            basemap: Basemap::default(),
        }
    }
}

impl LayerVisibility {
    pub fn is_imagery_active(&self, source: DataSource) -> bool {
        self.active_imagery == Some(source)
    }

    pub fn is_overlay_visible(&self, overlay: OverlayLayer) -> bool {
        match overlay {
            OverlayLayer::CountryBorders => self.borders,
            OverlayLayer::CountryLabels => self.labels,
        }
    }

    pub fn set_overlay_visible(&mut self, overlay: OverlayLayer, visible: bool) {
        match overlay {
            OverlayLayer::CountryBorders => self.borders = visible,
            OverlayLayer::CountryLabels => self.labels = visible,
        }
    }

    /// True while the daily source is active, which suspends sub-day
    /// navigation and playback.
    pub fn daily_active(&self) -> bool {
        self.active_imagery.is_some_and(|s| s.is_daily())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let vis = LayerVisibility::default();
        assert!(vis.active_imagery.is_none());
        assert!(vis.borders);
        assert!(vis.labels);
        assert_eq!(vis.basemap, Basemap::Satellite);
        assert!(!vis.daily_active());
    }

    #[test]
    fn test_daily_active_tracks_source_granularity() {
        let mut vis = LayerVisibility::default();
        vis.active_imagery = Some(DataSource::GeoColour);
        assert!(!vis.daily_active());
        vis.active_imagery = Some(DataSource::ViirsDaily);
        assert!(vis.daily_active());
    }

    #[test]
    fn test_overlay_accessors() {
        let mut vis = LayerVisibility::default();
        vis.set_overlay_visible(OverlayLayer::CountryLabels, false);
        assert!(!vis.is_overlay_visible(OverlayLayer::CountryLabels));
        assert!(vis.is_overlay_visible(OverlayLayer::CountryBorders));
    }
}
