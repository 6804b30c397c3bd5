//! Satellite imagery data sources.
//!
//! Each source carries its own temporal granularity, request timestamp
//! format, and tile service configuration. Sources are fixed at compile
//! time.

use chrono::{DateTime, Utc};

use crate::state::clock::{self, STEP_MINUTES};

/// Temporal granularity of a source's imagery.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Granularity {
    /// New imagery every ten minutes.
    TenMinute,
    /// One image per calendar day, keyed to 00:00 UTC.
    Daily,
}

/// Tile service a source is fetched from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileService {
    /// WMS GetMap with a TIME parameter.
    Wms {
        endpoint: &'static str,
        layer: &'static str,
    },
    /// NASA GIBS WMTS in the GoogleMapsCompatible tiling scheme.
    GibsWmts {
        layer: &'static str,
        tile_matrix_set: &'static str,
        subdomains: &'static [&'static str],
        max_native_zoom: u8,
    },
}

/// Descriptive metadata shown in the layer info dialog.
pub struct SourceInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub provider: &'static str,
    pub temporal_resolution: &'static str,
    pub spatial_resolution: &'static str,
    pub coverage: &'static str,
    pub source_url: &'static str,
    pub note: Option<&'static str>,
}

/// The available imagery sources.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DataSource {
    /// MTG GeoColour RGB composite.
    GeoColour,
    /// MTG-I Fog / Low Clouds RGB composite.
    FogLowClouds,
    /// VIIRS NOAA-20 true color, daily.
    ViirsDaily,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [
        DataSource::GeoColour,
        DataSource::FogLowClouds,
        DataSource::ViirsDaily,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::GeoColour => "GeoColour RGB - MTG",
            DataSource::FogLowClouds => "Fog / Low Clouds RGB - MTG-I",
            DataSource::ViirsDaily => "NOAA-20 / VIIRS",
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            DataSource::GeoColour | DataSource::FogLowClouds => Granularity::TenMinute,
            DataSource::ViirsDaily => Granularity::Daily,
        }
    }

    pub fn is_daily(&self) -> bool {
        self.granularity() == Granularity::Daily
    }

    /// Maps the observation time to this source's request timestamp.
    ///
    /// Returns `None` when no imagery can exist for that time: for the
    /// ten-minute sources a bucket-rounded future check, for the daily
    /// source a calendar-date comparison against today's UTC date.
    pub fn request_time(
        &self,
        current: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        match self.granularity() {
            Granularity::TenMinute => {
                if clock::is_future(current, STEP_MINUTES, now) {
                    return None;
                }
                Some(current.format("%Y-%m-%dT%H:%M:00.000Z").to_string())
            }
            Granularity::Daily => {
                if current.date_naive() > now.date_naive() {
                    return None;
                }
                Some(current.format("%Y-%m-%dT00:00:00Z").to_string())
            }
        }
    }

    pub fn tile_service(&self) -> TileService {
        match self {
            DataSource::GeoColour => TileService::Wms {
                endpoint: "https://view.eumetsat.int/geoserver/wms",
                layer: "mtg_fd:rgb_geocolour",
            },
            DataSource::FogLowClouds => TileService::Wms {
                endpoint: "https://view.eumetsat.int/geoserver/wms",
                layer: "mtg_fd:rgb_fog",
            },
            DataSource::ViirsDaily => TileService::GibsWmts {
                layer: "VIIRS_NOAA20_CorrectedReflectance_TrueColor",
                tile_matrix_set: "GoogleMapsCompatible_Level9",
                subdomains: &["a", "b", "c"],
                max_native_zoom: 9,
            },
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            DataSource::GeoColour | DataSource::FogLowClouds => {
                "© EUMETSAT - MTG-I1 (Meteosat Third Generation)"
            }
            DataSource::ViirsDaily => {
                "© NASA GIBS / Worldview - VIIRS NOAA-20 Corrected Reflectance True Color"
            }
        }
    }

    pub fn info(&self) -> SourceInfo {
        match self {
            DataSource::GeoColour => SourceInfo {
                title: "GeoColour RGB - MTG",
                description: "GeoColour RGB composite from the Meteosat Third Generation \
                    (MTG) satellite. Combines visible and near-infrared channels into a \
                    true-color representation of Earth's surface and atmosphere, \
                    optimized for daytime visualization and cloud detection.",
                provider: "EUMETSAT",
                temporal_resolution: "10 minutes",
                spatial_resolution: "2 km",
                coverage: "Europe, Africa, Middle East",
                source_url: "https://data.eumetsat.int/product/EO:EUM:DAT:0913",
                note: Some(
                    "Nighttime city lights in this imagery are added during \
                     post-processing for geographic reference; they are not actual \
                     light emissions captured by the sensors.",
                ),
            },
            DataSource::FogLowClouds => SourceInfo {
                title: "Fog / Low Clouds RGB - MTG-I",
                description: "Fog and low clouds RGB composite from the Meteosat Third \
                    Generation Imager (MTG-I). Uses a channel combination tuned to \
                    reveal fog, low stratus, and other low-level cloud formations that \
                    are hard to distinguish in standard imagery.",
                provider: "EUMETSAT",
                temporal_resolution: "10 minutes",
                spatial_resolution: "2 km",
                coverage: "Europe, Africa, Middle East",
                source_url: "https://data.eumetsat.int/product/EO:EUM:DAT:1023",
                note: Some(
                    "Data is delivered with a 3 hour delay. This layer may not be \
                     available for all time periods.",
                ),
            },
            DataSource::ViirsDaily => SourceInfo {
                title: "NOAA-20 / VIIRS",
                description: "True color imagery from the Visible Infrared Imaging \
                    Radiometer Suite (VIIRS) on board the NOAA-20 satellite. \
                    Polar-orbiting coverage with high spatial detail, one global \
                    composite per day.",
                provider: "NASA GIBS",
                temporal_resolution: "1 day",
                spatial_resolution: "250 m",
                coverage: "Global",
                source_url: "https://www.earthdata.nasa.gov/data/catalog/lancemodis-vj103mod-nrt-2.1",
                note: None,
            },
        }
    }
}
