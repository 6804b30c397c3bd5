//! Web Mercator slippy-tile math and per-service tile URL construction.

use crate::sources::TileService;
use crate::state::Basemap;

/// Half the extent of the Web Mercator plane in meters.
pub const MERCATOR_ORIGIN: f64 = 20_037_508.342_789_244;

/// A tile address in the standard XYZ scheme.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Number of tiles along one axis at this zoom.
    pub fn tiles_across(z: u8) -> u32 {
        1u32 << z
    }

    /// Tile containing the given coordinate, clamped to the valid range.
    pub fn at(lon: f64, lat: f64, z: u8) -> TileId {
        let (fx, fy) = fractional_tile(lon, lat, z);
        let max = Self::tiles_across(z) - 1;
        TileId {
            z,
            x: (fx.floor() as i64).clamp(0, max as i64) as u32,
            y: (fy.floor() as i64).clamp(0, max as i64) as u32,
        }
    }

    /// Geographic bounds as (west, south, east, north) degrees.
    pub fn geo_bounds(&self) -> (f64, f64, f64, f64) {
        let n = Self::tiles_across(self.z) as f64;
        let west = self.x as f64 / n * 360.0 - 180.0;
        let east = (self.x + 1) as f64 / n * 360.0 - 180.0;
        let north = tile_edge_lat(self.y as f64, n);
        let south = tile_edge_lat((self.y + 1) as f64, n);
        (west, south, east, north)
    }

    /// Web Mercator bounds in meters as (min_x, min_y, max_x, max_y).
    pub fn mercator_bounds(&self) -> (f64, f64, f64, f64) {
        let n = Self::tiles_across(self.z) as f64;
        let size = 2.0 * MERCATOR_ORIGIN / n;
        let min_x = -MERCATOR_ORIGIN + self.x as f64 * size;
        let max_y = MERCATOR_ORIGIN - self.y as f64 * size;
        (min_x, max_y - size, min_x + size, max_y)
    }
}

/// Fractional tile coordinates of a lon/lat at the given zoom.
pub fn fractional_tile(lon: f64, lat: f64, z: u8) -> (f64, f64) {
    let n = TileId::tiles_across(z) as f64;
    let x = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat.clamp(-85.051_128, 85.051_128).to_radians();
    let y = (1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * n;
    (x, y)
}

fn tile_edge_lat(y: f64, n: f64) -> f64 {
    let t = std::f64::consts::PI * (1.0 - 2.0 * y / n);
    t.sinh().atan().to_degrees()
}

/// Fills an XYZ URL template, rotating `{s}` through the subdomains.
pub fn xyz_url(template: &str, subdomains: &[&str], tile: TileId) -> String {
    let mut url = template
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string());
    if !subdomains.is_empty() {
        let s = subdomains[(tile.x + tile.y) as usize % subdomains.len()];
        url = url.replace("{s}", s);
    }
    url
}

/// WMS 1.3.0 GetMap request for one 256x256 tile in EPSG:3857.
pub fn wms_url(endpoint: &str, layer: &str, time: &str, tile: TileId) -> String {
    let (min_x, min_y, max_x, max_y) = tile.mercator_bounds();
    format!(
        "{endpoint}?SERVICE=WMS&REQUEST=GetMap&VERSION=1.3.0\
         &LAYERS={layer}&STYLES=&CRS=EPSG:3857\
         &BBOX={min_x},{min_y},{max_x},{max_y}\
         &WIDTH=256&HEIGHT=256&FORMAT=image/png&TRANSPARENT=TRUE\
         &TIME={time}"
    )
}

/// NASA GIBS WMTS GetTile request.
pub fn gibs_url(
    layer: &str,
    tile_matrix_set: &str,
    subdomains: &[&str],
    time: &str,
    tile: TileId,
) -> String {
    let s = if subdomains.is_empty() {
        "a"
    } else {
        subdomains[(tile.x + tile.y) as usize % subdomains.len()]
    };
    let encoded_time = time.replace(':', "%3A");
    format!(
        "https://gibs-{s}.earthdata.nasa.gov/wmts/epsg3857/best/wmts.cgi\
         ?TIME={encoded_time}&layer={layer}&style=default\
         &tilematrixset={tile_matrix_set}&Service=WMTS&Request=GetTile\
         &Version=1.0.0&Format=image%2Fjpeg\
         &TileMatrix={z}&TileCol={x}&TileRow={y}",
        z = tile.z,
        x = tile.x,
        y = tile.y,
    )
}

/// Tile URL for an imagery source at the given request timestamp.
pub fn source_tile_url(service: TileService, time: &str, tile: TileId) -> String {
    match service {
        TileService::Wms { endpoint, layer } => wms_url(endpoint, layer, time, tile),
        TileService::GibsWmts {
            layer,
            tile_matrix_set,
            subdomains,
            max_native_zoom,
        } => {
            // GIBS serves nothing above its native matrix depth.
            let tile = if tile.z > max_native_zoom {
                TileId::at_parent(tile, max_native_zoom)
            } else {
                tile
            };
            gibs_url(layer, tile_matrix_set, subdomains, time, tile)
        }
    }
}

impl TileId {
    /// The ancestor of this tile at a shallower zoom level.
    pub fn at_parent(tile: TileId, z: u8) -> TileId {
        let shift = tile.z.saturating_sub(z);
        TileId {
            z,
            x: tile.x >> shift,
            y: tile.y >> shift,
        }
    }
}

/// Tile URL for a basemap.
pub fn basemap_tile_url(basemap: Basemap, tile: TileId) -> String {
    match basemap {
        Basemap::Osm => xyz_url(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            &["a", "b", "c"],
            tile,
        ),
        Basemap::Satellite => xyz_url(
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
            &[],
            tile,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_at_origin() {
        let tile = TileId::at(0.0, 0.0, 1);
        assert_eq!(tile, TileId { z: 1, x: 1, y: 1 });
    }

    #[test]
    fn test_tile_at_map_center() {
        // (40 N, 35 E) at zoom 6, the initial view.
        let tile = TileId::at(35.0, 40.0, 6);
        assert_eq!(tile.z, 6);
        assert_eq!(tile.x, 38);
        assert_eq!(tile.y, 24);
    }

    #[test]
    fn test_geo_bounds_roundtrip() {
        let tile = TileId::at(35.0, 40.0, 6);
        let (west, south, east, north) = tile.geo_bounds();
        assert!(west <= 35.0 && 35.0 < east);
        assert!(south <= 40.0 && 40.0 < north);
    }

    #[test]
    fn test_mercator_bounds_span_origin() {
        let tile = TileId { z: 0, x: 0, y: 0 };
        let (min_x, min_y, max_x, max_y) = tile.mercator_bounds();
        assert!((min_x + MERCATOR_ORIGIN).abs() < 1e-6);
        assert!((max_x - MERCATOR_ORIGIN).abs() < 1e-6);
        assert!((min_y + MERCATOR_ORIGIN).abs() < 1e-6);
        assert!((max_y - MERCATOR_ORIGIN).abs() < 1e-6);
    }

    #[test]
    fn test_xyz_substitution() {
        let tile = TileId { z: 3, x: 4, y: 2 };
        let url = xyz_url(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            &["a", "b", "c"],
            tile,
        );
        assert_eq!(url, "https://a.tile.openstreetmap.org/3/4/2.png");
    }

    #[test]
    fn test_wms_url_carries_time_and_layer() {
        let tile = TileId { z: 0, x: 0, y: 0 };
        let url = wms_url(
            "https://view.eumetsat.int/geoserver/wms",
            "mtg_fd:rgb_geocolour",
            "2024-03-10T10:40:00.000Z",
            tile,
        );
        assert!(url.contains("LAYERS=mtg_fd:rgb_geocolour"));
        assert!(url.contains("TIME=2024-03-10T10:40:00.000Z"));
        assert!(url.contains("CRS=EPSG:3857"));
    }

    #[test]
    fn test_gibs_url_encodes_time_colons() {
        let tile = TileId { z: 5, x: 10, y: 11 };
        let url = gibs_url(
            "VIIRS_NOAA20_CorrectedReflectance_TrueColor",
            "GoogleMapsCompatible_Level9",
            &["a", "b", "c"],
            "2024-03-09T00:00:00Z",
            tile,
        );
        assert!(url.contains("TIME=2024-03-09T00%3A00%3A00Z"));
        assert!(url.contains("TileMatrix=5&TileCol=10&TileRow=11"));
    }

    #[test]
    fn test_gibs_zoom_clamped_to_native() {
        let tile = TileId { z: 12, x: 4096, y: 2048 };
        let url = source_tile_url(
            crate::sources::DataSource::ViirsDaily.tile_service(),
            "2024-03-09T00:00:00Z",
            tile,
        );
        assert!(url.contains("TileMatrix=9&TileCol=512&TileRow=256"));
    }
}
