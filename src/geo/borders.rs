//! Country border polylines parsed from world GeoJSON.

use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, Value};

/// Source of the world borders data, fetched once at startup.
pub const BORDERS_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

pub const BORDERS_ATTRIBUTION: &str = "Country Borders: © Natural Earth (public domain)";

/// One country's border outlines. Polygon rings are flattened to closed
/// polylines since borders are only ever stroked, never filled.
#[derive(Debug, Clone)]
pub struct BorderFeature {
    pub name: Option<String>,
    pub lines: Vec<Vec<Coord<f64>>>,
}

/// All country borders, ready for drawing.
#[derive(Debug, Clone, Default)]
pub struct BorderSet {
    pub features: Vec<BorderFeature>,
}

impl BorderSet {
    /// Parses a world GeoJSON document into border polylines.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, String> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;

        let mut set = BorderSet::default();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in fc.features {
                    set.push_feature(&feature);
                }
            }
            GeoJson::Feature(f) => set.push_feature(&f),
            GeoJson::Geometry(g) => {
                let lines = geometry_lines(&g);
                if !lines.is_empty() {
                    set.features.push(BorderFeature { name: None, lines });
                }
            }
        }

        log::info!("Loaded {} border features", set.features.len());
        Ok(set)
    }

    fn push_feature(&mut self, feature: &Feature) {
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let Some(geometry) = feature.geometry.as_ref() else {
            return;
        };
        let lines = geometry_lines(geometry);
        if !lines.is_empty() {
            self.features.push(BorderFeature { name, lines });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Flattens any line-like or polygonal geometry into polylines.
fn geometry_lines(geometry: &Geometry) -> Vec<Vec<Coord<f64>>> {
    fn ring_to_line(ring: &[Vec<f64>]) -> Vec<Coord<f64>> {
        ring.iter().map(|c| Coord { x: c[0], y: c[1] }).collect()
    }

    match &geometry.value {
        Value::LineString(coords) => vec![ring_to_line(coords)],
        Value::MultiLineString(lines) => lines.iter().map(|l| ring_to_line(l)).collect(),
        Value::Polygon(rings) => rings.iter().map(|r| ring_to_line(r)).collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flat_map(|rings| rings.iter().map(|r| ring_to_line(r)))
            .collect(),
        Value::GeometryCollection(geometries) => {
            geometries.iter().flat_map(geometry_lines).collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Atlantis" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Archipelago" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[10.0, 10.0], [11.0, 10.0], [10.0, 10.0]]],
                        [[[20.0, 20.0], [21.0, 20.0], [20.0, 20.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parses_polygons_as_polylines() {
        let set = BorderSet::from_geojson(SAMPLE).unwrap();
        assert_eq!(set.features.len(), 2);

        let atlantis = &set.features[0];
        assert_eq!(atlantis.name.as_deref(), Some("Atlantis"));
        assert_eq!(atlantis.lines.len(), 1);
        assert_eq!(atlantis.lines[0].len(), 4);

        let archipelago = &set.features[1];
        assert_eq!(archipelago.lines.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(BorderSet::from_geojson("not geojson").is_err());
    }

    #[test]
    fn test_feature_without_geometry_is_skipped() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Nowhere" }, "geometry": null }
            ]
        }"#;
        let set = BorderSet::from_geojson(doc).unwrap();
        assert!(set.is_empty());
    }
}
