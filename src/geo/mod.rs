//! Geographic vector overlays.
//!
//! Country borders are parsed from world GeoJSON fetched at startup;
//! country labels are a fixed table drawn as text markers.

mod borders;
mod labels;

pub use borders::{BorderSet, BORDERS_ATTRIBUTION, BORDERS_URL};
pub use labels::{CountryLabel, COUNTRY_LABELS};
