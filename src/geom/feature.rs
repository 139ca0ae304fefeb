use geo::MultiPolygon;

use crate::types::GeoId;

/// A state or county boundary in lon/lat degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: GeoId,
    pub name: Option<String>,       // Display name, when the topology carries one
    pub shape: MultiPolygon<f64>,
}
