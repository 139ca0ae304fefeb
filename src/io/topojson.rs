//! TopoJSON decoding: turns a topology object into polygon features.
//!
//! Arcs may be quantized (delta-encoded integers plus a `transform`) or absolute. A ring is the
//! concatenation of its arcs, where a negative index `!i` means arc `i` reversed, and each arc
//! after the first drops its leading point (shared with the previous arc's last point).

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{geom::Feature, types::{GeoId, GeoType}};

/// A parsed TopoJSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: BTreeMap<String, GeometryObject>,
    arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
struct GeometryObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    geometries: Vec<GeometryObject>,
}

/// Feature ids appear both as numbers (`1001`) and zero-padded strings (`"01001"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(f64),
    Text(String),
}

impl Topology {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("[io::topojson] Failed to parse TopoJSON document")
    }

    /// Names of the top-level objects.
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Convert the named object (usually a GeometryCollection) into features of level `ty`.
    pub fn features(&self, object: &str, ty: GeoType) -> Result<Vec<Feature>> {
        let root = self.objects.get(object).ok_or_else(|| anyhow!(
            "[io::topojson] No object named {:?}; available: {:?}",
            object, self.object_names().collect::<Vec<_>>(),
        ))?;

        let arcs = self.decode_arcs();

        let mut leaves = Vec::new();
        flatten(root, &mut leaves);

        let mut features = Vec::with_capacity(leaves.len());
        for geometry in leaves {
            let Some(raw_id) = &geometry.id else {
                log::warn!("[io::topojson] skipping {object:?} geometry without an id");
                continue;
            };
            let id = parse_id(raw_id, ty)?;

            let shape = geometry_to_multipolygon(geometry, &arcs)
                .with_context(|| format!("[io::topojson] Invalid geometry for {id}"))?;

            let name = geometry.properties.as_ref()
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string);

            features.push(Feature { id, name, shape });
        }

        log::debug!("[io::topojson] decoded {} {} features from {:?}", features.len(), ty.to_str(), object);
        Ok(features)
    }

    /// Decode every arc into absolute coordinates.
    fn decode_arcs(&self) -> Vec<Vec<Coord<f64>>> {
        self.arcs.iter()
            .map(|arc| match self.transform {
                Some(Transform { scale, translate }) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    arc.iter()
                        .filter(|p| p.len() >= 2)
                        .map(|p| {
                            x += p[0];
                            y += p[1];
                            Coord { x: x * scale[0] + translate[0], y: y * scale[1] + translate[1] }
                        })
                        .collect()
                }
                None => arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| Coord { x: p[0], y: p[1] })
                    .collect(),
            })
            .collect()
    }
}

/// Collect the leaf geometries of a (possibly nested) GeometryCollection.
fn flatten<'a>(object: &'a GeometryObject, out: &mut Vec<&'a GeometryObject>) {
    if object.kind.as_deref() == Some("GeometryCollection") {
        for child in &object.geometries { flatten(child, out) }
    } else {
        out.push(object);
    }
}

fn parse_id(raw: &RawId, ty: GeoType) -> Result<GeoId> {
    match raw {
        RawId::Number(n) if n.is_finite() && n.fract() == 0.0 && *n >= 0.0 => GeoId::new(ty, &format!("{}", *n as u64)),
        RawId::Number(n) => bail!("[io::topojson] Feature id {n} is not a FIPS code"),
        RawId::Text(s) => GeoId::new(ty, s),
    }
}

fn geometry_to_multipolygon(geometry: &GeometryObject, arcs: &[Vec<Coord<f64>>]) -> Result<MultiPolygon<f64>> {
    let Some(indices) = &geometry.arcs else { return Ok(MultiPolygon(Vec::new())) };

    match geometry.kind.as_deref() {
        Some("Polygon") => {
            let rings: Vec<Vec<i64>> = serde_json::from_value(indices.clone())
                .context("[io::topojson] Polygon arcs must be a list of rings")?;
            Ok(MultiPolygon(polygon(&rings, arcs)?.into_iter().collect()))
        }
        Some("MultiPolygon") => {
            let polygons: Vec<Vec<Vec<i64>>> = serde_json::from_value(indices.clone())
                .context("[io::topojson] MultiPolygon arcs must be a list of polygons")?;
            let mut out = Vec::with_capacity(polygons.len());
            for rings in &polygons {
                out.extend(polygon(rings, arcs)?);
            }
            Ok(MultiPolygon(out))
        }
        // Points and lines have no area to fill.
        _ => Ok(MultiPolygon(Vec::new())),
    }
}

fn polygon(rings: &[Vec<i64>], arcs: &[Vec<Coord<f64>>]) -> Result<Option<Polygon<f64>>> {
    let mut rings = rings.iter().map(|ring| stitch(ring, arcs));
    let Some(exterior) = rings.next().transpose()? else { return Ok(None) };
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Some(Polygon::new(exterior, interiors)))
}

/// Join the arcs of one ring into a closed LineString.
fn stitch(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for &index in indices {
        let (i, reversed) = if index < 0 { ((!index) as usize, true) } else { (index as usize, false) };
        let arc = arcs.get(i)
            .ok_or_else(|| anyhow!("[io::topojson] Arc index {index} out of range ({} arcs)", arcs.len()))?;

        if !points.is_empty() { points.pop(); }
        if reversed {
            points.extend(arc.iter().rev().copied());
        } else {
            points.extend(arc.iter().copied());
        }
    }

    // Ensure ring is closed (first point == last point)
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first) }
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two unit squares sharing the edge x = 1, quantized with scale 1 and translate (10, 20).
    const TOPO: &str = r#"{
        "type": "Topology",
        "transform": { "scale": [1, 1], "translate": [10, 20] },
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "id": "01001", "arcs": [[0, 1]], "properties": { "name": "West" } },
                    { "type": "Polygon", "id": 1003, "arcs": [[2, -1]] },
                    { "type": null, "id": "01005" }
                ]
            }
        },
        "arcs": [
            [[1, 0], [0, 1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ]
    }"#;

    #[test]
    fn decodes_quantized_polygons() {
        let topology = Topology::from_slice(TOPO.as_bytes()).unwrap();
        let features = topology.features("counties", GeoType::County).unwrap();
        assert_eq!(features.len(), 3);

        let west = &features[0];
        assert_eq!(west.id.id(), "01001");
        assert_eq!(west.name.as_deref(), Some("West"));
        let ring: Vec<(f64, f64)> = west.shape.0[0].exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(ring, vec![(11.0, 20.0), (11.0, 21.0), (10.0, 21.0), (10.0, 20.0), (11.0, 20.0)]);

        // numeric id is zero-padded; reversed arc closes the ring
        let east = &features[1];
        assert_eq!(east.id.id(), "01003");
        let ring: Vec<(f64, f64)> = east.shape.0[0].exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(ring, vec![(11.0, 20.0), (12.0, 20.0), (12.0, 21.0), (11.0, 21.0), (11.0, 20.0)]);

        assert!(features[2].shape.0.is_empty());
    }

    #[test]
    fn unknown_object_is_an_error() {
        let topology = Topology::from_slice(TOPO.as_bytes()).unwrap();
        let err = topology.features("states", GeoType::State).unwrap_err();
        assert!(err.to_string().contains("counties"));
    }

    #[test]
    fn bad_arc_index_is_an_error() {
        let topo = r#"{ "type": "Topology", "objects": { "s": { "type": "GeometryCollection",
            "geometries": [{ "type": "Polygon", "id": "06", "arcs": [[7]] }] } }, "arcs": [] }"#;
        let topology = Topology::from_slice(topo.as_bytes()).unwrap();
        assert!(topology.features("s", GeoType::State).is_err());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Topology::from_slice(b"{ not json").is_err());
    }
}
