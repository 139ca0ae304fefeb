//! SVG path data for geometry already projected into canvas coordinates.

use geo::{CoordsIter, LineString, MultiPolygon};

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, &mut out);
        }
    }

    out
}

/// Build a path string tracing a set of closed rings.
pub(crate) fn rings_to_path(rings: &[LineString<f64>]) -> String {
    let mut out = String::new();
    for ring in rings {
        ring_to_path(ring, &mut out);
    }
    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, out: &mut String) {
    let mut coords = ring.coords_iter();
    if let Some(first) = coords.next() {
        if !out.is_empty() { out.push(' ') }
        out.push_str(&format!("M{:.3},{:.3}", first.x, first.y));
        for c in coords {
            out.push_str(&format!(" L{:.3},{:.3}", c.x, c.y));
        }
        out.push('Z');
    }
}

/// Escape text for use in XML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
