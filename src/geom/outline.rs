//! Outer boundary of a union of adjacent polygons.
//!
//! Neighbouring features from one topology share their border vertices exactly, so every interior
//! edge appears twice and every edge on the outer boundary appears once. Toggling edges in a set
//! leaves only the boundary, which is then stitched back into closed rings.

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Result};
use geo::{Coord, LineString, MultiPolygon};

/// Quantization scale (1e-7 deg ≈ 1 cm at equator).
const Q_SCALE: f64 = 1e7;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct QuantizedPoint(i64, i64);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct Segment(QuantizedPoint, QuantizedPoint); // undirected: stored with canonical (min,max) endpoint order

#[derive(Default, Clone)]
struct SegmentSet(HashSet<Segment>);

#[inline]
fn qpt(c: &Coord<f64>) -> QuantizedPoint {
    QuantizedPoint((c.x * Q_SCALE).round() as i64, (c.y * Q_SCALE).round() as i64)
}

#[inline]
fn seg_norm(a: QuantizedPoint, b: QuantizedPoint) -> Segment {
    if (a.0, a.1) <= (b.0, b.1) { Segment(a, b) } else { Segment(b, a) }
}

impl SegmentSet {
    /// Add the segment if absent, remove it if present.
    fn toggle(&mut self, segment: Segment) {
        if !self.0.remove(&segment) { self.0.insert(segment); }
    }
}

/// Closed rings (lon/lat) tracing the outer boundary of the union of `shapes`, including the
/// boundaries of holes in the union.
pub(crate) fn outline_rings<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Result<Vec<LineString<f64>>> {
    let mut ptmap: HashMap<QuantizedPoint, Coord<f64>> = HashMap::new();
    let mut boundary = SegmentSet::default();

    for shape in shapes {
        for polygon in &shape.0 {
            toggle_ring_segments(polygon.exterior(), &mut boundary, &mut ptmap);
            for hole in polygon.interiors() {
                toggle_ring_segments(hole, &mut boundary, &mut ptmap);
            }
        }
    }

    let rings = polygonize_rings(&boundary, &ptmap)?;
    Ok(rings.into_iter()
        .map(|mut ring| {
            if let Some(&first) = ring.first() { ring.push(first) }
            LineString(ring)
        })
        .collect())
}

/// Toggle the segments of a ring (LineString) in `set`.
fn toggle_ring_segments(ring: &LineString<f64>, set: &mut SegmentSet, ptmap: &mut HashMap<QuantizedPoint, Coord<f64>>) {
    let coords = &ring.0;
    if coords.len() < 2 { return }

    // close the ring if the source left it open
    let closing = (coords.first() != coords.last()).then(|| (coords[coords.len() - 1], coords[0]));

    for (p, c) in coords.windows(2).map(|w| (w[0], w[1])).chain(closing) {
        let qa = qpt(&p);
        let qb = qpt(&c);
        if qa == qb { continue }
        set.toggle(seg_norm(qa, qb));
        ptmap.entry(qa).or_insert(p);
        ptmap.entry(qb).or_insert(c);
    }
}

/// Turn a set of undirected boundary segments into closed rings (list of coords).
fn polygonize_rings(boundary: &SegmentSet, ptmap: &HashMap<QuantizedPoint, Coord<f64>>) -> Result<Vec<Vec<Coord<f64>>>> {
    // adjacency (multi-graph): QPt -> multiset of neighbors
    let mut adj: HashMap<QuantizedPoint, Vec<QuantizedPoint>> = HashMap::new();
    for &Segment(a, b) in &boundary.0 {
        adj.entry(a).or_default().push(b);
        adj.entry(b).or_default().push(a);
    }

    // Walk from nodes in a fixed order so output is reproducible.
    let mut nodes: Vec<QuantizedPoint> = adj.keys().copied().collect();
    nodes.sort_unstable_by_key(|q| (q.0, q.1));
    for neighbors in adj.values_mut() {
        neighbors.sort_unstable_by_key(|q| (q.0, q.1));
    }

    // Helper to remove one undirected edge (a<->b)
    let remove_edge = |a: QuantizedPoint, b: QuantizedPoint, adj: &mut HashMap<QuantizedPoint, Vec<QuantizedPoint>>| {
        if let Some(v) = adj.get_mut(&a) {
            if let Some(pos) = v.iter().position(|&x| x == b) { v.remove(pos); }
        }
        if let Some(v) = adj.get_mut(&b) {
            if let Some(pos) = v.iter().position(|&x| x == a) { v.remove(pos); }
        }
    };

    let lookup = |q: &QuantizedPoint| ptmap.get(q).copied()
        .ok_or_else(|| anyhow!("[geom::outline] Missing coordinate for boundary vertex"));

    let mut rings: Vec<Vec<Coord<f64>>> = Vec::new();

    while let Some(&start) = nodes.iter().find(|&&n| adj.get(&n).is_some_and(|v| !v.is_empty())) {
        let mut ring_q: Vec<QuantizedPoint> = vec![start];

        let mut prev = start;
        let mut curr = {
            let v = adj.get(&start).ok_or_else(|| anyhow!("[geom::outline] Broken adjacency"))?;
            *v.last().ok_or_else(|| anyhow!("[geom::outline] Isolated vertex in boundary"))?
        };
        remove_edge(start, curr, &mut adj);

        // Follow edges until we close the loop
        while curr != start {
            ring_q.push(curr);
            let v = adj.get(&curr).ok_or_else(|| anyhow!("[geom::outline] Broken adjacency"))?;
            // Degenerate: open chain (shouldn't happen for boundaries of polygon unions)
            let Some(&next) = v.iter().find(|&&u| u != prev).or_else(|| v.first()) else { break };
            remove_edge(curr, next, &mut adj);
            prev = curr;
            curr = next;
        }

        if ring_q.len() >= 3 {
            rings.push(ring_q.iter().map(lookup).collect::<Result<Vec<_>>>()?);
        }
    }

    Ok(rings)
}
