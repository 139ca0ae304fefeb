use geo::{BoundingRect, Contains, MultiPolygon, Point};
use rstar::{RTree, AABB};

use crate::geom::BoundingBox;

/// A collection of MultiPolygons with an R-tree over their bounding boxes for point queries.
#[derive(Debug, Clone, Default)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    /// Empty shapes are kept (so indices line up) but never returned by queries.
    pub(crate) fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|bbox| BoundingBox::new(i, bbox)))
                    .collect()
            ),
            shapes,
        }
    }

    /// Get the number of MultiPolygons.
    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    /// Indices of all shapes containing `(x, y)`, in ascending order.
    pub(crate) fn locate(&self, x: f64, y: f64) -> Vec<usize> {
        let point = Point::new(x, y);
        let mut hits = self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|bbox| bbox.idx())
            .filter(|&i| self.shapes[i].contains(&point))
            .collect::<Vec<_>>();
        hits.sort_unstable();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]])
    }

    #[test]
    fn locates_containing_shapes() {
        let geoms = Geometries::new(vec![square(0.0, 0.0, 10.0), MultiPolygon(vec![]), square(5.0, 5.0, 10.0)]);
        assert_eq!(geoms.len(), 3);

        assert_eq!(geoms.locate(1.0, 1.0), vec![0]);
        assert_eq!(geoms.locate(7.0, 7.0), vec![0, 2]);
        assert_eq!(geoms.locate(12.0, 12.0), vec![2]);
        assert!(geoms.locate(50.0, 50.0).is_empty());
    }
}
