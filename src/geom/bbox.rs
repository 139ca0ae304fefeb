use geo::Rect;
use rstar::{RTreeObject, AABB};

/// Screen-space bounds of one drawn shape, keyed by its position in the layer.
#[derive(Debug, Clone)]
pub(super) struct BoundingBox {
    idx: usize, // position of the shape in `Geometries`
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(super) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    #[inline] pub(super) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}
