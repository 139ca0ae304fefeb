mod bbox;
mod feature;
mod geom;
mod outline;
mod proj;

use bbox::BoundingBox;
pub use feature::Feature;
pub(crate) use geom::Geometries;
pub(crate) use outline::outline_rings;
pub use proj::{Conic, Mercator, Projection, RawProjection};
