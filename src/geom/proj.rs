//! Map projections: lon/lat degrees -> canvas coordinates (y down).
//!
//! A raw projection maps a point to unit-scale coordinates relative to its center. A
//! [`Projection`] adds a scale and translation, normally chosen by [`Projection::fit_size`].

use std::f64::consts::FRAC_PI_4;

use geo::{Coord, CoordsIter, LineString, MultiPolygon, Polygon};

use crate::types::GeoId;

/// Latitude limit for Mercator (the poles project to infinity).
const MERCATOR_MAX_LAT: f64 = 85.0511287798;

/// Albers equal-area conic with a rotated central meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    rotate: f64,        // degrees added to longitude before projecting
    n: f64,
    c: f64,
    r0: f64,
    origin: (f64, f64), // raw position of the configured center
}

/// Mercator, centered on a lon/lat point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    origin: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawProjection {
    Conic(Conic),
    Mercator(Mercator),
    /// Composite: lower 48 Albers plus Alaska and Hawaii insets.
    AlbersUsa { lower48: Conic, alaska: Conic, hawaii: Conic },
}

/// A raw projection with scale and translation applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    raw: RawProjection,
    scale: f64,
    translate: (f64, f64),
}

impl Conic {
    /// `rotate` is the longitude shift, `center` is in the rotated frame, `parallels` the two
    /// standard parallels (all in degrees).
    pub fn new(rotate: f64, center: [f64; 2], parallels: [f64; 2]) -> Self {
        let sy0 = parallels[0].to_radians().sin();
        let n = (sy0 + parallels[1].to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut conic = Self { rotate, n, c, r0, origin: (0.0, 0.0) };
        conic.origin = conic.forward(center[0].to_radians(), center[1].to_radians());
        conic
    }

    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let theta = lambda * self.n;
        (r * theta.sin(), self.r0 - r * theta.cos())
    }

    fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let lambda = wrap_longitude(coord.x + self.rotate).to_radians();
        let (x, y) = self.forward(lambda, coord.y.to_radians());
        (x - self.origin.0, self.origin.1 - y)
    }
}

impl Mercator {
    pub fn new(center: [f64; 2]) -> Self {
        Self { origin: Self::forward(center[0], center[1]) }
    }

    fn forward(lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
        (wrap_longitude(lon).to_radians(), (FRAC_PI_4 + phi / 2.0).tan().ln())
    }

    fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let (x, y) = Self::forward(coord.x, coord.y);
        (x - self.origin.0, self.origin.1 - y)
    }
}

impl Default for Mercator {
    fn default() -> Self { Self::new([0.0, 0.0]) }
}

impl RawProjection {
    /// Lower 48 Albers (the usual US national map).
    pub fn albers() -> Conic {
        Conic::new(96.0, [-0.6, 38.7], [29.5, 45.5])
    }

    /// Alaska, rotated so the Aleutians don't wrap around the antimeridian.
    pub fn alaska() -> Conic {
        Conic::new(154.0, [-2.0, 58.5], [55.0, 65.0])
    }

    pub fn albers_usa() -> Self {
        RawProjection::AlbersUsa {
            lower48: Self::albers(),
            alaska: Self::alaska(),
            hawaii: Conic::new(157.0, [-3.0, 19.9], [8.0, 18.0]),
        }
    }

    /// Unit-scale position of `coord`, or None if this projection doesn't draw it.
    pub fn project(&self, coord: &Coord<f64>) -> Option<(f64, f64)> {
        match self {
            RawProjection::Conic(conic) => Some(conic.project(coord)),
            RawProjection::Mercator(mercator) => Some(mercator.project(coord)),
            RawProjection::AlbersUsa { lower48, alaska, hawaii } => {
                let (lon, lat) = (coord.x, coord.y);
                if lat >= 50.0 && (lon <= -129.0 || lon >= 170.0) {
                    let (x, y) = alaska.project(coord);
                    Some((0.35 * x - 0.307, 0.35 * y + 0.201))
                } else if (18.0..=23.0).contains(&lat) && (-161.0..=-154.0).contains(&lon) {
                    let (x, y) = hawaii.project(coord);
                    Some((x - 0.205, y + 0.212))
                } else if (24.0..=50.0).contains(&lat) && (-125.0..=-66.0).contains(&lon) {
                    Some(lower48.project(coord))
                } else {
                    None
                }
            }
        }
    }
}

impl Projection {
    /// Unfitted projection (unit scale, no translation).
    pub fn new(raw: RawProjection) -> Self {
        Self { raw, scale: 1.0, translate: (0.0, 0.0) }
    }

    /// The national view: composite Albers with Alaska/Hawaii insets.
    pub fn national() -> Self {
        Self::new(RawProjection::albers_usa())
    }

    /// Drill-down projection for one state. Alaska and Hawaii use presets tuned for their
    /// extent; every other state uses plain Mercator.
    pub fn for_state(state: &GeoId) -> Self {
        match state.id() {
            "02" => Self::new(RawProjection::Conic(RawProjection::alaska())),
            "15" => Self::new(RawProjection::Mercator(Mercator::new([-157.0, 20.5]))),
            _ => Self::new(RawProjection::Mercator(Mercator::default())),
        }
    }

    #[inline] pub fn raw(&self) -> &RawProjection { &self.raw }
    #[inline] pub fn scale(&self) -> f64 { self.scale }
    #[inline] pub fn translate(&self) -> (f64, f64) { self.translate }

    /// Scale and translate so the projected bounding box of `shapes` fills `width x height`,
    /// centered. Leaves the projection unchanged if nothing projects.
    pub fn fit_size<'a>(mut self, width: f64, height: f64, shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Self {
        let mut bounds: Option<[f64; 4]> = None;
        for shape in shapes {
            for (x, y) in shape.coords_iter().filter_map(|c| self.raw.project(&c)) {
                let b = bounds.get_or_insert([x, y, x, y]);
                b[0] = b[0].min(x);
                b[1] = b[1].min(y);
                b[2] = b[2].max(x);
                b[3] = b[3].max(y);
            }
        }

        let Some([x0, y0, x1, y1]) = bounds else { return self };

        let kx = width / (x1 - x0);
        let ky = height / (y1 - y0);
        let k = match (kx.is_finite(), ky.is_finite()) {
            (true, true) => kx.min(ky),
            (true, false) => kx,
            (false, true) => ky,
            (false, false) => 1.0,
        };

        self.scale = k;
        self.translate = ((width - k * (x1 + x0)) / 2.0, (height - k * (y1 + y0)) / 2.0);
        self
    }

    /// Project a lon/lat coordinate to canvas coordinates.
    #[inline]
    pub fn project(&self, coord: &Coord<f64>) -> Option<(f64, f64)> {
        self.raw.project(coord)
            .map(|(x, y)| (self.translate.0 + self.scale * x, self.translate.1 + self.scale * y))
    }

    /// Project a ring; points the projection doesn't draw are dropped.
    pub fn project_ring(&self, ring: &LineString<f64>) -> LineString<f64> {
        ring.coords_iter()
            .filter_map(|c| self.project(&c))
            .map(|(x, y)| Coord { x, y })
            .collect()
    }

    /// Project a MultiPolygon into canvas space, dropping rings with fewer than 3 projected points.
    pub fn project_shape(&self, shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        let polygons = shape.0.iter()
            .filter_map(|polygon| {
                let exterior = self.project_ring(polygon.exterior());
                (exterior.0.len() >= 3).then(|| {
                    let interiors = polygon.interiors().iter()
                        .map(|ring| self.project_ring(ring))
                        .filter(|ring| ring.0.len() >= 3)
                        .collect();
                    Polygon::new(exterior, interiors)
                })
            })
            .collect();
        MultiPolygon(polygons)
    }
}

/// Normalize a longitude into [-180, 180).
fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn coord(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    fn bbox_shape(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon0, y: lat0), (x: lon1, y: lat0), (x: lon1, y: lat1), (x: lon0, y: lat1),
        ]])
    }

    #[test]
    fn wraps_longitudes() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(26.0), 26.0);
    }

    #[test]
    fn conic_center_maps_to_origin() {
        let albers = RawProjection::albers();
        let (x, y) = albers.project(&coord(-96.6, 38.7));
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);

        // north is up, east is right
        let (_, y_north) = albers.project(&coord(-96.6, 45.0));
        let (x_east, _) = albers.project(&coord(-90.0, 38.7));
        assert!(y_north < 0.0);
        assert!(x_east > 0.0);
    }

    #[test]
    fn mercator_is_monotonic() {
        let mercator = Mercator::default();
        let (x0, y0) = mercator.project(&coord(-120.0, 30.0));
        let (x1, y1) = mercator.project(&coord(-110.0, 40.0));
        assert!(x1 > x0);
        assert!(y1 < y0);
        assert!(mercator.project(&coord(0.0, 90.0)).1.is_finite());
    }

    #[test]
    fn albers_usa_drops_points_outside_the_us() {
        let usa = RawProjection::albers_usa();
        assert!(usa.project(&coord(-98.0, 39.0)).is_some());    // Kansas
        assert!(usa.project(&coord(-150.0, 61.0)).is_some());   // Alaska
        assert!(usa.project(&coord(178.0, 52.0)).is_some());    // Aleutians
        assert!(usa.project(&coord(-157.8, 21.3)).is_some());   // Oahu
        assert!(usa.project(&coord(-66.1, 18.4)).is_none());    // San Juan
        assert!(usa.project(&coord(2.35, 48.85)).is_none());    // Paris
    }

    #[test]
    fn fit_size_fills_the_extent() {
        let shape = bbox_shape(-110.0, 30.0, -100.0, 40.0);
        let projection = Projection::new(RawProjection::Mercator(Mercator::default()))
            .fit_size(760.0, 460.0, [&shape]);

        let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for c in shape.coords_iter() {
            let (x, y) = projection.project(&c).unwrap();
            x0 = x0.min(x); y0 = y0.min(y); x1 = x1.max(x); y1 = y1.max(y);
        }

        // one dimension touches the edges, the other is centered
        let eps = 1e-9;
        assert!(x0 >= -eps && y0 >= -eps && x1 <= 760.0 + eps && y1 <= 460.0 + eps);
        assert!((y1 - y0 - 460.0).abs() < 1e-6 || (x1 - x0 - 760.0).abs() < 1e-6);
        assert!(((x0 + x1) / 2.0 - 380.0).abs() < 1e-6);
        assert!(((y0 + y1) / 2.0 - 230.0).abs() < 1e-6);
    }

    #[test]
    fn fit_size_on_nothing_is_a_no_op() {
        let projection = Projection::national().fit_size(760.0, 460.0, std::iter::empty());
        assert_eq!(projection, Projection::national());
    }

    #[test]
    fn state_presets() {
        assert!(matches!(Projection::for_state(&GeoId::state(2)).raw(), RawProjection::Conic(_)));
        assert!(matches!(Projection::for_state(&GeoId::state(15)).raw(), RawProjection::Mercator(_)));
        assert!(matches!(Projection::for_state(&GeoId::state(6)).raw(), RawProjection::Mercator(m) if *m == Mercator::default()));
    }
}
