//! Sequential color scales for the choropleth fills.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// ColorBrewer "Reds", light to dark. Every channel is non-increasing along the ramp.
const REDS: [Rgb; 9] = [
    Rgb { r: 0xff, g: 0xf5, b: 0xf0 },
    Rgb { r: 0xfe, g: 0xe0, b: 0xd2 },
    Rgb { r: 0xfc, g: 0xbb, b: 0xa1 },
    Rgb { r: 0xfc, g: 0x92, b: 0x72 },
    Rgb { r: 0xfb, g: 0x6a, b: 0x4a },
    Rgb { r: 0xef, g: 0x3b, b: 0x2c },
    Rgb { r: 0xcb, g: 0x18, b: 0x1d },
    Rgb { r: 0xa5, g: 0x0f, b: 0x15 },
    Rgb { r: 0x67, g: 0x00, b: 0x0d },
];

/// Linear map from `[min, max]` onto the Reds ramp, clamped at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Domain = extent of the finite values; `[0, 1]` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let extent = values.into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            });

        let (min, max) = extent.unwrap_or((0.0, 1.0));
        Self { min, max }
    }

    #[inline] pub fn domain(&self) -> (f64, f64) { (self.min, self.max) }

    /// Position of `value` along the ramp in [0, 1]. A single-valued domain maps to the middle.
    pub fn position(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            ((value - self.min) / range).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Color for a finite value. Values outside the domain take the endpoint colors.
    pub fn color(&self, value: f64) -> Rgb {
        interpolate_reds(self.position(value))
    }

    /// CSS fill for a possibly-missing value; missing and non-finite values get `no_data`.
    pub fn fill(&self, value: Option<f64>, no_data: &str) -> String {
        match value {
            Some(v) if v.is_finite() => self.color(v).to_string(),
            _ => no_data.to_string(),
        }
    }
}

/// Uniform cubic B-spline through the Reds stops, `t` in [0, 1]. The curve starts and ends on
/// the first and last stops; in between it is smoothed, so it passes near but not through the
/// inner stops.
fn interpolate_reds(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let n = REDS.len() - 1;
    let i = ((t * n as f64).floor() as usize).min(n - 1);
    let local = (t - i as f64 / n as f64) * n as f64;

    let channel = |get: fn(&Rgb) -> u8| -> u8 {
        let v1 = get(&REDS[i]) as f64;
        let v2 = get(&REDS[i + 1]) as f64;
        // phantom control points past either end keep the endpoints exact
        let v0 = if i > 0 { get(&REDS[i - 1]) as f64 } else { 2.0 * v1 - v2 };
        let v3 = if i < n - 1 { get(&REDS[i + 2]) as f64 } else { 2.0 * v2 - v1 };
        basis(local, v0, v1, v2, v3).round().clamp(0.0, 255.0) as u8
    };

    Rgb { r: channel(|c| c.r), g: channel(|c| c.g), b: channel(|c| c.b) }
}

/// One segment of a uniform cubic B-spline, `t` in [0, 1].
fn basis(t: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    ((1.0 - 3.0 * t + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3) / 6.0
}
