//! Turning aggregates and boundaries into drawable scenes.
//!
//! A [`Scene`] is a plain description of what is on screen: three layers of filled or stroked
//! paths in canvas coordinates, each with an optional tooltip and click action. Scenes can be
//! hit-tested and written out as SVG.

mod drilldown;
mod format;
mod national;
mod scene;

pub use drilldown::{render_state, state_projection};
pub use format::format_value;
pub use national::{national_projection, render_national};
pub use scene::{Action, Layer, LayerKind, Scene, Shape, Tooltip};
