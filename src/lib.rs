#![doc = "Student-loan choropleth public API"]
mod aggregate;
mod config;
mod data;
mod geom;
mod io;
mod loader;
mod render;
mod scale;
mod types;
mod view;

#[doc(inline)]
pub use aggregate::AggregateSlice;

#[doc(inline)]
pub use config::{Canvas, Columns, MapConfig, Sources, Stroke, Style, OVERALL_PERCENTILE, POOLED};

#[doc(inline)]
pub use data::{Dataset, Observation};

#[doc(inline)]
pub use geom::{Conic, Feature, Mercator, Projection, RawProjection};

#[doc(inline)]
pub use io::{Fetcher, Source};

#[doc(inline)]
pub use loader::{load, Atlas};

#[doc(inline)]
pub use render::{
    format_value, national_projection, render_national, render_state, state_projection,
    Action, Layer, LayerKind, Scene, Shape, Tooltip,
};

#[doc(inline)]
pub use scale::{ColorScale, Rgb};

#[doc(inline)]
pub use types::{state_name, GeoId, GeoType};

#[doc(inline)]
pub use view::{Event, ViewController, ViewState};
