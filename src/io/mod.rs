//! IO module for format-specific reading and writing operations.
//!
//! Each format module handles a single file format:
//!
//! - `csv` - the tabular loan-balance dataset
//! - `topojson` - state and county boundary topologies
//! - `svg` - SVG export of rendered scenes
//! - `fetch` - retrieving raw bytes from local paths or URLs

pub(crate) mod csv;
pub(crate) mod fetch;
pub(crate) mod svg;
pub(crate) mod topojson;

pub use fetch::{Fetcher, Source};
