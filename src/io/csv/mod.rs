//! CSV format operations for the tabular dataset.

mod read;

pub(crate) use read::*;
