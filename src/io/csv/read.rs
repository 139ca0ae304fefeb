//! CSV reading operations.

use std::io::Cursor;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader, StringChunked}};

use crate::{config::Columns, data::Observation};

/// Reads CSV bytes into a Polars DataFrame with every column kept as text.
pub(crate) fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    // No schema inference: codes keep their leading zeros and bad numbers don't reject the column
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));

    CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()
        .context("[io::csv::read] Failed to read CSV from bytes")
}

/// Parse the loan-balance table into observations.
///
/// Numeric columns are coerced: an empty or non-numeric value becomes NaN. Rows whose state,
/// county or percentile codes are not integers can never be keyed or filtered and are dropped.
pub(crate) fn read_observations(bytes: &[u8], columns: &Columns) -> Result<Vec<Observation>> {
    let df = read_csv_bytes(bytes)?;

    let states = string_column(&df, &columns.state)?;
    let counties = string_column(&df, &columns.county)?;
    let categories = string_column(&df, &columns.category)?;
    let percentiles = string_column(&df, &columns.percentile)?;
    let names = string_column(&df, &columns.name)?;
    let values = string_column(&df, &columns.value)?;

    let mut rows = Vec::with_capacity(df.height());
    let mut dropped = 0usize;

    for (((((state, county), category), percentile), name), value) in states.into_iter()
        .zip(counties.into_iter())
        .zip(categories.into_iter())
        .zip(percentiles.into_iter())
        .zip(names.into_iter())
        .zip(values.into_iter())
    {
        let state = parse_integer(state).and_then(|v| u8::try_from(v).ok());
        let county = parse_integer(county).and_then(|v| u16::try_from(v).ok());
        let percentile = parse_integer(percentile).and_then(|v| i32::try_from(v).ok());

        let (Some(state), Some(county), Some(percentile)) = (state, county, percentile) else {
            dropped += 1;
            continue;
        };

        rows.push(Observation {
            state,
            county,
            category: category.unwrap_or_default().to_string(),
            percentile,
            name: name.unwrap_or_default().to_string(),
            value: parse_number(value),
        });
    }

    if dropped > 0 {
        log::warn!("[io::csv::read] dropped {dropped} rows with non-numeric state/county/percentile codes");
    }
    log::debug!("[io::csv::read] parsed {} observations", rows.len());

    Ok(rows)
}

/// Look up a required column as text.
fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    df.column(name)
        .with_context(|| format!("[io::csv::read] Missing required column {name:?}"))?
        .as_materialized_series()
        .str()
        .with_context(|| format!("[io::csv::read] Column {name:?} is not text"))
}

/// Numeric coercion: anything that isn't a number becomes NaN.
pub(crate) fn parse_number(field: Option<&str>) -> f64 {
    field.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Integral numeric coercion ("6", "06" and "6.0" are all 6).
fn parse_integer(field: Option<&str>) -> Option<i64> {
    let v = parse_number(field);
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}
