//! Per-category aggregates: county values, county names and state means.

use std::collections::BTreeMap;

use crate::{data::Dataset, types::GeoId};

/// Lookups derived from the observations of one category at one percentile bucket.
///
/// Counties and states without a finite value are absent from the value maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSlice {
    category: String,
    county_values: BTreeMap<GeoId, f64>,
    county_names: BTreeMap<GeoId, String>,
    state_means: BTreeMap<GeoId, f64>,
}

impl AggregateSlice {
    /// Build the slice for `category` from rows whose percentile bucket equals `percentile`.
    pub fn rebuild(dataset: &Dataset, category: &str, percentile: i32) -> Self {
        let mut county_values = BTreeMap::new();
        let mut county_names = BTreeMap::new();
        let mut sums: BTreeMap<GeoId, (f64, usize)> = BTreeMap::new();

        for row in dataset.rows().iter().filter(|row| row.matches(category, percentile)) {
            let county = row.county_id();

            // Later rows for the same county replace earlier ones.
            county_names.insert(county.clone(), row.name.clone());
            if row.value.is_finite() {
                county_values.insert(county, row.value);

                let (sum, count) = sums.entry(row.state_id()).or_insert((0.0, 0));
                *sum += row.value;
                *count += 1;
            } else {
                county_values.remove(&county);
            }
        }

        // Only states with at least one finite value ever get an entry in `sums`.
        let state_means = sums.into_iter()
            .map(|(state, (sum, count))| (state, sum / count as f64))
            .collect::<BTreeMap<_, _>>();

        log::debug!(
            "[aggregate] {category:?}: {} counties with values, {} states with means",
            county_values.len(), state_means.len(),
        );

        Self { category: category.to_string(), county_values, county_names, state_means }
    }

    #[inline] pub fn category(&self) -> &str { &self.category }

    #[inline] pub fn county_value(&self, county: &GeoId) -> Option<f64> { self.county_values.get(county).copied() }

    #[inline] pub fn county_name(&self, county: &GeoId) -> Option<&str> { self.county_names.get(county).map(String::as_str) }

    #[inline] pub fn state_mean(&self, state: &GeoId) -> Option<f64> { self.state_means.get(state).copied() }

    /// County values, keyed by 5-digit id.
    #[inline] pub fn county_values(&self) -> &BTreeMap<GeoId, f64> { &self.county_values }

    /// State means, keyed by 2-digit id.
    #[inline] pub fn state_means(&self) -> &BTreeMap<GeoId, f64> { &self.state_means }
}
