use crate::types::GeoId;

/// One row of the loan-balance dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub state: u8,          // 2-digit state FIPS
    pub county: u16,        // 3-digit county FIPS, scoped within state
    pub category: String,   // Race group, or "Pooled"
    pub percentile: i32,    // Parental income percentile bucket (-9 = overall)
    pub name: String,       // County display name
    pub value: f64,         // Average balance; NaN when missing
}

impl Observation {
    /// 5-digit county identifier (state + county, zero-padded).
    #[inline] pub fn county_id(&self) -> GeoId { GeoId::county(self.state, self.county) }

    /// 2-digit state identifier.
    #[inline] pub fn state_id(&self) -> GeoId { GeoId::state(self.state) }

    /// Whether the row belongs to `category` at percentile bucket `percentile`.
    #[inline]
    pub fn matches(&self, category: &str, percentile: i32) -> bool {
        self.category == category && self.percentile == percentile
    }
}
