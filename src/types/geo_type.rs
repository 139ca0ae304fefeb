#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeoType {
    State,      // Highest-level entity
    County,     // County -> State
}

impl GeoType {
    pub fn to_str(&self) -> &'static str {
        match self {
            GeoType::State => "state",
            GeoType::County => "county",
        }
    }

    /// Number of digits in a zero-padded FIPS code at this level.
    pub fn code_len(&self) -> usize {
        match self {
            GeoType::State => 2,
            GeoType::County => 5,
        }
    }
}
