use std::{fmt, sync::Arc};

use anyhow::{ensure, Result};

use super::geo_type::GeoType;

/// Stable key for a state or county.
/// Keeps the zero-padded FIPS text (e.g. "06", "06001") without repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeoId {
    pub ty: GeoType,
    pub id: Arc<str>, // e.g., "06" for state, "06001" for county
}

impl GeoId {
    /// Build a GeoId from a textual or numeric code, left-padding with zeros to the level's width.
    pub fn new(ty: GeoType, code: &str) -> Result<Self> {
        let code = code.trim();
        ensure!(!code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()),
            "[types::geo_id] {} code {:?} is not numeric", ty.to_str(), code);
        ensure!(code.len() <= ty.code_len(),
            "[types::geo_id] {} code {:?} is longer than {} digits", ty.to_str(), code, ty.code_len());

        Ok(Self { ty, id: Arc::from(format!("{:0>width$}", code, width = ty.code_len())) })
    }

    /// 2-digit state id from a numeric state code.
    pub fn state(state: u8) -> Self {
        Self { ty: GeoType::State, id: Arc::from(format!("{state:02}")) }
    }

    /// 5-digit county id from numeric state and county codes (state + county, zero-padded).
    pub fn county(state: u8, county: u16) -> Self {
        Self { ty: GeoType::County, id: Arc::from(format!("{state:02}{county:03}")) }
    }

    #[inline] pub fn id(&self) -> &str { &self.id }

    /// Whether this id lies within `parent` (FIPS prefix match).
    #[inline]
    pub fn is_within(&self, parent: &GeoId) -> bool {
        self.ty > parent.ty && self.id.starts_with(parent.id())
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_numeric_codes() {
        assert_eq!(GeoId::new(GeoType::State, "6").unwrap().id(), "06");
        assert_eq!(GeoId::new(GeoType::County, "6001").unwrap().id(), "06001");
        assert_eq!(GeoId::county(6, 1).id(), "06001");
        assert_eq!(GeoId::state(48).id(), "48");
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(GeoId::new(GeoType::State, "").is_err());
        assert!(GeoId::new(GeoType::State, "1a").is_err());
        assert!(GeoId::new(GeoType::State, "123").is_err());
    }

    #[test]
    fn containment() {
        let alameda = GeoId::county(6, 1);
        let california = GeoId::state(6);
        assert!(alameda.is_within(&california));
        assert!(!alameda.is_within(&GeoId::state(60)));
        assert!(!california.is_within(&california));
    }
}
