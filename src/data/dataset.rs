use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{Context, Result};

use crate::{config::{Columns, POOLED}, io::csv::read_observations};
use super::observation::Observation;

/// The full set of observations, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Parse a delimited table with a header row.
    pub fn from_csv_bytes(bytes: &[u8], columns: &Columns) -> Result<Self> {
        Ok(Self::new(read_observations(bytes, columns)?))
    }

    pub fn from_csv_path(path: &Path, columns: &Columns) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[data::dataset] Failed to open CSV file: {}", path.display()))?;
        Self::from_csv_bytes(&bytes, columns)
            .with_context(|| format!("[data::dataset] Failed to read CSV from {}", path.display()))
    }

    #[inline] pub fn rows(&self) -> &[Observation] { &self.rows }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct category labels in selector order: "Pooled" first (if present), the rest sorted.
    pub fn categories(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.rows.iter().map(|row| row.category.as_str()).collect();

        let pooled = distinct.contains(POOLED).then(|| POOLED.to_string());
        pooled.into_iter()
            .chain(distinct.into_iter().filter(|&c| c != POOLED).map(str::to_string))
            .collect()
    }

    /// `preferred` if present, otherwise the first category in selector order.
    pub fn default_category(&self, preferred: &str) -> Option<String> {
        let categories = self.categories();
        if categories.iter().any(|c| c == preferred) {
            Some(preferred.to_string())
        } else {
            categories.into_iter().next()
        }
    }

    #[inline]
    pub fn has_category(&self, category: &str) -> bool {
        self.rows.iter().any(|row| row.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str) -> Observation {
        Observation {
            state: 6,
            county: 1,
            category: category.into(),
            percentile: -9,
            name: "Alameda County".into(),
            value: 1.0,
        }
    }

    #[test]
    fn pooled_is_listed_first() {
        let dataset = Dataset::new(vec![row("White"), row("Black"), row("Pooled"), row("Asian"), row("Black")]);
        assert_eq!(dataset.categories(), vec!["Pooled", "Asian", "Black", "White"]);
        assert_eq!(dataset.default_category(POOLED).as_deref(), Some("Pooled"));
    }

    #[test]
    fn default_falls_back_to_first_sorted() {
        let dataset = Dataset::new(vec![row("White"), row("Black")]);
        assert_eq!(dataset.categories(), vec!["Black", "White"]);
        assert_eq!(dataset.default_category(POOLED).as_deref(), Some("Black"));
        assert_eq!(Dataset::default().default_category(POOLED), None);
    }

    #[test]
    fn reads_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.csv");
        fs::write(&path, "par_state,par_county,kid_race,par_pctile,county_name,shrunk_xkid_stubalance2020\n6,1,Asian,-9,Alameda County,1234.5\n").unwrap();

        let dataset = Dataset::from_csv_path(&path, &Columns::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.has_category("Asian"));
        assert!(!dataset.has_category("Pooled"));
        assert_eq!(dataset.rows()[0].value, 1234.5);

        assert!(Dataset::from_csv_path(&dir.path().join("missing.csv"), &Columns::default()).is_err());
    }
}
