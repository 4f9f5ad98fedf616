//! Hard-coded digit widths for typefaces the generic probe gets wrong.
//!
//! Entries are keyed by family name and resolution class. They were validated
//! against the target rendering stack at the theme body size; remove one only
//! after re-validating that font.

use crate::Result;
use crate::column::check_width;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// (family, low resolution, max digit width in pixels)
const BUILTIN_OVERRIDES: &[(&str, bool, u32)] = &[
    ("Calibri", true, 7),
    ("Calibri", false, 9),
    ("Cambria", true, 7),
    ("Candara", true, 7),
    ("Corbel", true, 7),
    ("Constantia", true, 8),
    ("Franklin Gothic Book", true, 7),
    ("Tw Cen MT", true, 6),
];

/// One row of an override table as it appears in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub family: String,
    pub low_resolution: bool,
    pub width: u32,
}

/// Lookup from (family, resolution class) to a fixed max digit width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    widths: HashMap<(String, bool), OverrideEntry>,
}

impl OverrideTable {
    /// Empty table; every font goes through the generic probe
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries shipped with the crate
    pub fn builtin() -> Self {
        BUILTIN_OVERRIDES
            .iter()
            .fold(Self::new(), |table, &(family, low_resolution, width)| {
                table.with_entry(family, low_resolution, width)
            })
    }

    /// Parse a JSON array of `{"family", "low_resolution", "width"}` objects
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<OverrideEntry> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for entry in entries {
            check_width(entry.width)?;
            table.insert(entry);
        }
        debug!("Loaded {} override entries", table.len());
        Ok(table)
    }

    /// Serialize as a JSON array, sorted by family then resolution class
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries())?)
    }

    /// Add or replace an entry
    pub fn with_entry<S: Into<String>>(mut self, family: S, low_resolution: bool, width: u32) -> Self {
        self.insert(OverrideEntry {
            family: family.into(),
            low_resolution,
            width,
        });
        self
    }

    pub fn insert(&mut self, entry: OverrideEntry) {
        let key = (entry.family.to_ascii_lowercase(), entry.low_resolution);
        self.widths.insert(key, entry);
    }

    /// Entries of `other` replace matching entries of `self`
    pub fn merge(mut self, other: OverrideTable) -> Self {
        self.widths.extend(other.widths);
        self
    }

    /// Width for `family` in the given resolution class, matched case-insensitively
    pub fn get(&self, family: &str, low_resolution: bool) -> Option<u32> {
        self.widths
            .get(&(family.to_ascii_lowercase(), low_resolution))
            .map(|entry| entry.width)
    }

    /// All entries, sorted
    pub fn entries(&self) -> Vec<OverrideEntry> {
        let mut entries: Vec<OverrideEntry> = self.widths.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.family
                .cmp(&b.family)
                .then(a.low_resolution.cmp(&b.low_resolution))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SizingError;

    #[test]
    fn test_builtin_lookup() {
        let table = OverrideTable::builtin();
        assert_eq!(table.len(), BUILTIN_OVERRIDES.len());
        assert_eq!(table.get("Calibri", true), Some(7));
        assert_eq!(table.get("calibri", false), Some(9));
        assert_eq!(table.get("Cambria", false), None);
        assert_eq!(table.get("Arial", true), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"family": "Aptos", "low_resolution": true, "width": 7},
            {"family": "Aptos", "low_resolution": false, "width": 9}
        ]"#;
        let table = OverrideTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("APTOS", false), Some(9));
    }

    #[test]
    fn test_from_json_rejects_degenerate_width() {
        let json = r#"[{"family": "Broken", "low_resolution": true, "width": 1}]"#;
        assert!(matches!(
            OverrideTable::from_json(json),
            Err(SizingError::InvalidMetric(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_huge_width() {
        let json = r#"[{"family": "Broken", "low_resolution": false, "width": 600000000}]"#;
        assert!(matches!(
            OverrideTable::from_json(json),
            Err(SizingError::InvalidMetric(_))
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            OverrideTable::from_json("{not json"),
            Err(SizingError::OverrideTable(_))
        ));
    }

    #[test]
    fn test_merge_replaces_existing() {
        let loaded = OverrideTable::new().with_entry("CALIBRI", true, 8);
        let table = OverrideTable::builtin().merge(loaded);
        assert_eq!(table.get("Calibri", true), Some(8));
        assert_eq!(table.len(), BUILTIN_OVERRIDES.len());
    }

    #[test]
    fn test_json_export_reloads() {
        let table = OverrideTable::builtin();
        let json = table.to_json().unwrap();
        assert_eq!(OverrideTable::from_json(&json).unwrap(), table);
    }
}
