// 🗂️ Mapping Table - Hand-curated company-name aliases
//
// Problem solved:
// - "CG Logistics" and "CGL" are the same customer, but no heuristic can
//   derive that: abbreviations share almost no characters or words
// - Each entry encodes authoritative human knowledge, consulted BEFORE
//   any heuristic scoring
//
// The table is built once and never mutated. Callers (and tests) inject
// their own table instead of touching shared global state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Curated map from a canonical company name to its known textual
/// variants across vendor systems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl MappingTable {
    /// Empty table (heuristics only).
    pub fn new() -> Self {
        MappingTable {
            entries: BTreeMap::new(),
        }
    }

    /// Table pre-loaded with the portal's known alias sets.
    pub fn with_defaults() -> Self {
        MappingTable::from_entries([
            (
                "MarketXcel",
                vec!["Market Xcel", "MarketXcel", "market excel", "mx"],
            ),
            (
                "CG Logistics",
                vec!["CGL", "C G Logistics", "CG Logistics", "cgl logistics"],
            ),
            (
                "Digtinctive Pune",
                vec!["Digtinctive", "Digtinctive Pune", "distinctive"],
            ),
            ("Aiqmen", vec!["Aiqmen", "Aquimen"]),
            ("FIICC", vec!["FIICC", "FIC", "FICC"]),
            ("SOC", vec!["SOC", "SOC Alerts"]),
        ])
    }

    /// Build a table from (canonical, variants) pairs.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        MappingTable {
            entries: entries
                .into_iter()
                .map(|(canonical, variants)| {
                    (
                        canonical.into(),
                        variants.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Known variants for a canonical name, if the name is in the table.
    pub fn variants(&self, canonical: &str) -> Option<&[String]> {
        self.entries.get(canonical).map(Vec::as_slice)
    }

    /// Whether the table has an entry for this canonical name.
    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    /// All canonical names, in sorted order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
