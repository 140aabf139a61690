//! Static country alias configuration.
//!
//! Two read-only tables: informal spellings mapped to a canonical display
//! name, and canonical keys mapped to a fixed three-letter code that
//! overrides the heuristic generator. Both are built once and shared by
//! reference for the whole run.

use lazy_static::lazy_static;
use std::collections::BTreeMap;
use tracing::debug;

use super::normalizer::normalize;
use crate::TARGET_RECONCILE;

// Kept short on purpose; anything not listed still seeds under its own spelling.
pub const ALIAS_GROUPS: &[(&str, &[&str])] = &[
    (
        "United States",
        &["usa", "u.s.a", "u.s.", "u.s", "united states of america"],
    ),
    (
        "United Kingdom",
        &["uk", "u.k.", "u.k", "great britain", "britain"],
    ),
    ("Netherlands", &["holland", "the netherlands"]),
    ("Russia", &["russian federation"]),
];

pub const CODE_OVERRIDES: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("United Kingdom", "GBR"),
    ("Netherlands", "NLD"),
];

lazy_static! {
    static ref BUILTIN: AliasTable = AliasTable::from_static(ALIAS_GROUPS, CODE_OVERRIDES);
}

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    // normalized alias -> canonical display name
    canonical_by_alias: BTreeMap<String, String>,
    // normalized canonical name -> fixed code
    code_overrides: BTreeMap<String, String>,
}

impl AliasTable {
    /// The process-wide built-in table.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    pub fn from_static(groups: &[(&str, &[&str])], overrides: &[(&str, &str)]) -> Self {
        let mut canonical_by_alias = BTreeMap::new();
        for (canonical, aliases) in groups {
            // The canonical spelling resolves to itself so it always wins the display tie-break
            canonical_by_alias.insert(normalize(canonical), canonical.to_string());
            for alias in aliases.iter() {
                let key = normalize(alias);
                if key.is_empty() {
                    continue;
                }
                canonical_by_alias.insert(key, canonical.to_string());
            }
        }

        let code_overrides = overrides
            .iter()
            .map(|(canonical, code)| (normalize(canonical), code.to_string()))
            .collect();

        Self {
            canonical_by_alias,
            code_overrides,
        }
    }

    /// Canonical display name for a normalized key, if the key is a known alias.
    pub fn canonical_for(&self, key: &str) -> Option<&str> {
        let canonical = self.canonical_by_alias.get(key).map(String::as_str);
        if let Some(canonical) = canonical {
            debug!(target: TARGET_RECONCILE, "Alias '{}' resolves to '{}'", key, canonical);
        }
        canonical
    }

    /// Fixed code for a canonical key, bypassing the heuristic generator.
    pub fn code_override(&self, key: &str) -> Option<&str> {
        self.code_overrides.get(key).map(String::as_str)
    }

    /// Every (normalized alias, canonical display) pair, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.canonical_by_alias
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }
}
