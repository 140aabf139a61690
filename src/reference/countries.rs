use std::collections::BTreeMap;
use tracing::{debug, info};

use super::aliases::AliasTable;
use super::ids::{heuristic_code, CodeAllocator, IdAllocator};
use super::normalizer::{clean_display, display_from_key, fold_case, normalize, slugify};
use super::types::{Country, DEFAULT_COUNTRY_CODE, DEFAULT_COUNTRY_ID};
use crate::TARGET_RECONCILE;

/// Countries produced by one reconciliation run.
///
/// Countries are keyed by their canonical key (the normalized canonical name
/// for aliased spellings, the normalized spelling itself otherwise). Every
/// normalized key observed in the raw values is remembered alongside the
/// canonical key it collapsed into.
#[derive(Debug, Clone, Default)]
pub struct ReconciledCountries {
    by_key: BTreeMap<String, Country>,
    observed: BTreeMap<String, String>,
}

impl ReconciledCountries {
    /// Countries in canonical-key order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.by_key.values()
    }

    /// Every normalized key seen in the raw values with the country it produced.
    pub fn observed_keys(&self) -> impl Iterator<Item = (&str, &Country)> {
        self.observed
            .iter()
            .filter_map(|(observed, canonical)| {
                self.by_key
                    .get(canonical)
                    .map(|country| (observed.as_str(), country))
            })
    }

    /// Country by canonical key only.
    pub fn get(&self, canonical_key: &str) -> Option<&Country> {
        self.by_key.get(canonical_key)
    }

    /// Country for a normalized key: an observed spelling, a canonical key,
    /// or a static alias of a country present in this run.
    pub fn lookup(&self, key: &str, aliases: &AliasTable) -> Option<&Country> {
        if key.is_empty() {
            return None;
        }
        if let Some(canonical) = self.observed.get(key) {
            return self.by_key.get(canonical);
        }
        if let Some(country) = self.by_key.get(key) {
            return Some(country);
        }
        aliases
            .canonical_for(key)
            .and_then(|canonical| self.by_key.get(&normalize(canonical)))
    }

    /// Country for a raw display string, normalizing it first.
    pub fn resolve(&self, raw: &str, aliases: &AliasTable) -> Option<&Country> {
        self.lookup(&normalize(raw), aliases)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Pending display candidate for one canonical key.
struct Candidate {
    display: String,
}

impl Candidate {
    // Case-insensitive first, ordinal second, so the winner never depends on input order
    fn sort_key(display: &str) -> (String, &str) {
        (fold_case(display), display)
    }

    fn offer(&mut self, display: String) {
        if Self::sort_key(&display) < Self::sort_key(&self.display) {
            self.display = display;
        }
    }
}

/// Deduplicates raw country spellings into canonical countries with
/// stable identifiers and codes.
pub struct CountryReconciler<'a> {
    aliases: &'a AliasTable,
}

impl<'a> CountryReconciler<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    pub fn reconcile<I, S>(&self, raw_values: I) -> ReconciledCountries
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates: BTreeMap<String, Candidate> = BTreeMap::new();
        let mut observed: BTreeMap<String, String> = BTreeMap::new();
        let mut discarded = 0usize;

        for raw in raw_values {
            let raw = raw.as_ref();
            let key = normalize(&clean_display(raw));
            if key.is_empty() {
                discarded += 1;
                continue;
            }

            let (canonical_key, display) = match self.aliases.canonical_for(&key) {
                Some(canonical) => (normalize(canonical), canonical.to_string()),
                None => (key.clone(), display_from_key(&key)),
            };

            observed.insert(key, canonical_key.clone());
            match candidates.get_mut(&canonical_key) {
                Some(candidate) => candidate.offer(display),
                None => {
                    candidates.insert(canonical_key, Candidate { display });
                }
            }
        }

        if discarded > 0 {
            debug!(
                target: TARGET_RECONCILE,
                "Discarded {} raw values with no usable letters", discarded
            );
        }

        // BTreeMap iteration fixes the processing order by canonical key
        let mut ids = IdAllocator::reserving(DEFAULT_COUNTRY_ID);
        let mut codes = CodeAllocator::reserving(DEFAULT_COUNTRY_CODE);
        let mut by_key = BTreeMap::new();

        for (key, candidate) in candidates {
            let display = candidate.display;
            let id = ids.allocate(&format!("COUNTRY_{}", slugify(&display)));

            let code = match self.aliases.code_override(&key) {
                Some(code) => code.to_string(),
                None => heuristic_code(&display),
            };
            let code = codes.allocate(&code);

            debug!(
                target: TARGET_RECONCILE,
                "Country '{}' -> {} [{}]", key, id, code
            );
            by_key.insert(
                key,
                Country {
                    id,
                    code,
                    name: display,
                },
            );
        }

        info!(
            target: TARGET_RECONCILE,
            "Reconciled {} distinct spellings into {} countries",
            observed.len(),
            by_key.len()
        );

        ReconciledCountries { by_key, observed }
    }
}
