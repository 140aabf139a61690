use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, instrument};

use super::aliases::AliasTable;
use super::countries::{CountryReconciler, ReconciledCountries};
use super::normalizer::normalize;
use super::regions::RegionReconciler;
use super::types::{AliasEntry, Country, Region};
use crate::TARGET_RECONCILE;

/// The three ordered record sets handed to an output sink.
///
/// Countries and regions lead with their sentinel records; aliases are
/// ordered by `(alias_key, country_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSeed {
    pub countries: Vec<Country>,
    pub regions: Vec<Region>,
    pub aliases: Vec<AliasEntry>,
}

impl ReferenceSeed {
    /// Run the full reconciliation over one legacy snapshot.
    #[instrument(target = "reconcile", level = "info", skip_all)]
    pub fn build<V, S, H, P, R>(raw_values: V, hierarchy: H, aliases: &AliasTable) -> Self
    where
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
        H: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let reconciled = CountryReconciler::new(aliases).reconcile(raw_values);
        let regions = RegionReconciler::new(aliases).reconcile(&reconciled, hierarchy);
        let seed = Self::assemble(&reconciled, regions, aliases);

        info!(
            target: TARGET_RECONCILE,
            "Seed ready: {} countries, {} regions, {} aliases",
            seed.countries.len(),
            seed.regions.len(),
            seed.aliases.len()
        );
        seed
    }

    fn assemble(
        reconciled: &ReconciledCountries,
        regions: Vec<Region>,
        aliases: &AliasTable,
    ) -> Self {
        let mut countries = vec![Country::sentinel()];
        countries.extend(reconciled.countries().cloned());

        let mut all_regions = vec![Region::sentinel()];
        all_regions.extend(regions);

        Self {
            countries,
            regions: all_regions,
            aliases: alias_entries(reconciled, aliases),
        }
    }
}

/// Observed spellings plus every static alias whose canonical country exists.
pub fn alias_entries(reconciled: &ReconciledCountries, aliases: &AliasTable) -> Vec<AliasEntry> {
    let mut entries: BTreeSet<AliasEntry> = reconciled
        .observed_keys()
        .map(|(key, country)| AliasEntry::new(key, &country.id))
        .collect();

    for (alias_key, canonical) in aliases.entries() {
        if let Some(country) = reconciled.get(&normalize(canonical)) {
            entries.insert(AliasEntry::new(alias_key, &country.id));
        }
    }

    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::types::*;
    use std::collections::HashSet;

    const NO_EDGES: [(&str, &str); 0] = [];

    #[test]
    fn test_empty_input_yields_sentinels_only() {
        let seed = ReferenceSeed::build(Vec::<String>::new(), NO_EDGES, AliasTable::builtin());
        assert_eq!(seed.countries, vec![Country::sentinel()]);
        assert_eq!(seed.countries[0].id, DEFAULT_COUNTRY_ID);
        assert_eq!(seed.countries[0].code, DEFAULT_COUNTRY_CODE);
        assert_eq!(seed.countries[0].name, DEFAULT_COUNTRY_NAME);
        assert_eq!(seed.regions, vec![Region::sentinel()]);
        assert_eq!(seed.regions[0].country_id, DEFAULT_COUNTRY_ID);
        assert_eq!(seed.regions[0].name, DEFAULT_REGION_NAME);
        assert!(seed.aliases.is_empty());
    }

    #[test]
    fn test_noise_only_input_still_has_sentinels() {
        let seed = ReferenceSeed::build(["123", "  ", "#"], NO_EDGES, AliasTable::builtin());
        assert_eq!(seed.countries.len(), 1);
        assert_eq!(seed.regions.len(), 1);
    }

    #[test]
    fn test_alias_entries_cover_observed_and_static() {
        let seed = ReferenceSeed::build(["U.S.A.", "France"], NO_EDGES, AliasTable::builtin());
        let keys: Vec<(&str, &str)> = seed
            .aliases
            .iter()
            .map(|a| (a.alias_key.as_str(), a.country_id.as_str()))
            .collect();

        assert!(keys.contains(&("u s a", "COUNTRY_UNITED_STATES")));
        assert!(keys.contains(&("france", "COUNTRY_FRANCE")));
        assert!(keys.contains(&("usa", "COUNTRY_UNITED_STATES")));
        assert!(keys.contains(&("united states of america", "COUNTRY_UNITED_STATES")));
        assert!(keys.contains(&("united states", "COUNTRY_UNITED_STATES")));
        // United Kingdom never appeared, so none of its aliases are emitted
        assert!(!keys.iter().any(|(key, _)| *key == "uk" || *key == "britain"));

        let mut sorted = seed.aliases.clone();
        sorted.sort();
        assert_eq!(sorted, seed.aliases);
    }

    #[test]
    fn test_referential_integrity() {
        let seed = ReferenceSeed::build(
            ["Japan", "Brazil", "Holland", "Default"],
            [("Japan", "Kanto"), ("The Netherlands", "Zeeland"), ("Mars", "Olympus")],
            AliasTable::builtin(),
        );

        let country_ids: HashSet<_> = seed.countries.iter().map(|c| c.id.as_str()).collect();
        let codes: HashSet<_> = seed.countries.iter().map(|c| c.code.as_str()).collect();
        let region_ids: HashSet<_> = seed.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(country_ids.len(), seed.countries.len());
        assert_eq!(codes.len(), seed.countries.len());
        assert_eq!(region_ids.len(), seed.regions.len());

        for region in &seed.regions {
            assert!(country_ids.contains(region.country_id.as_str()));
        }
        for alias in &seed.aliases {
            assert!(country_ids.contains(alias.country_id.as_str()));
        }
        for country in seed.countries.iter().skip(1) {
            assert!(seed
                .regions
                .iter()
                .any(|r| r.country_id == country.id && r.name == FALLBACK_REGION_NAME));
        }
        assert!(seed
            .regions
            .iter()
            .any(|r| r.country_id == "COUNTRY_NETHERLANDS" && r.name == "Zeeland"));
        assert!(!seed.regions.iter().any(|r| r.name == "Olympus"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let values = ["Peru", "peru", "UK", "Great Britain", "Chile", "Chad", "China"];
        let edges = [("Peru", "Lima"), ("U.K.", "Wales"), ("Chile", "Maule")];

        let first = ReferenceSeed::build(values, edges, AliasTable::builtin());
        let mut shuffled_values = values.to_vec();
        shuffled_values.rotate_left(3);
        let mut shuffled_edges = edges.to_vec();
        shuffled_edges.reverse();
        let second = ReferenceSeed::build(shuffled_values, shuffled_edges, AliasTable::builtin());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
