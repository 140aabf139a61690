use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::aliases::AliasTable;
use super::countries::ReconciledCountries;
use super::ids::IdAllocator;
use super::normalizer::{clean_display, normalize, slugify};
use super::types::{Region, DEFAULT_REGION_ID, FALLBACK_REGION_NAME};
use crate::TARGET_RECONCILE;

/// Rebuilds the legacy region hierarchy under reconciled countries.
pub struct RegionReconciler<'a> {
    aliases: &'a AliasTable,
}

impl<'a> RegionReconciler<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Regions for every reconciled country, ordered by country id and then
    /// by normalized region name. The sentinel region is not included.
    ///
    /// `hierarchy` holds `(parent_country_display, region_display)` pairs as
    /// stored in the legacy data. Pairs whose parent does not resolve to a
    /// reconciled country are dropped.
    pub fn reconcile<I, P, R>(&self, countries: &ReconciledCountries, hierarchy: I) -> Vec<Region>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let mut pending: BTreeMap<String, BTreeSet<String>> = countries
            .countries()
            .map(|country| {
                (
                    country.id.clone(),
                    BTreeSet::from([FALLBACK_REGION_NAME.to_string()]),
                )
            })
            .collect();

        let mut dropped = 0usize;
        for (parent, region) in hierarchy {
            let Some(country) = countries.resolve(parent.as_ref(), self.aliases) else {
                dropped += 1;
                continue;
            };
            let name = clean_display(region.as_ref());
            if name.is_empty() {
                continue;
            }
            if let Some(names) = pending.get_mut(&country.id) {
                names.insert(name);
            }
        }

        if dropped > 0 {
            debug!(
                target: TARGET_RECONCILE,
                "Dropped {} hierarchy edges with an unknown parent country", dropped
            );
        }

        let mut ids = IdAllocator::reserving(DEFAULT_REGION_ID);
        let mut regions = Vec::new();

        for (country_id, names) in pending {
            let mut names: Vec<(String, String)> = names
                .into_iter()
                .map(|name| (normalize(&name), name))
                .collect();
            names.sort();

            for (_, name) in names {
                let id = ids.allocate(&format!("REGION_{}_{}", country_id, slugify(&name)));
                regions.push(Region {
                    id,
                    country_id: country_id.clone(),
                    name,
                });
            }
        }

        info!(
            target: TARGET_RECONCILE,
            "Reconciled {} regions under {} countries",
            regions.len(),
            countries.len()
        );

        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::countries::CountryReconciler;
    use std::collections::HashSet;

    fn build(values: &[&str], hierarchy: &[(&str, &str)]) -> Vec<Region> {
        let aliases = AliasTable::builtin();
        let countries = CountryReconciler::new(aliases).reconcile(values.iter().copied());
        RegionReconciler::new(aliases).reconcile(&countries, hierarchy.iter().copied())
    }

    #[test]
    fn test_every_country_gets_fallback_region() {
        let regions = build(&["France", "Japan"], &[]);
        assert_eq!(
            regions,
            vec![
                Region {
                    id: "REGION_COUNTRY_FRANCE_OTHER".to_string(),
                    country_id: "COUNTRY_FRANCE".to_string(),
                    name: "Other".to_string(),
                },
                Region {
                    id: "REGION_COUNTRY_JAPAN_OTHER".to_string(),
                    country_id: "COUNTRY_JAPAN".to_string(),
                    name: "Other".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_hierarchy_edges_attach_and_collapse() {
        let regions = build(
            &["Japan", "USA"],
            &[
                ("JAPAN", "  Kanto "),
                ("Japan", "Kanto"),
                ("japan.", "Kansai"),
                ("United States of America", "Midwest"),
                ("Japan", "   "),
            ],
        );
        let rows: Vec<(&str, &str)> = regions
            .iter()
            .map(|r| (r.id.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("REGION_COUNTRY_JAPAN_KANSAI", "Kansai"),
                ("REGION_COUNTRY_JAPAN_KANTO", "Kanto"),
                ("REGION_COUNTRY_JAPAN_OTHER", "Other"),
                ("REGION_COUNTRY_UNITED_STATES_MIDWEST", "Midwest"),
                ("REGION_COUNTRY_UNITED_STATES_OTHER", "Other"),
            ]
        );
    }

    #[test]
    fn test_orphan_edges_are_dropped() {
        let regions = build(&["France"], &[("Atlantis", "Lost City"), ("", "Nowhere")]);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Other");
    }

    #[test]
    fn test_region_id_collisions_are_suffixed() {
        // Distinct display names that slug identically
        let regions = build(&["Chile"], &[("Chile", "Los Lagos"), ("Chile", "Los-Lagos")]);
        let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "REGION_COUNTRY_CHILE_LOS_LAGOS",
                "REGION_COUNTRY_CHILE_LOS_LAGOS_2",
                "REGION_COUNTRY_CHILE_OTHER",
            ]
        );
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_order_independent() {
        let edges = [("Peru", "Lima"), ("Peru", "Cusco"), ("Chile", "Maule")];
        let forward = build(&["Peru", "Chile"], &edges);
        let mut reversed_edges = edges.to_vec();
        reversed_edges.reverse();
        let reversed = build(&["Chile", "Peru"], &reversed_edges);
        assert_eq!(forward, reversed);
    }
}
