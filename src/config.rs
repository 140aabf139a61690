use std::path::{Path, PathBuf};

use crate::environment::get_env_var_as_vec;

// Columns probed, in order, before falling back to any column containing "COUNTRY"
const WORKER_COUNTRY_COLUMNS: &[&str] = &[
    "basedInCountry",
    "basedIn",
    "birthPlaceCountry",
    "birthPlace",
];
const PROMOTION_COUNTRY_COLUMNS: &[&str] = &["basedInCountry", "basedIn", "country"];

pub const COUNTRIES_FILE: &str = "seed_countries.sql";
pub const REGIONS_FILE: &str = "seed_regions.sql";
pub const ALIASES_FILE: &str = "seed_country_aliases.sql";

/// One legacy table that carries a free-text (or foreign-keyed) country field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySource {
    pub table: String,
    pub candidates: Vec<String>,
}

impl CountrySource {
    pub fn new(table: &str, candidates: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn with_env_override(mut self, var: &str) -> Self {
        let overrides = get_env_var_as_vec(var, ';');
        if !overrides.is_empty() {
            self.candidates = overrides;
        }
        self
    }
}

/// Which legacy tables to harvest country values from.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub sources: Vec<CountrySource>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                CountrySource::new("workers", WORKER_COUNTRY_COLUMNS),
                CountrySource::new("promotions", PROMOTION_COUNTRY_COLUMNS),
            ],
        }
    }
}

impl ExtractionConfig {
    /// Built-in sources with candidate lists replaced by
    /// `WORKER_COUNTRY_COLUMNS` / `PROMOTION_COUNTRY_COLUMNS` when set.
    pub fn from_env() -> Self {
        Self {
            sources: vec![
                CountrySource::new("workers", WORKER_COUNTRY_COLUMNS)
                    .with_env_override("WORKER_COUNTRY_COLUMNS"),
                CountrySource::new("promotions", PROMOTION_COUNTRY_COLUMNS)
                    .with_env_override("PROMOTION_COUNTRY_COLUMNS"),
            ],
        }
    }
}

/// Output file locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPaths {
    pub countries: PathBuf,
    pub regions: PathBuf,
    pub aliases: PathBuf,
}

impl SeedPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            countries: output_dir.join(COUNTRIES_FILE),
            regions: output_dir.join(REGIONS_FILE),
            aliases: output_dir.join(ALIASES_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = ExtractionConfig::default();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].table, "workers");
        assert_eq!(config.sources[0].candidates[0], "basedInCountry");
        assert_eq!(config.sources[1].table, "promotions");
        assert_eq!(config.sources[1].candidates.last().unwrap(), "country");
    }

    #[test]
    fn test_seed_paths() {
        let paths = SeedPaths::in_dir(Path::new("out"));
        assert_eq!(paths.countries, Path::new("out").join("seed_countries.sql"));
        assert_eq!(paths.regions, Path::new("out").join("seed_regions.sql"));
        assert_eq!(
            paths.aliases,
            Path::new("out").join("seed_country_aliases.sql")
        );
    }
}
