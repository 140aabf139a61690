pub mod json;
pub mod sql;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::SeedPaths;
use crate::reference::ReferenceSeed;
use crate::TARGET_OUTPUT;

/// Destination for a finished seed; the reconciler never sees the storage format.
pub trait SeedSink {
    fn emit(&self, seed: &ReferenceSeed) -> Result<()>;
}

/// Writes the three SQL seed scripts into an output directory.
#[derive(Debug, Clone)]
pub struct SqlFileSink {
    paths: SeedPaths,
}

impl SqlFileSink {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            paths: SeedPaths::in_dir(output_dir),
        }
    }

    pub fn paths(&self) -> &SeedPaths {
        &self.paths
    }
}

impl SeedSink for SqlFileSink {
    #[instrument(target = "seed_output", level = "info", skip_all)]
    fn emit(&self, seed: &ReferenceSeed) -> Result<()> {
        let files = [
            (&self.paths.countries, sql::render_countries(&seed.countries)),
            (&self.paths.regions, sql::render_regions(&seed.regions)),
            (&self.paths.aliases, sql::render_aliases(&seed.aliases)),
        ];

        // Stage every file before replacing any, so a failed write leaves old seeds intact
        let mut staged = Vec::with_capacity(files.len());
        for (path, contents) in &files {
            let tmp = staging_path(path);
            fs::write(&tmp, contents)
                .with_context(|| format!("Failed to write {}", tmp.display()))?;
            staged.push((tmp, *path));
        }

        for (tmp, path) in staged {
            fs::rename(&tmp, path)
                .with_context(|| format!("Failed to move seed into {}", path.display()))?;
            info!(target: TARGET_OUTPUT, "Wrote {}", path.display());
        }

        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::AliasTable;

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("out/seed_countries.sql")),
            Path::new("out/seed_countries.sql.tmp")
        );
    }

    #[test]
    fn test_sql_file_sink_writes_all_files() {
        let dir = std::env::temp_dir().join(format!("country_seed_sink_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let seed = ReferenceSeed::build(["Peru", "USA"], [("Peru", "Lima")], AliasTable::builtin());
        let sink = SqlFileSink::new(&dir);
        sink.emit(&seed).unwrap();

        let countries = fs::read_to_string(&sink.paths().countries).unwrap();
        let regions = fs::read_to_string(&sink.paths().regions).unwrap();
        let aliases = fs::read_to_string(&sink.paths().aliases).unwrap();
        assert!(countries.contains("('COUNTRY_UNITED_STATES', 'USA', 'United States')"));
        assert!(regions.contains("('REGION_COUNTRY_PERU_LIMA', 'COUNTRY_PERU', 'Lima')"));
        assert!(aliases.contains("('usa', 'COUNTRY_UNITED_STATES')"));
        assert!(!staging_path(&sink.paths().countries).exists());

        // Same input, same bytes
        sink.emit(&seed).unwrap();
        assert_eq!(fs::read_to_string(&sink.paths().countries).unwrap(), countries);

        fs::remove_dir_all(&dir).unwrap();
    }
}
