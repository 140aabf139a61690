use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use country_seed::config::ExtractionConfig;
use country_seed::db::{LegacyDatabase, LegacySnapshot};
use country_seed::output::json::write_preview;
use country_seed::output::{SeedSink, SqlFileSink};
use country_seed::reference::normalizer::{display_from_key, normalize, slugify};
use country_seed::reference::{AliasTable, ReferenceSeed};
use std::fs;
use std::io;
use std::path::PathBuf;
use tokio::main;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Build deterministic country/region seed data from a legacy snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a legacy snapshot and write the SQL seed files
    Build {
        /// Path to the legacy SQLite database
        #[arg(long)]
        legacy_db: String,

        /// Output directory for the SQL seeds
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Reconcile a legacy snapshot and print the seed as JSON without writing files
    Preview {
        /// Path to the legacy SQLite database
        #[arg(long)]
        legacy_db: String,
    },

    /// Show how raw country spellings normalize and resolve
    Normalize {
        /// Raw country names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[main]
async fn main() -> Result<()> {
    country_seed::logging::configure_logging();

    let cli = Cli::parse();
    let aliases = AliasTable::builtin();

    match cli.command {
        Commands::Build {
            legacy_db,
            output_dir,
        } => {
            // Read everything before touching the output directory
            let snapshot = load_snapshot(&legacy_db).await?;
            let seed = ReferenceSeed::build(snapshot.raw_values, snapshot.hierarchy, aliases);

            fs::create_dir_all(&output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
            SqlFileSink::new(&output_dir).emit(&seed)?;

            println!(
                "Wrote {} countries, {} regions, {} aliases to {}",
                seed.countries.len(),
                seed.regions.len(),
                seed.aliases.len(),
                output_dir.display()
            );
        }

        Commands::Preview { legacy_db } => {
            let snapshot = load_snapshot(&legacy_db).await?;
            let seed = ReferenceSeed::build(snapshot.raw_values, snapshot.hierarchy, aliases);
            write_preview(&seed, io::stdout().lock())?;
        }

        Commands::Normalize { names } => {
            for name in &names {
                let key = normalize(name);
                if key.is_empty() {
                    println!("'{}' → (discarded, no usable letters)", name);
                    continue;
                }
                let display = aliases
                    .canonical_for(&key)
                    .map(str::to_string)
                    .unwrap_or_else(|| display_from_key(&key));
                println!("'{}'", name);
                println!("  - Normalized key: '{}'", key);
                println!("  - Display name:   '{}'", display);
                println!("  - Base id:        'COUNTRY_{}'", slugify(&display));
                if let Some(code) = aliases.code_override(&normalize(&display)) {
                    println!("  - Fixed code:     '{}'", code);
                }
            }
        }
    }

    Ok(())
}

async fn load_snapshot(legacy_db: &str) -> Result<LegacySnapshot> {
    let db = LegacyDatabase::open(legacy_db)
        .await
        .with_context(|| format!("Failed to open legacy database {}", legacy_db))?;

    let config = ExtractionConfig::from_env();
    let snapshot = db
        .load_snapshot(&config)
        .await
        .context("Failed to read legacy snapshot")?;
    db.close().await;

    info!(
        "Snapshot loaded: {} raw country values, {} region edges",
        snapshot.raw_values.len(),
        snapshot.hierarchy.len()
    );
    Ok(snapshot)
}
