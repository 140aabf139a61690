//! Rendering of the seed record sets as idempotent SQLite insert scripts.

use crate::reference::{AliasEntry, Country, Region};

const HEADER: &str = "-- Auto-generated by build_reference_data\n";

/// Escape a value for a single-quoted SQL string literal.
pub fn sql_escape(value: &str) -> String {
    value.replace('\'', "''")
}

pub fn render_countries(countries: &[Country]) -> String {
    let rows = countries
        .iter()
        .map(|country| {
            format!(
                "('{}', '{}', '{}')",
                sql_escape(&country.id),
                sql_escape(&country.code),
                sql_escape(&country.name)
            )
        })
        .collect::<Vec<_>>();

    render_script(
        "",
        "INSERT OR IGNORE INTO Countries (CountryId, Code, Name) VALUES",
        &rows,
    )
}

pub fn render_regions(regions: &[Region]) -> String {
    let rows = regions
        .iter()
        .map(|region| {
            format!(
                "('{}', '{}', '{}')",
                sql_escape(&region.id),
                sql_escape(&region.country_id),
                sql_escape(&region.name)
            )
        })
        .collect::<Vec<_>>();

    render_script(
        "",
        "INSERT OR IGNORE INTO Regions (RegionId, CountryId, Name) VALUES",
        &rows,
    )
}

pub fn render_aliases(aliases: &[AliasEntry]) -> String {
    let rows = aliases
        .iter()
        .map(|alias| {
            format!(
                "('{}', '{}')",
                sql_escape(&alias.alias_key),
                sql_escape(&alias.country_id)
            )
        })
        .collect::<Vec<_>>();

    render_script(
        "CREATE TABLE IF NOT EXISTS CountryAliases (\n    \
         AliasNorm TEXT PRIMARY KEY,\n    \
         CountryId TEXT NOT NULL,\n    \
         FOREIGN KEY (CountryId) REFERENCES Countries(CountryId)\n\
         );\n\n",
        "INSERT OR IGNORE INTO CountryAliases (AliasNorm, CountryId) VALUES",
        &rows,
    )
}

// One transaction per file; an empty record set still yields a valid script
fn render_script(preamble: &str, insert: &str, rows: &[String]) -> String {
    let mut script = String::new();
    script.push_str(HEADER);
    script.push_str("PRAGMA foreign_keys = ON;\n\n");
    script.push_str("BEGIN TRANSACTION;\n\n");
    script.push_str(preamble);
    if !rows.is_empty() {
        script.push_str(insert);
        script.push('\n');
        script.push_str(&rows.join(",\n"));
        script.push_str(";\n\n");
    }
    script.push_str("COMMIT;\n");
    script
}
