use tracing::{debug, info, instrument, warn};

use super::columns::ColumnInfo;
use super::core::{quote_ident, LegacyDatabase};
use crate::config::ExtractionConfig;
use crate::TARGET_DB;

const COUNTRIES_TABLE: &str = "countries";
const REGIONS_TABLE: &str = "regions";

/// Everything the reconciler needs from one legacy snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacySnapshot {
    pub raw_values: Vec<String>,
    pub hierarchy: Vec<(String, String)>,
}

impl LegacyDatabase {
    /// Distinct non-blank values of `table.column`.
    ///
    /// An integer column holding only digits is treated as a foreign key into
    /// `countries(countryID, countryName)` and the joined names are returned.
    #[instrument(target = "db", level = "debug", skip(self))]
    pub async fn load_distinct_values(
        &self,
        table: &str,
        column: &ColumnInfo,
    ) -> Result<Vec<String>, sqlx::Error> {
        let table_ident = quote_ident(table);
        let column_ident = quote_ident(&column.name);

        if column.is_integer() && self.is_country_reference(&table_ident, &column_ident).await? {
            if !self.table_exists(COUNTRIES_TABLE).await? {
                warn!(
                    target: TARGET_DB,
                    "{}.{} references countries but no countries table exists", table, column.name
                );
                return Ok(Vec::new());
            }

            debug!(target: TARGET_DB, "Resolving {}.{} through countries", table, column.name);
            return sqlx::query_scalar::<_, String>(&format!(
                r#"
                SELECT DISTINCT CAST(c.countryName AS TEXT)
                FROM {table_ident} t
                JOIN countries c ON c.countryID = t.{column_ident}
                WHERE t.{column_ident} IS NOT NULL
                  AND c.countryName IS NOT NULL
                  AND TRIM(c.countryName) != ''
                "#
            ))
            .fetch_all(self.pool())
            .await;
        }

        sqlx::query_scalar::<_, String>(&format!(
            r#"
            SELECT DISTINCT CAST({column_ident} AS TEXT)
            FROM {table_ident}
            WHERE {column_ident} IS NOT NULL
              AND TRIM({column_ident}) != ''
            "#
        ))
        .fetch_all(self.pool())
        .await
    }

    // True when every non-blank value is purely numeric
    async fn is_country_reference(
        &self,
        table_ident: &str,
        column_ident: &str,
    ) -> Result<bool, sqlx::Error> {
        let non_numeric = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM {table_ident}
            WHERE {column_ident} IS NOT NULL
              AND TRIM({column_ident}) != ''
              AND CAST({column_ident} AS TEXT) GLOB '*[^0-9]*'
            "#
        ))
        .fetch_one(self.pool())
        .await?;

        Ok(non_numeric == 0)
    }

    /// Raw country values from every configured source, concatenated.
    ///
    /// A source with no recognizable country column contributes nothing.
    #[instrument(target = "db", level = "info", skip_all)]
    pub async fn load_country_values(
        &self,
        config: &ExtractionConfig,
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut raw_values = Vec::new();

        for source in &config.sources {
            let Some(column) = self
                .find_country_column(&source.table, &source.candidates)
                .await?
            else {
                info!(
                    target: TARGET_DB,
                    "No country column in '{}', skipping", source.table
                );
                continue;
            };

            let values = self.load_distinct_values(&source.table, &column).await?;
            info!(
                target: TARGET_DB,
                "Loaded {} country values from {}.{}",
                values.len(),
                source.table,
                column.name
            );
            raw_values.extend(values);
        }

        Ok(raw_values)
    }

    /// `(parent_country_display, region_display)` pairs from the legacy
    /// regions table, empty when either table is missing.
    #[instrument(target = "db", level = "info", skip_all)]
    pub async fn load_region_hierarchy(&self) -> Result<Vec<(String, String)>, sqlx::Error> {
        for table in [COUNTRIES_TABLE, REGIONS_TABLE] {
            if !self.table_exists(table).await? {
                warn!(target: TARGET_DB, "No '{}' table, region hierarchy is empty", table);
                return Ok(Vec::new());
            }
        }

        let edges = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT CAST(c.countryName AS TEXT), CAST(r.regionName AS TEXT)
            FROM regions r
            JOIN countries c ON c.countryID = r.regionParent
            WHERE c.countryName IS NOT NULL
              AND r.regionName IS NOT NULL
              AND TRIM(r.regionName) != ''
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        info!(target: TARGET_DB, "Loaded {} legacy region edges", edges.len());
        Ok(edges)
    }

    /// Load raw values and the region hierarchy in one go.
    pub async fn load_snapshot(
        &self,
        config: &ExtractionConfig,
    ) -> Result<LegacySnapshot, sqlx::Error> {
        Ok(LegacySnapshot {
            raw_values: self.load_country_values(config).await?,
            hierarchy: self.load_region_hierarchy().await?,
        })
    }
}
