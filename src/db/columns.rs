use sqlx::Row;
use tracing::{debug, instrument};

use super::core::{quote_ident, LegacyDatabase};
use crate::TARGET_DB;

/// A column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    // Upper-cased declared type, empty when the column has none
    pub declared_type: String,
}

impl ColumnInfo {
    pub fn new(name: &str, declared_type: &str) -> Self {
        Self {
            name: name.to_string(),
            declared_type: declared_type.to_uppercase(),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.declared_type.contains("INT")
    }
}

/// First candidate matched by name (case-insensitive, candidate order wins),
/// else the first column whose name contains "COUNTRY".
pub fn pick_country_column(columns: &[ColumnInfo], candidates: &[String]) -> Option<ColumnInfo> {
    for candidate in candidates {
        if let Some(column) = columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(candidate))
        {
            return Some(column.clone());
        }
    }

    columns
        .iter()
        .find(|column| column.name.to_uppercase().contains("COUNTRY"))
        .cloned()
}

impl LegacyDatabase {
    /// Columns of `table`; empty when the table does not exist.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, sqlx::Error> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", quote_ident(table)))
            .fetch_all(self.pool())
            .await?;

        rows.iter()
            .map(|row| -> Result<ColumnInfo, sqlx::Error> {
                let name: String = row.try_get("name")?;
                let declared_type: Option<String> = row.try_get("type")?;
                Ok(ColumnInfo::new(&name, &declared_type.unwrap_or_default()))
            })
            .collect()
    }

    #[instrument(target = "db", level = "debug", skip(self, candidates))]
    pub async fn find_country_column(
        &self,
        table: &str,
        candidates: &[String],
    ) -> Result<Option<ColumnInfo>, sqlx::Error> {
        let columns = self.table_columns(table).await?;
        let column = pick_country_column(&columns, candidates);
        match &column {
            Some(column) => debug!(
                target: TARGET_DB,
                "Country column for '{}': {} ({})", table, column.name, column.declared_type
            ),
            None => debug!(target: TARGET_DB, "No country column found for '{}'", table),
        }
        Ok(column)
    }
}
