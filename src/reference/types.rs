use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COUNTRY_ID: &str = "COUNTRY_DEFAULT";
pub const DEFAULT_COUNTRY_CODE: &str = "WLD";
pub const DEFAULT_COUNTRY_NAME: &str = "World";
pub const DEFAULT_REGION_ID: &str = "REGION_DEFAULT";
pub const DEFAULT_REGION_NAME: &str = "Global";

/// Region every reconciled country receives even without legacy regions.
pub const FALLBACK_REGION_NAME: &str = "Other";

/// A canonical country record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl Country {
    /// The always-present "unknown/unspecified" country.
    pub fn sentinel() -> Self {
        Country {
            id: DEFAULT_COUNTRY_ID.to_string(),
            code: DEFAULT_COUNTRY_CODE.to_string(),
            name: DEFAULT_COUNTRY_NAME.to_string(),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.code, self.name)
    }
}

/// A sub-region under a canonical country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub country_id: String,
    pub name: String,
}

impl Region {
    /// The always-present catch-all region under the sentinel country.
    pub fn sentinel() -> Self {
        Region {
            id: DEFAULT_REGION_ID.to_string(),
            country_id: DEFAULT_COUNTRY_ID.to_string(),
            name: DEFAULT_REGION_NAME.to_string(),
        }
    }
}

/// Lookup row from a normalized spelling to the country it denotes.
///
/// Ordering is by `(alias_key, country_id)`, which is the emission order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AliasEntry {
    pub alias_key: String,
    pub country_id: String,
}

impl AliasEntry {
    pub fn new(alias_key: &str, country_id: &str) -> Self {
        AliasEntry {
            alias_key: alias_key.to_string(),
            country_id: country_id.to_string(),
        }
    }
}
