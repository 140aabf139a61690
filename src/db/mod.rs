// Extraction from the legacy snapshot
pub mod columns;
pub mod core;
pub mod values;

pub use self::columns::ColumnInfo;
pub use self::core::LegacyDatabase;
pub use self::values::LegacySnapshot;
