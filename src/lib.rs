pub mod config;
pub mod db;
pub mod environment;
pub mod logging;
pub mod output;
pub mod reference;

pub const TARGET_RECONCILE: &str = "reconcile";
pub const TARGET_DB: &str = "db_query";
pub const TARGET_OUTPUT: &str = "seed_output";
