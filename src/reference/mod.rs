//! Country and region reconciliation.
//!
//! Raw strings flow strictly forward: normalizer/aliases feed the country
//! reconciler, whose output feeds the region reconciler, and `seed` assembles
//! the three record sets handed to an output sink.

pub mod aliases;
pub mod countries;
pub mod ids;
pub mod normalizer;
pub mod regions;
pub mod seed;
pub mod types;

pub use aliases::AliasTable;
pub use countries::{CountryReconciler, ReconciledCountries};
pub use regions::RegionReconciler;
pub use seed::ReferenceSeed;
pub use types::*;
