//! Query engine
//!
//! Pure functions over a record slice: filtering plus the aggregate views served
//! by the API. Nothing here touches the store itself.

mod filter;
mod views;

pub use filter::FilterSpec;
pub use views::{
    countries, sectors, stats, CertSummary, CountrySummary, SectorGroup, StatsSummary,
    VERIFICATION_RATE,
};
