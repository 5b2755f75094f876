//! Data ingestion and emission
//!
//! CSV table loading, the latest-snapshot statistic store, and the MLB
//! Stats API schedule fetcher.

pub mod schedule;
pub mod store;
pub mod tables;

pub use schedule::ScheduleClient;
pub use store::StatStore;
