//! Scoring and matchup resolution
//!
//! Turns the loaded statistic tables and a schedule into per-game winner
//! predictions.

pub mod matchup;
pub mod scoring;

pub use matchup::{format_prediction, MatchupResolver};
pub use scoring::ScoreCalculator;
