//! MLB game outcome prediction
//!
//! Combines the latest team run-differential, team hitting and starting
//! pitcher statistics into a weighted linear score per side; the higher
//! scoring side is the predicted winner.

pub mod data;
pub mod matching;
pub mod predict;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Run differential snapshot for a team on a given date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStat {
    pub team: String,
    pub date: NaiveDate,
    pub run_differential: f64,
}

/// Hitting snapshot for a team on a given date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HittingStat {
    pub team: String,
    pub date: NaiveDate,
    pub obp: f64,
    pub ops: f64,
}

/// Pitcher snapshot on a given date
///
/// `k_per_bb` is `None` when the ratio is undefined (a pitcher with zero
/// walks); loaders map empty and non-finite values here rather than letting
/// an infinity leak into scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherStat {
    #[serde(rename = "pitcher_name")]
    pub name: String,
    pub date: NaiveDate,
    pub fip: f64,
    #[serde(default, deserialize_with = "data::tables::de_ratio")]
    pub k_per_bb: Option<f64>,
}

/// Signed weights per stat name, assembled from the weights table
///
/// Recognized names are `run_differential`, `obp`, `ops`, `k_per_bb` and
/// `fip`. A missing name weighs 0, so that stat simply drops out of the
/// score.
#[derive(Debug, Clone, Default)]
pub struct Weights(HashMap<String, f64>);

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: &str) -> f64 {
        self.0.get(stat).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, stat: &str, weight: f64) {
        self.0.insert(stat.to_string(), weight);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Weights(iter.into_iter().collect())
    }
}

/// One scheduled game with raw (unresolved) probable pitcher names
///
/// Pitcher fields are free text straight from the schedule source: possibly
/// blank, a placeholder like "TBD", or an abbreviated spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_pitcher: String,
    #[serde(default)]
    pub away_pitcher: String,
}

impl ScheduledGame {
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// Predicted outcome for one game
#[derive(Debug, Clone, Serialize)]
pub struct GamePrediction {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_pitcher: String,
    pub away_pitcher: String,
    pub home_score: f64,
    pub away_score: f64,
    pub predicted_winner: String,
    pub pitching_stats_used: bool,
    pub note: String,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum DiamondError {
    #[error("No {table} statistics found for {key}")]
    NotFound { table: &'static str, key: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schedule parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, DiamondError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub schedule_path: String,
    pub team_stats_path: String,
    pub hitting_stats_path: String,
    pub pitcher_stats_path: String,
    pub weights_path: String,
    pub predictions_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity (0-100) for a raw pitcher name to resolve
    pub threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                schedule_path: "data/game_schedule.csv".to_string(),
                team_stats_path: "data/team_stats.csv".to_string(),
                hitting_stats_path: "data/hitting_stats.csv".to_string(),
                pitcher_stats_path: "data/pitcher_stats.csv".to_string(),
                weights_path: "data/weights.csv".to_string(),
                predictions_path: "data/predictions.csv".to_string(),
            },
            matching: MatchingConfig { threshold: 90.0 },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DiamondError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| DiamondError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DiamondError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_default_zero() {
        let mut weights = Weights::new();
        weights.set("obp", 2.5);

        assert_eq!(weights.get("obp"), 2.5);
        assert_eq!(weights.get("fip"), 0.0);
        assert_eq!(weights.get("no_such_stat"), 0.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.data.schedule_path, config.data.schedule_path);
        assert_eq!(parsed.matching.threshold, 90.0);
    }
}
