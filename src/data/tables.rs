//! CSV loading and emission for the flat statistic tables
//!
//! Loaders are generic over `io::Read` so tests can feed inline strings.
//! Unknown columns (acquisition-layer extras like `runs_scored` or
//! `opponent`) are ignored.

use crate::{
    DiamondError, GamePrediction, HittingStat, PitcherStat, Result, ScheduledGame, TeamStat,
    Weights,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;

/// Deserialize a ratio column that may be empty or non-finite
///
/// pandas-style sources write an undefined strikeout-to-walk ratio (zero
/// walks) as `inf` or leave the field blank; both load as `None`.
pub fn de_ratio<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

fn load_from_reader<T, R>(rdr: R) -> std::result::Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(rdr);
    reader.deserialize().collect()
}

fn load_from_path<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let file = File::open(path)?;
    load_from_reader(file).map_err(|source| DiamondError::Csv {
        path: path.to_string(),
        source,
    })
}

pub fn load_team_stats(path: &str) -> Result<Vec<TeamStat>> {
    load_from_path(path)
}

pub fn load_hitting_stats(path: &str) -> Result<Vec<HittingStat>> {
    load_from_path(path)
}

pub fn load_pitcher_stats(path: &str) -> Result<Vec<PitcherStat>> {
    load_from_path(path)
}

pub fn load_schedule(path: &str) -> Result<Vec<ScheduledGame>> {
    load_from_path(path)
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    stat: String,
    weight: f64,
}

/// Assemble the weight vector from `stat,weight` rows
pub fn load_weights(path: &str) -> Result<Weights> {
    let rows: Vec<WeightRow> = load_from_path(path)?;
    Ok(rows.into_iter().map(|r| (r.stat, r.weight)).collect())
}

/// Round to 3 decimal places for external reporting
///
/// Scores stay full-precision inside the engine; rounding happens once, at
/// the emission boundary.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Write the predictions table, scores rounded to 3 decimals
pub fn write_predictions(path: &str, predictions: &[GamePrediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| DiamondError::Csv {
        path: path.to_string(),
        source,
    })?;
    for prediction in predictions {
        let mut row = prediction.clone();
        row.home_score = round3(row.home_score);
        row.away_score = round3(row.away_score);
        writer.serialize(row).map_err(|source| DiamondError::Csv {
            path: path.to_string(),
            source,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a fetched schedule so `predict` can pick it up later
pub fn write_schedule(path: &str, games: &[ScheduledGame]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| DiamondError::Csv {
        path: path.to_string(),
        source,
    })?;
    for game in games {
        writer.serialize(game).map_err(|source| DiamondError::Csv {
            path: path.to_string(),
            source,
        })?;
    }
    writer.flush()?;
    Ok(())
}
