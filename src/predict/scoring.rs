//! Weighted linear scoring for one team/pitcher pairing

use crate::data::StatStore;
use crate::{Result, Weights};

/// Computes the weighted score for one side of a game
///
/// Borrows the store and weights; both are read-only for the run, so one
/// calculator can serve every game.
pub struct ScoreCalculator<'a> {
    store: &'a StatStore,
    weights: &'a Weights,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(store: &'a StatStore, weights: &'a Weights) -> Self {
        ScoreCalculator { store, weights }
    }

    /// Score a team with an optional resolved pitcher
    ///
    /// Team and hitting snapshots are required; a missing one propagates as
    /// `NotFound` rather than defaulting to zero, which would bias the
    /// matchup. The pitching terms apply only when `use_pitching` is set
    /// and `pitcher` resolves to a snapshot; an empty or unknown name
    /// silently skips them.
    pub fn score(&self, team: &str, pitcher: &str, use_pitching: bool) -> Result<f64> {
        let team_stat = self.store.latest_team(team)?;
        let hitting = self.store.latest_hitting(team)?;

        let mut score = self.weights.get("run_differential") * team_stat.run_differential
            + self.weights.get("obp") * hitting.obp
            + self.weights.get("ops") * hitting.ops;

        if use_pitching {
            if let Some(pitcher_stat) = self.store.latest_pitcher(pitcher) {
                if let Some(k_per_bb) = pitcher_stat.k_per_bb {
                    score += self.weights.get("k_per_bb") * k_per_bb;
                }
                // Lower FIP is better, so its term is subtracted
                score -= self.weights.get("fip") * pitcher_stat.fip;
            }
        }

        Ok(score)
    }
}
