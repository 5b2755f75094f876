//! Per-game matchup resolution
//!
//! Matches both probable pitchers, applies the fairness rule, scores both
//! sides and picks the winner. Games are independent; one failed game
//! never aborts the slate.

use crate::data::StatStore;
use crate::matching;
use crate::predict::ScoreCalculator;
use crate::{GamePrediction, Result, ScheduledGame, Weights};

/// Resolves scheduled games into predictions
pub struct MatchupResolver<'a> {
    store: &'a StatStore,
    weights: &'a Weights,
    threshold: f64,
}

impl<'a> MatchupResolver<'a> {
    pub fn new(store: &'a StatStore, weights: &'a Weights, threshold: f64) -> Self {
        MatchupResolver {
            store,
            weights,
            threshold,
        }
    }

    /// Predict one game
    ///
    /// Pitching terms are used only when BOTH raw pitcher names resolve:
    /// scoring one side with pitching-adjusted numbers and the other
    /// without would bias the comparison. An unresolved side passes an
    /// empty pitcher identity, which the calculator skips.
    pub fn predict_game(&self, game: &ScheduledGame) -> Result<GamePrediction> {
        let names = self.store.pitcher_names();
        let home_pitcher = matching::best_match(&game.home_pitcher, names, self.threshold);
        let away_pitcher = matching::best_match(&game.away_pitcher, names, self.threshold);
        let use_pitching = home_pitcher.is_some() && away_pitcher.is_some();

        let calc = ScoreCalculator::new(self.store, self.weights);
        let home_score = calc.score(&game.home_team, home_pitcher.unwrap_or(""), use_pitching)?;
        let away_score = calc.score(&game.away_team, away_pitcher.unwrap_or(""), use_pitching)?;

        // Strict comparison: an exact tie goes to the away side
        let predicted_winner = if home_score > away_score {
            game.home_team.clone()
        } else {
            game.away_team.clone()
        };

        let note = if use_pitching {
            String::new()
        } else {
            // Pitching removed for fairness; flag the comparison as partial
            "partial".to_string()
        };

        Ok(GamePrediction {
            date: game.date,
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            home_pitcher: game.home_pitcher.clone(),
            away_pitcher: game.away_pitcher.clone(),
            home_score,
            away_score,
            predicted_winner,
            pitching_stats_used: use_pitching,
            note,
        })
    }

    /// Predict every game on the slate
    ///
    /// Per-game failures (missing team statistics) come back as `Err` in
    /// position; the caller reports them per row and keeps the rest.
    pub fn predict_slate(&self, games: &[ScheduledGame]) -> Vec<Result<GamePrediction>> {
        games.iter().map(|game| self.predict_game(game)).collect()
    }
}

/// Format a prediction for terminal display
pub fn format_prediction(pred: &GamePrediction) -> String {
    let caveat = if pred.pitching_stats_used {
        ""
    } else {
        " (no pitching data)"
    };

    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  {} @ {}
├─────────────────────────────────────────────────┤
│  Score:   {} {:.3} - {} {:.3}
│  Winner:  {}{}
└─────────────────────────────────────────────────┘
"#,
        pred.away_team,
        pred.home_team,
        pred.away_team,
        pred.away_score,
        pred.home_team,
        pred.home_score,
        pred.predicted_winner,
        caveat
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiamondError, HittingStat, PitcherStat, TeamStat};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
    }

    fn team_stat(team: &str, rd: f64) -> TeamStat {
        TeamStat {
            team: team.to_string(),
            date: date(),
            run_differential: rd,
        }
    }

    fn hitting_stat(team: &str) -> HittingStat {
        HittingStat {
            team: team.to_string(),
            date: date(),
            obp: 0.320,
            ops: 0.740,
        }
    }

    fn pitcher_stat(name: &str, fip: f64, k_per_bb: f64) -> PitcherStat {
        PitcherStat {
            name: name.to_string(),
            date: date(),
            fip,
            k_per_bb: Some(k_per_bb),
        }
    }

    fn game(home: &str, away: &str, home_pitcher: &str, away_pitcher: &str) -> ScheduledGame {
        ScheduledGame {
            date: date(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_pitcher: home_pitcher.to_string(),
            away_pitcher: away_pitcher.to_string(),
        }
    }

    fn store() -> StatStore {
        StatStore::new(
            vec![team_stat("Team A", 10.0), team_stat("Team B", -5.0)],
            vec![hitting_stat("Team A"), hitting_stat("Team B")],
            vec![
                pitcher_stat("Jacob deGrom", 2.5, 5.0),
                pitcher_stat("Zack Wheeler", 3.0, 4.0),
            ],
        )
    }

    fn rd_only_weights() -> Weights {
        let mut w = Weights::new();
        w.set("run_differential", 1.0);
        w.set("obp", 0.0);
        w.set("ops", 0.0);
        w
    }

    #[test]
    fn test_run_differential_scenario() {
        // Teams at +10 and -5, equal hitting, rd weight 1: margin is 15
        let store = store();
        let weights = rd_only_weights();
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let pred = resolver.predict_game(&game("Team A", "Team B", "", "")).unwrap();
        assert!(!pred.pitching_stats_used);
        assert_eq!(pred.note, "partial");
        assert_eq!(pred.home_score - pred.away_score, 15.0);
        assert_eq!(pred.predicted_winner, "Team A");
    }

    #[test]
    fn test_use_pitching_requires_both_sides() {
        let store = store();
        let weights = rd_only_weights();
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let cases = [
            ("Jacob deGrom", "Zack Wheeler", true),
            ("Jacob deGrom", "Random Nobody", false),
            ("Random Nobody", "Zack Wheeler", false),
            ("", "", false),
            ("TBD", "Zack Wheeler", false),
        ];
        for (home_pitcher, away_pitcher, expected) in cases {
            let pred = resolver
                .predict_game(&game("Team A", "Team B", home_pitcher, away_pitcher))
                .unwrap();
            assert_eq!(
                pred.pitching_stats_used, expected,
                "home={:?} away={:?}",
                home_pitcher, away_pitcher
            );
            assert_eq!(pred.note.is_empty(), expected);
        }
    }

    #[test]
    fn test_one_sided_pitching_never_applied() {
        // With only the home pitcher known, a pitching-adjusted home score
        // would skew the game; both sides must fall back to base scores.
        let store = store();
        let mut weights = rd_only_weights();
        weights.set("fip", 100.0);
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let pred = resolver
            .predict_game(&game("Team A", "Team B", "Jacob deGrom", "Random Nobody"))
            .unwrap();
        // fip weight untouched because pitching was disabled for both
        assert_eq!(pred.home_score - pred.away_score, 15.0);
    }

    #[test]
    fn test_tie_goes_to_away_team() {
        let store = StatStore::new(
            vec![team_stat("Team A", 7.0), team_stat("Team B", 7.0)],
            vec![hitting_stat("Team A"), hitting_stat("Team B")],
            vec![],
        );
        let weights = rd_only_weights();
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let pred = resolver.predict_game(&game("Team A", "Team B", "", "")).unwrap();
        assert_eq!(pred.home_score, pred.away_score);
        assert_eq!(pred.predicted_winner, "Team B");
    }

    #[test]
    fn test_abbreviated_names_enable_pitching() {
        let store = store();
        let mut weights = rd_only_weights();
        weights.set("fip", 1.0);
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let pred = resolver
            .predict_game(&game("Team A", "Team B", "J. Degrom", "Z. Wheeler"))
            .unwrap();
        assert!(pred.pitching_stats_used);
        // Raw names are surfaced unchanged in the output record
        assert_eq!(pred.home_pitcher, "J. Degrom");
    }

    #[test]
    fn test_missing_team_fails_game_but_not_slate() {
        let store = store();
        let weights = rd_only_weights();
        let resolver = MatchupResolver::new(&store, &weights, 90.0);

        let games = [
            game("Team A", "Narnia Lions", "", ""),
            game("Team A", "Team B", "", ""),
        ];
        let results = resolver.predict_slate(&games);
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(DiamondError::NotFound { table: "team", .. })
        ));
        assert_eq!(results[1].as_ref().unwrap().predicted_winner, "Team A");
    }
}
