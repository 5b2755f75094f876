//! In-memory statistic store with latest-snapshot lookup
//!
//! Tables are grouped by key and sorted by date once at load, so per-game
//! scoring is a map lookup instead of a table scan.

use crate::{DiamondError, HittingStat, PitcherStat, Result, TeamStat};
use std::collections::{HashMap, HashSet};

/// Read-only store over the three statistic tables
///
/// Each table may hold several dated snapshots per entity; only the most
/// recent one is ever served.
pub struct StatStore {
    team: HashMap<String, Vec<TeamStat>>,
    hitting: HashMap<String, Vec<HittingStat>>,
    pitchers: HashMap<String, Vec<PitcherStat>>,
    /// Canonical pitcher names, deduplicated, in first-seen table order
    pitcher_names: Vec<String>,
}

impl StatStore {
    pub fn new(
        team_rows: Vec<TeamStat>,
        hitting_rows: Vec<HittingStat>,
        pitcher_rows: Vec<PitcherStat>,
    ) -> Self {
        let mut team: HashMap<String, Vec<TeamStat>> = HashMap::new();
        for row in team_rows {
            team.entry(row.team.clone()).or_default().push(row);
        }
        let mut hitting: HashMap<String, Vec<HittingStat>> = HashMap::new();
        for row in hitting_rows {
            hitting.entry(row.team.clone()).or_default().push(row);
        }

        let mut pitcher_names = Vec::new();
        let mut seen = HashSet::new();
        let mut pitchers: HashMap<String, Vec<PitcherStat>> = HashMap::new();
        for row in pitcher_rows {
            if row.name.trim().is_empty() {
                continue;
            }
            if seen.insert(row.name.clone()) {
                pitcher_names.push(row.name.clone());
            }
            pitchers.entry(row.name.clone()).or_default().push(row);
        }

        for rows in team.values_mut() {
            rows.sort_by_key(|r| r.date);
        }
        for rows in hitting.values_mut() {
            rows.sort_by_key(|r| r.date);
        }
        for rows in pitchers.values_mut() {
            rows.sort_by_key(|r| r.date);
        }

        StatStore {
            team,
            hitting,
            pitchers,
            pitcher_names,
        }
    }

    /// Most recent run-differential snapshot for a team
    pub fn latest_team(&self, team: &str) -> Result<&TeamStat> {
        self.team
            .get(team)
            .and_then(|rows| rows.last())
            .ok_or_else(|| DiamondError::NotFound {
                table: "team",
                key: team.to_string(),
            })
    }

    /// Most recent hitting snapshot for a team
    pub fn latest_hitting(&self, team: &str) -> Result<&HittingStat> {
        self.hitting
            .get(team)
            .and_then(|rows| rows.last())
            .ok_or_else(|| DiamondError::NotFound {
                table: "hitting",
                key: team.to_string(),
            })
    }

    /// Most recent snapshot for a canonical pitcher name
    ///
    /// Absence is normal here (unmatched or blank name), unlike the team
    /// lookups.
    pub fn latest_pitcher(&self, name: &str) -> Option<&PitcherStat> {
        self.pitchers.get(name).and_then(|rows| rows.last())
    }

    /// All canonical pitcher names known to the store
    pub fn pitcher_names(&self) -> &[String] {
        &self.pitcher_names
    }

    pub fn team_count(&self) -> usize {
        self.team.len()
    }

    pub fn pitcher_count(&self) -> usize {
        self.pitchers.len()
    }
}
