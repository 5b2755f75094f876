//! Schedule acquisition from the MLB Stats API
//!
//! One GET per run, no retry; any failure is terminal for the fetch
//! command. Parsing is split from the HTTP call so it can be tested from
//! string fixtures.

use crate::{DiamondError, Result, ScheduledGame};
use chrono::NaiveDate;
use serde::Deserialize;

const SCHEDULE_URL: &str = "https://statsapi.mlb.com/api/v1/schedule";

/// Placeholder used when no probable pitcher is announced
const PITCHER_TBD: &str = "TBD";

/// Client for the day's schedule with probable pitchers
pub struct ScheduleClient {
    client: reqwest::blocking::Client,
}

impl Default for ScheduleClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("diamond-predictor/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        ScheduleClient { client }
    }

    /// Fetch all games scheduled for the given date
    pub fn fetch(&self, date: NaiveDate) -> Result<Vec<ScheduledGame>> {
        let url = format!(
            "{}?sportId=1&date={}&hydrate=probablePitcher",
            SCHEDULE_URL, date
        );
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        parse_schedule(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<ApiGame>,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    #[serde(rename = "gameDate")]
    game_date: String,
    teams: ApiTeams,
}

#[derive(Debug, Deserialize)]
struct ApiTeams {
    home: ApiSide,
    away: ApiSide,
}

#[derive(Debug, Deserialize)]
struct ApiSide {
    team: ApiTeam,
    #[serde(rename = "probablePitcher")]
    probable_pitcher: Option<ApiPitcher>,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiPitcher {
    #[serde(rename = "fullName")]
    full_name: String,
}

/// Decode a schedule API response body into scheduled games
pub fn parse_schedule(json: &str) -> Result<Vec<ScheduledGame>> {
    let response: ScheduleResponse = serde_json::from_str(json)
        .map_err(|e| DiamondError::Parse(format!("schedule response: {}", e)))?;

    let mut games = Vec::new();
    for date in response.dates {
        for game in date.games {
            // gameDate is an RFC 3339 timestamp; the calendar day prefix is
            // all the schedule table carries
            let day = game.game_date.get(..10).ok_or_else(|| {
                DiamondError::Parse(format!("bad gameDate: {}", game.game_date))
            })?;
            let date = day
                .parse::<NaiveDate>()
                .map_err(|e| DiamondError::Parse(format!("bad gameDate {}: {}", day, e)))?;

            games.push(ScheduledGame {
                date,
                home_team: game.teams.home.team.name,
                away_team: game.teams.away.team.name,
                home_pitcher: pitcher_name(game.teams.home.probable_pitcher),
                away_pitcher: pitcher_name(game.teams.away.probable_pitcher),
            });
        }
    }
    Ok(games)
}

fn pitcher_name(pitcher: Option<ApiPitcher>) -> String {
    pitcher
        .map(|p| p.full_name)
        .unwrap_or_else(|| PITCHER_TBD.to_string())
}
