//! MLB Prediction CLI
//!
//! Fetches the day's schedule, scores both sides of every matchup from the
//! latest team and pitcher statistics, and emits winner predictions.

use clap::{Parser, Subcommand};
use diamond::{Config, Result};

#[derive(Parser)]
#[command(name = "diamond")]
#[command(about = "MLB game outcome prediction from team and pitcher statistics", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Data management commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Predict winners for the scheduled games
    Predict {
        /// Output format: table, json, or csv
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Create a default config file
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Fetch the schedule with probable pitchers from the MLB Stats API
    FetchSchedule {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show row counts for the statistic tables
    Status,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Data { action } => match action {
            DataCommands::FetchSchedule { date } => commands::fetch_schedule(&config, date),
            DataCommands::Status => commands::data_status(&config),
        },
        Commands::Predict { format } => commands::predict(&config, format),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use chrono::NaiveDate;
    use diamond::data::{tables, ScheduleClient, StatStore};
    use diamond::predict::{format_prediction, MatchupResolver};
    use diamond::DiamondError;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize file paths", config_path);
        println!("  2. Place team_stats.csv, hitting_stats.csv, pitcher_stats.csv and weights.csv under data/");
        println!("  3. Run 'diamond data fetch-schedule' to pull today's matchups");
        println!("  4. Run 'diamond predict'");

        Ok(())
    }

    pub fn fetch_schedule(config: &Config, date: Option<String>) -> Result<()> {
        let date = match date {
            Some(raw) => raw
                .parse::<NaiveDate>()
                .map_err(|e| DiamondError::Parse(format!("bad date {}: {}", raw, e)))?,
            None => chrono::Local::now().date_naive(),
        };

        log::info!("Fetching schedule for {}", date);
        let games = ScheduleClient::new().fetch(date)?;
        if games.is_empty() {
            println!("No games scheduled for {}", date);
            return Ok(());
        }

        tables::write_schedule(&config.data.schedule_path, &games)?;
        println!(
            "Saved {} games to {}",
            games.len(),
            config.data.schedule_path
        );
        Ok(())
    }

    pub fn data_status(config: &Config) -> Result<()> {
        let games = tables::load_schedule(&config.data.schedule_path)?;
        let store = load_store(config)?;
        let weights = tables::load_weights(&config.data.weights_path)?;

        println!("Data Status");
        println!("───────────────────────────────");
        println!("  Scheduled games: {}", games.len());
        println!("  Teams:           {}", store.team_count());
        println!("  Pitchers:        {}", store.pitcher_count());
        println!("  Weights:         {}", weights.len());

        Ok(())
    }

    pub fn predict(config: &Config, format: OutputFormat) -> Result<()> {
        let games = tables::load_schedule(&config.data.schedule_path)?;
        let store = load_store(config)?;
        let weights = tables::load_weights(&config.data.weights_path)?;

        let resolver = MatchupResolver::new(&store, &weights, config.matching.threshold);
        let results = resolver.predict_slate(&games);

        let mut predictions = Vec::new();
        for (game, result) in games.iter().zip(results) {
            match result {
                Ok(prediction) => predictions.push(prediction),
                Err(e) => log::warn!("Skipping {}: {}", game.matchup(), e),
            }
        }
        log::info!("Predicted {} of {} games", predictions.len(), games.len());

        tables::write_predictions(&config.data.predictions_path, &predictions)?;

        match format {
            OutputFormat::Table => {
                for prediction in &predictions {
                    print!("{}", format_prediction(prediction));
                }
            }
            OutputFormat::Json => {
                let rows: Vec<_> = predictions
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "date": p.date.to_string(),
                            "home_team": p.home_team,
                            "away_team": p.away_team,
                            "home_score": tables::round3(p.home_score),
                            "away_score": tables::round3(p.away_score),
                            "predicted_winner": p.predicted_winner,
                            "pitching_stats_used": p.pitching_stats_used,
                            "note": p.note,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&rows)
                        .map_err(|e| DiamondError::Parse(e.to_string()))?
                );
            }
            OutputFormat::Csv => {
                println!("date,home_team,away_team,home_score,away_score,predicted_winner,pitching_stats_used,note");
                for p in &predictions {
                    println!(
                        "{},{},{},{:.3},{:.3},{},{},{}",
                        p.date,
                        p.home_team,
                        p.away_team,
                        p.home_score,
                        p.away_score,
                        p.predicted_winner,
                        p.pitching_stats_used,
                        p.note
                    );
                }
            }
        }

        println!(
            "\nPredictions saved to {}",
            config.data.predictions_path
        );
        Ok(())
    }

    fn load_store(config: &Config) -> Result<StatStore> {
        Ok(StatStore::new(
            tables::load_team_stats(&config.data.team_stats_path)?,
            tables::load_hitting_stats(&config.data.hitting_stats_path)?,
            tables::load_pitcher_stats(&config.data.pitcher_stats_path)?,
        ))
    }
}
