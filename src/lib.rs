//! Head-to-head basketball player trends
//!
//! Looks up a player's game log against one opponent, extrapolates a linear
//! trend for the next meeting and draws per-stat bar charts.

pub mod chart;
pub mod data;
pub mod display;
pub mod features;
pub mod predict;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Provider-assigned identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// NBA season, identified by the calendar year it starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    /// Month the regular season tips off
    const FIRST_MONTH: u32 = 10;
    /// Start year of the league's first season (1946-47)
    pub const FIRST_START_YEAR: i32 = 1946;

    pub fn new(start_year: i32) -> Self {
        Season { start_year }
    }

    /// The season a given date falls in
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= Self::FIRST_MONTH {
            Season::new(date.year())
        } else {
            Season::new(date.year() - 1)
        }
    }

    /// The `n` most recent seasons as of `today`, newest first
    ///
    /// Never reaches back past the league's first season.
    pub fn last_n(today: NaiveDate, n: usize) -> Vec<Season> {
        let current = Self::containing(today);
        let back = i32::try_from(n).unwrap_or(i32::MAX);
        let oldest = current
            .start_year
            .saturating_sub(back)
            .saturating_add(1)
            .max(Self::FIRST_START_YEAR);
        (oldest..=current.start_year).rev().map(Season::new).collect()
    }

    /// Provider season id, e.g. "2024-25"
    pub fn id(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Where the player's team played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Away,
}

impl Location {
    const HOME_SEPARATOR: &'static str = " vs. ";
    const AWAY_SEPARATOR: &'static str = " @ ";

    /// Split a matchup string ("LAL vs. BOS", "LAL @ BOS") into location and opponent
    pub fn parse_matchup(matchup: &str) -> Option<(Location, String)> {
        let (location, opponent) =
            if let Some((_, opp)) = matchup.split_once(Self::HOME_SEPARATOR) {
                (Location::Home, opp)
            } else if let Some((_, opp)) = matchup.split_once(Self::AWAY_SEPARATOR) {
                (Location::Away, opp)
            } else {
                return None;
            };

        let opponent = opponent.trim();
        if opponent.is_empty() {
            return None;
        }
        Some((location, opponent.to_uppercase()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Home => write!(f, "Home"),
            Location::Away => write!(f, "Away"),
        }
    }
}

/// A per-game statistic series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Points,
    Rebounds,
    Assists,
    /// Points + rebounds + assists
    Combined,
}

impl Stat {
    /// Statistics fitted and reported by the provider
    pub const BASE: [Stat; 3] = [Stat::Points, Stat::Rebounds, Stat::Assists];

    /// Every charted series, in panel order
    pub const ALL: [Stat; 4] = [Stat::Points, Stat::Rebounds, Stat::Assists, Stat::Combined];

    pub fn code(&self) -> &'static str {
        match self {
            Stat::Points => "PTS",
            Stat::Rebounds => "REB",
            Stat::Assists => "AST",
            Stat::Combined => "PRA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Points => "Points",
            Stat::Rebounds => "Rebounds",
            Stat::Assists => "Assists",
            Stat::Combined => "PRA",
        }
    }

    /// Long label used in chart panel titles
    pub fn label(&self) -> &'static str {
        match self {
            Stat::Points => "Points (PTS)",
            Stat::Rebounds => "Rebounds (REB)",
            Stat::Assists => "Assists (AST)",
            Stat::Combined => "PRA (PTS+REB+AST)",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single game from a player's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub matchup: String,
    pub location: Location,
    /// Opponent abbreviation as written in the matchup
    pub opponent: String,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

impl GameRecord {
    /// Build a record, deriving location and opponent from the matchup string
    pub fn from_matchup(
        date: NaiveDate,
        matchup: &str,
        points: f64,
        rebounds: f64,
        assists: f64,
    ) -> Result<Self> {
        let (location, opponent) = Location::parse_matchup(matchup)
            .ok_or_else(|| HoopsError::Parse(format!("Unrecognised matchup: {:?}", matchup)))?;

        Ok(GameRecord {
            date,
            matchup: matchup.to_string(),
            location,
            opponent,
            points,
            rebounds,
            assists,
        })
    }

    /// Points + rebounds + assists
    pub fn combined(&self) -> f64 {
        self.points + self.rebounds + self.assists
    }

    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
            Stat::Combined => self.combined(),
        }
    }

    /// Display label, e.g. "Jan 05, 2024 (Home)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.date.format("%b %d, %Y"), self.location)
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("Data provider failed: {0}")]
    Provider(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from hoops.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Directory for cached provider responses
    pub cache_dir: Option<String>,
    /// Only serve responses from the cache
    pub offline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of most recent head-to-head games to show
    pub games: usize,
    /// Number of seasons to search
    pub seasons: usize,
    pub chart_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig {
                base_url: "https://stats.nba.com/stats".to_string(),
                user_agent: "Mozilla/5.0 (X11; Linux x86_64) hoops/0.1".to_string(),
                timeout_secs: 30,
                cache_dir: None,
                offline: false,
            },
            display: DisplayConfig {
                games: 10,
                seasons: 3,
                chart_path: "charts/performance.svg".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
