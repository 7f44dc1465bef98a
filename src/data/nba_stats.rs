//! NBA stats API client
//!
//! Fetches the player directory and per-season game logs from
//! stats.nba.com. Responses can be cached on disk for offline use.

use super::lookup::{Player, PlayerDirectory};
use super::GameLogProvider;
use crate::{GameRecord, HoopsError, PlayerId, ProviderConfig, Result, Season};
use chrono::NaiveDate;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LEAGUE_ID: &str = "00";
const SEASON_TYPE: &str = "Regular Season";

static NULL_CELL: Value = Value::Null;

/// Blocking client for the NBA stats endpoints
pub struct NbaStatsClient {
    client: reqwest::blocking::Client,
    base_url: String,
    /// Optional cache directory for raw JSON responses
    cache_dir: Option<PathBuf>,
    /// If true, only use cache (no network requests)
    offline_only: bool,
}

impl NbaStatsClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut stats_client = NbaStatsClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache_dir: None,
            offline_only: config.offline,
        };
        if let Some(dir) = &config.cache_dir {
            stats_client = stats_client.with_cache(dir);
        }
        Ok(stats_client)
    }

    /// Create client with a cache directory
    pub fn with_cache<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.as_ref().to_path_buf());
        self
    }

    /// Set offline-only mode (no network requests, cache must exist)
    pub fn offline_only(mut self, offline: bool) -> Self {
        self.offline_only = offline;
        self
    }

    /// stats.nba.com rejects requests that don't look like they came from nba.com
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(
            HeaderName::from_static("x-nba-stats-origin"),
            HeaderValue::from_static("stats"),
        );
        headers.insert(
            HeaderName::from_static("x-nba-stats-token"),
            HeaderValue::from_static("true"),
        );
        headers
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.base_url, endpoint);
        Url::parse_with_params(&base, params)
            .map_err(|e| HoopsError::Provider(format!("Invalid URL {}: {}", base, e)))
    }

    /// Get the cache file path for a URL
    fn cache_path(&self, url: &Url) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| {
            let filename = url
                .as_str()
                .replace("https://", "")
                .replace("http://", "")
                .replace(|c: char| matches!(c, '/' | '?' | '&' | '=' | ' ' | '+' | '%'), "_")
                + ".json";
            dir.join(filename)
        })
    }

    fn load_from_cache(&self, url: &Url) -> Option<String> {
        let path = self.cache_path(url)?;
        if path.exists() {
            log::debug!("Loading from cache: {}", path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    fn save_to_cache(&self, url: &Url, body: &str) -> Result<()> {
        if let Some(path) = self.cache_path(url) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, body)?;
            log::debug!("Saved to cache: {}", path.display());
        }
        Ok(())
    }

    /// Fetch an endpoint, going through the cache when one is configured
    fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.endpoint_url(endpoint, params)?;

        if let Some(body) = self.load_from_cache(&url) {
            return Ok(body);
        }

        if self.offline_only {
            return Err(HoopsError::Provider(format!(
                "{} is not cached and offline mode is enabled",
                url
            )));
        }

        log::info!("Fetching {}", url);
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(HoopsError::Provider(format!(
                "{} returned {}",
                endpoint, status
            )));
        }

        let body = response.text()?;
        if let Err(e) = self.save_to_cache(&url, &body) {
            log::warn!("Failed to cache {}: {}", endpoint, e);
        }
        Ok(body)
    }
}

impl GameLogProvider for NbaStatsClient {
    fn player_directory(&self) -> Result<PlayerDirectory> {
        let season = Season::containing(chrono::Local::now().date_naive());
        let body = self.fetch(
            "commonallplayers",
            &[
                ("LeagueID", LEAGUE_ID.to_string()),
                ("Season", season.id()),
                ("IsOnlyCurrentSeason", "0".to_string()),
            ],
        )?;
        let directory = parse_player_directory(&body)?;
        log::debug!("Loaded {} players", directory.len());
        Ok(directory)
    }

    fn game_log(&self, player: PlayerId, season: Season) -> Result<Vec<GameRecord>> {
        let body = self.fetch(
            "playergamelog",
            &[
                ("PlayerID", player.0.to_string()),
                ("Season", season.id()),
                ("SeasonType", SEASON_TYPE.to_string()),
            ],
        )?;
        let games = parse_game_log(&body)?;
        log::debug!("{} {}: {} games", player, season, games.len());
        Ok(games)
    }
}

/// Envelope of every stats endpoint response
#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<ResultTable>,
    #[serde(rename = "resultSet")]
    result_set: Option<ResultTable>,
}

/// A named table of rows with a header row
#[derive(Debug, Clone, Deserialize)]
pub struct ResultTable {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Index of a column by header name
    pub fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(header))
            .ok_or_else(|| {
                HoopsError::Parse(format!("Column {} missing from {}", header, self.name))
            })
    }
}

/// Extract the first result table from a response body
fn first_table(body: &str) -> Result<ResultTable> {
    let response: StatsResponse = serde_json::from_str(body)?;
    response
        .result_sets
        .into_iter()
        .next()
        .or(response.result_set)
        .ok_or_else(|| HoopsError::Parse("Response contains no result set".to_string()))
}

/// Coerce a numeric cell that may arrive as a number or as text
/// Finite number from a numeric or text cell
fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|v: &f64| v.is_finite())
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a game date in any of the formats the provider uses
pub fn parse_game_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let formats = ["%b %d, %Y", "%Y-%m-%d", "%Y-%m-%dT%H:%M:%S"];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    // "2024-04-09T00:00:00" style timestamps with trailing parts
    text.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse a playergamelog response into records, most recent first
pub fn parse_game_log(body: &str) -> Result<Vec<GameRecord>> {
    let table = first_table(body)?;
    let date_col = table.column("GAME_DATE")?;
    let matchup_col = table.column("MATCHUP")?;
    let pts_col = table.column("PTS")?;
    let reb_col = table.column("REB")?;
    let ast_col = table.column("AST")?;

    let mut games = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = |idx: usize| row.get(idx).unwrap_or(&NULL_CELL);

        let Some(date) = value_as_string(cell(date_col)).and_then(|d| parse_game_date(&d)) else {
            log::warn!("Skipping row with unreadable date: {:?}", cell(date_col));
            continue;
        };
        let Some(matchup) = value_as_string(cell(matchup_col)) else {
            log::warn!("Skipping {} row without matchup", date);
            continue;
        };
        let (Some(points), Some(rebounds), Some(assists)) = (
            value_as_f64(cell(pts_col)),
            value_as_f64(cell(reb_col)),
            value_as_f64(cell(ast_col)),
        ) else {
            log::warn!("Skipping {} {} with non-numeric stats", date, matchup);
            continue;
        };

        match GameRecord::from_matchup(date, &matchup, points, rebounds, assists) {
            Ok(game) => games.push(game),
            Err(e) => log::warn!("Skipping {}: {}", date, e),
        }
    }

    games.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(games)
}

/// Parse a commonallplayers response
pub fn parse_player_directory(body: &str) -> Result<PlayerDirectory> {
    let table = first_table(body)?;
    let id_col = table.column("PERSON_ID")?;
    let name_col = table.column("DISPLAY_FIRST_LAST")?;
    let status_col = table.column("ROSTERSTATUS").ok();

    let players = table
        .rows
        .iter()
        .filter_map(|row| {
            let id = row.get(id_col).and_then(value_as_f64)? as i64;
            let full_name = row.get(name_col).and_then(value_as_string)?;
            let is_active = status_col
                .and_then(|col| row.get(col))
                .and_then(value_as_f64)
                .map(|s| s > 0.0)
                .unwrap_or(false);
            Some(Player {
                id: PlayerId(id),
                full_name,
                is_active,
            })
        })
        .collect();

    Ok(PlayerDirectory::new(players))
}
