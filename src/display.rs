//! Text output for game logs and predictions

use crate::data::GameLog;
use crate::predict::{TrendOutcome, TrendPrediction};
use crate::{GameRecord, HoopsError, Result, Stat};
use std::fmt::Write;

/// Output format for command results
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
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

/// Message shown for an expected, non-fatal condition
pub fn warning(message: &str) -> String {
    format!("⚠️  {}", message)
}

/// Format the game log as a table, most recent game first
pub fn format_game_table(games: &GameLog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<14} {:<5} {:>5} {:>5} {:>5} {:>5}",
        "Date", "Matchup", "Loc", "PTS", "REB", "AST", "PRA"
    );
    let _ = writeln!(out, "{}", "─".repeat(59));
    for game in games.most_recent_first() {
        let _ = writeln!(
            out,
            "{:<14} {:<14} {:<5} {:>5} {:>5} {:>5} {:>5}",
            game.date.format("%b %d, %Y").to_string(),
            game.matchup,
            game.location.to_string(),
            game.points,
            game.rebounds,
            game.assists,
            game.combined()
        );
    }
    out
}

/// Format the game log as CSV, most recent game first
pub fn format_game_csv(games: &GameLog) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["date", "matchup", "location", "opponent", "pts", "reb", "ast", "pra"])?;
    for game in games.most_recent_first() {
        writer.write_record(csv_row(game))?;
    }
    finish_csv(writer)
}

fn csv_row(game: &GameRecord) -> [String; 8] {
    [
        game.date.to_string(),
        game.matchup.clone(),
        game.location.to_string(),
        game.opponent.clone(),
        game.points.to_string(),
        game.rebounds.to_string(),
        game.assists.to_string(),
        game.combined().to_string(),
    ]
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = writer
        .into_inner()
        .map_err(|e| HoopsError::Io(e.into_error()))?;
    String::from_utf8(data)
        .map_err(|e| HoopsError::Parse(format!("CSV output is not UTF-8: {}", e)))
}

/// Format a prediction for display
pub fn format_prediction(pred: &TrendPrediction, player: &str, opponent: &str) -> String {
    let mut rows = String::new();
    for trend in pred.trends() {
        let _ = writeln!(
            rows,
            "│  {:<10} {:>6.1}  {}",
            trend.stat.name(),
            trend.predicted,
            trend.line.direction()
        );
    }

    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  {} vs {}: next game
├─────────────────────────────────────────────────┤
{}│  {:<10} {:>6.1}
│  Based on:  {} games
└─────────────────────────────────────────────────┘
"#,
        player,
        opponent,
        rows,
        Stat::Combined.name(),
        pred.combined(),
        pred.games_used
    )
}

fn not_enough_games(available: usize, required: usize) -> String {
    warning(&format!(
        "Not enough games to predict: found {}, need at least {}.",
        available, required
    ))
}

/// Warning for an outcome with too few games, None when a prediction was made
pub fn insufficient_warning(outcome: &TrendOutcome) -> Option<String> {
    match *outcome {
        TrendOutcome::Predicted(_) => None,
        TrendOutcome::InsufficientData {
            available,
            required,
        } => Some(not_enough_games(available, required)),
    }
}

/// Text for a prediction attempt, including the not-enough-games case
pub fn format_outcome(outcome: &TrendOutcome, player: &str, opponent: &str) -> String {
    match *outcome {
        TrendOutcome::Predicted(ref pred) => format_prediction(pred, player, opponent),
        TrendOutcome::InsufficientData {
            available,
            required,
        } => not_enough_games(available, required),
    }
}

/// Prediction as a JSON value
pub fn prediction_json(
    outcome: &TrendOutcome,
    player: &str,
    opponent: &str,
) -> serde_json::Value {
    match outcome {
        TrendOutcome::Predicted(pred) => serde_json::json!({
            "player": player,
            "opponent": opponent,
            "games_used": pred.games_used,
            "pts": pred.predicted(Stat::Points),
            "reb": pred.predicted(Stat::Rebounds),
            "ast": pred.predicted(Stat::Assists),
            "pra": pred.combined(),
            "trends": pred.trends(),
        }),
        TrendOutcome::InsufficientData {
            available,
            required,
        } => serde_json::json!({
            "player": player,
            "opponent": opponent,
            "insufficient_data": { "available": available, "required": required },
            "warning": insufficient_warning(outcome),
        }),
    }
}

/// Prediction as CSV (header + one row), or None when no prediction was made
pub fn prediction_csv(
    outcome: &TrendOutcome,
    player: &str,
    opponent: &str,
) -> Result<Option<String>> {
    let TrendOutcome::Predicted(pred) = outcome else {
        return Ok(None);
    };
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["player", "opponent", "games", "pts", "reb", "ast", "pra"])?;
    writer.write_record([
        player.to_string(),
        opponent.to_string(),
        pred.games_used.to_string(),
        format!("{:.2}", pred.predicted(Stat::Points)),
        format!("{:.2}", pred.predicted(Stat::Rebounds)),
        format!("{:.2}", pred.predicted(Stat::Assists)),
        format!("{:.2}", pred.combined()),
    ])?;
    finish_csv(writer).map(Some)
}

/// Game log CSV followed by the prediction CSV, or the warning when too few games
pub fn format_compare_csv(
    games: &GameLog,
    outcome: &TrendOutcome,
    player: &str,
    opponent: &str,
) -> Result<String> {
    let mut out = format_game_csv(games)?;
    out.push('\n');
    match prediction_csv(outcome, player, opponent)? {
        Some(csv) => out.push_str(&csv),
        None => {
            let _ = writeln!(out, "{}", format_outcome(outcome, player, opponent));
        }
    }
    Ok(out)
}
