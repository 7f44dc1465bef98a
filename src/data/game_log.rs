//! Head-to-head game log assembly

use super::lookup::{Player, Team};
use super::GameLogProvider;
use crate::{GameRecord, HoopsError, Result, Season};
use serde::Serialize;

/// A player's games against one opponent, most recent first
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameLog {
    games: Vec<GameRecord>,
}

impl GameLog {
    /// Build from records in any order
    pub fn new(mut games: Vec<GameRecord>) -> Self {
        games.sort_by(|a, b| b.date.cmp(&a.date));
        GameLog { games }
    }

    /// Games newest first, as the provider lists them
    pub fn most_recent_first(&self) -> &[GameRecord] {
        &self.games
    }

    /// Games oldest first
    pub fn chronological(&self) -> Vec<GameRecord> {
        self.games.iter().rev().cloned().collect()
    }

    /// Keep only the `n` most recent games
    pub fn truncate(&mut self, n: usize) {
        self.games.truncate(n);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Collect a player's most recent games against an opponent
///
/// Seasons that fail to load are logged and skipped; an error is returned
/// only when every season failed.
pub fn collect_head_to_head(
    provider: &dyn GameLogProvider,
    player: &Player,
    opponent: &Team,
    seasons: &[Season],
    last_n: usize,
) -> Result<GameLog> {
    let mut games = Vec::new();
    let mut last_error: Option<HoopsError> = None;
    let mut loaded = 0;

    for &season in seasons {
        match provider.game_log(player.id, season) {
            Ok(season_games) => {
                loaded += 1;
                let before = games.len();
                games.extend(
                    season_games
                        .into_iter()
                        .filter(|g| opponent.has_abbreviation(&g.opponent)),
                );
                log::debug!(
                    "{} {}: {} games vs {}",
                    player.full_name,
                    season,
                    games.len() - before,
                    opponent.abbreviation
                );
            }
            Err(e) => {
                log::warn!("Failed to load {} for {}: {}", season, player.full_name, e);
                last_error = Some(e);
            }
        }
    }

    if loaded == 0 {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    let mut head_to_head = GameLog::new(games);
    head_to_head.truncate(last_n);
    log::info!(
        "Found {} games for {} vs {}",
        head_to_head.len(),
        player.full_name,
        opponent.full_name
    );
    Ok(head_to_head)
}
