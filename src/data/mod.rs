//! Data acquisition
//!
//! Provider access, identity lookups and head-to-head game log assembly.

pub mod game_log;
pub mod lookup;
pub mod nba_stats;

pub use game_log::{collect_head_to_head, GameLog};
pub use lookup::{Player, PlayerDirectory, Team, TeamDirectory};
pub use nba_stats::NbaStatsClient;

use crate::{GameRecord, PlayerId, Result, Season};

/// Trait for sources of player game logs
pub trait GameLogProvider {
    /// Every player the provider knows about
    fn player_directory(&self) -> Result<PlayerDirectory>;

    /// A player's regular-season games, most recent first
    fn game_log(&self, player: PlayerId, season: Season) -> Result<Vec<GameRecord>>;
}
