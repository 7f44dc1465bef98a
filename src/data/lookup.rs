//! Player and team identity lookups

use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// An NBA franchise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub full_name: String,
    pub abbreviation: String,
    pub nickname: String,
    /// Other names the franchise goes by
    pub aliases: Vec<String>,
    /// Abbreviations used by earlier incarnations of the franchise
    pub former_abbreviations: Vec<String>,
}

impl Team {
    fn new(full_name: &str, abbreviation: &str, nickname: &str, former: &[&str]) -> Self {
        Team {
            full_name: full_name.to_string(),
            abbreviation: abbreviation.to_string(),
            nickname: nickname.to_string(),
            aliases: vec![],
            former_abbreviations: former.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn matches_name(&self, name: &str) -> bool {
        let name_lower = name.trim().to_lowercase();
        self.full_name.to_lowercase() == name_lower
            || self.nickname.to_lowercase() == name_lower
            || self.abbreviation.to_lowercase() == name_lower
            || self.aliases.iter().any(|a| a.to_lowercase() == name_lower)
    }

    /// Whether a matchup abbreviation refers to this franchise
    pub fn has_abbreviation(&self, abbreviation: &str) -> bool {
        let abbreviation = abbreviation.trim();
        self.abbreviation.eq_ignore_ascii_case(abbreviation)
            || self
                .former_abbreviations
                .iter()
                .any(|a| a.eq_ignore_ascii_case(abbreviation))
    }
}

/// Directory of current franchises
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    teams: Vec<Team>,
}

impl TeamDirectory {
    /// The 30 current NBA franchises
    pub fn nba() -> Self {
        let teams = vec![
            Team::new("Atlanta Hawks", "ATL", "Hawks", &[]),
            Team::new("Boston Celtics", "BOS", "Celtics", &[]),
            Team::new("Brooklyn Nets", "BKN", "Nets", &["NJN"]),
            Team::new("Charlotte Hornets", "CHA", "Hornets", &[]),
            Team::new("Chicago Bulls", "CHI", "Bulls", &[]),
            Team::new("Cleveland Cavaliers", "CLE", "Cavaliers", &[]),
            Team::new("Dallas Mavericks", "DAL", "Mavericks", &[]),
            Team::new("Denver Nuggets", "DEN", "Nuggets", &[]),
            Team::new("Detroit Pistons", "DET", "Pistons", &[]),
            Team::new("Golden State Warriors", "GSW", "Warriors", &[]),
            Team::new("Houston Rockets", "HOU", "Rockets", &[]),
            Team::new("Indiana Pacers", "IND", "Pacers", &[]),
            Team::new("Los Angeles Clippers", "LAC", "Clippers", &[]).with_alias("LA Clippers"),
            Team::new("Los Angeles Lakers", "LAL", "Lakers", &[]),
            Team::new("Memphis Grizzlies", "MEM", "Grizzlies", &["VAN"]),
            Team::new("Miami Heat", "MIA", "Heat", &[]),
            Team::new("Milwaukee Bucks", "MIL", "Bucks", &[]),
            Team::new("Minnesota Timberwolves", "MIN", "Timberwolves", &[]),
            Team::new("New Orleans Pelicans", "NOP", "Pelicans", &["NOH", "NOK"]),
            Team::new("New York Knicks", "NYK", "Knicks", &[]),
            Team::new("Oklahoma City Thunder", "OKC", "Thunder", &["SEA"]),
            Team::new("Orlando Magic", "ORL", "Magic", &[]),
            Team::new("Philadelphia 76ers", "PHI", "76ers", &[]),
            Team::new("Phoenix Suns", "PHX", "Suns", &[]),
            Team::new("Portland Trail Blazers", "POR", "Trail Blazers", &[]),
            Team::new("Sacramento Kings", "SAC", "Kings", &[]),
            Team::new("San Antonio Spurs", "SAS", "Spurs", &[]),
            Team::new("Toronto Raptors", "TOR", "Raptors", &[]),
            Team::new("Utah Jazz", "UTA", "Jazz", &[]),
            Team::new("Washington Wizards", "WAS", "Wizards", &[]),
        ];
        TeamDirectory { teams }
    }

    /// Find a team by full name, nickname or abbreviation
    pub fn find(&self, name: &str) -> Option<&Team> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.teams.iter().find(|t| t.matches_name(name))
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

/// A player known to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    pub is_active: bool,
}

/// Directory of players returned by the provider
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: Vec<Player>,
}

impl PlayerDirectory {
    pub fn new(players: Vec<Player>) -> Self {
        PlayerDirectory { players }
    }

    /// Find a player by full name (case-insensitive)
    ///
    /// When several players share a name, an active one is preferred.
    pub fn find(&self, full_name: &str) -> Option<&Player> {
        let wanted = normalize_name(full_name);
        if wanted.is_empty() {
            return None;
        }

        let mut matches = self
            .players
            .iter()
            .filter(|p| normalize_name(&p.full_name) == wanted);
        let first = matches.next()?;
        if first.is_active {
            return Some(first);
        }
        matches.find(|p| p.is_active).or(Some(first))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Lowercase and collapse internal whitespace
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_directory_has_all_franchises() {
        let teams = TeamDirectory::nba();
        assert_eq!(teams.teams().len(), 30);
    }

    #[test]
    fn test_find_team() {
        let teams = TeamDirectory::nba();

        let team = teams.find("Boston Celtics").unwrap();
        assert_eq!(team.abbreviation, "BOS");

        let team = teams.find("  golden state warriors ").unwrap();
        assert_eq!(team.abbreviation, "GSW");

        let team = teams.find("Lakers").unwrap();
        assert_eq!(team.abbreviation, "LAL");

        let team = teams.find("phx").unwrap();
        assert_eq!(team.full_name, "Phoenix Suns");

        let team = teams.find("LA Clippers").unwrap();
        assert_eq!(team.abbreviation, "LAC");

        assert!(teams.find("Seattle Storm").is_none());
        assert!(teams.find("").is_none());
    }

    #[test]
    fn test_former_abbreviations() {
        let teams = TeamDirectory::nba();
        let thunder = teams.find("Oklahoma City Thunder").unwrap();
        assert!(thunder.has_abbreviation("OKC"));
        assert!(thunder.has_abbreviation("SEA"));
        assert!(!thunder.has_abbreviation("SAS"));
    }

    #[test]
    fn test_find_player() {
        let players = PlayerDirectory::new(vec![
            Player {
                id: PlayerId(2544),
                full_name: "LeBron James".to_string(),
                is_active: true,
            },
            Player {
                id: PlayerId(201939),
                full_name: "Stephen Curry".to_string(),
                is_active: true,
            },
        ]);

        assert_eq!(players.find("lebron  james").unwrap().id, PlayerId(2544));
        assert_eq!(players.find("Stephen Curry").unwrap().id, PlayerId(201939));
        assert!(players.find("Steph").is_none());
        assert!(players.find("   ").is_none());
    }

    #[test]
    fn test_find_player_prefers_active() {
        let players = PlayerDirectory::new(vec![
            Player {
                id: PlayerId(1),
                full_name: "Gary Payton".to_string(),
                is_active: false,
            },
            Player {
                id: PlayerId(2),
                full_name: "Gary Payton".to_string(),
                is_active: true,
            },
        ]);
        assert_eq!(players.find("Gary Payton").unwrap().id, PlayerId(2));
    }
}
