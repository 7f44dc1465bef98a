//! Series extraction and averages

use crate::{GameRecord, Stat};

/// Arithmetic mean, or None for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// One statistic across a sequence of games
#[derive(Debug, Clone, PartialEq)]
pub struct StatSeries {
    pub stat: Stat,
    pub values: Vec<f64>,
}

impl StatSeries {
    /// Extract a statistic from games, keeping their order
    pub fn from_games(stat: Stat, games: &[GameRecord]) -> Self {
        StatSeries {
            stat,
            values: games.iter().map(|g| g.stat(stat)).collect(),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        mean(&self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn games() -> Vec<GameRecord> {
        [(30.0, 10.0, 5.0), (20.0, 4.0, 11.0), (25.0, 7.0, 8.0)]
            .iter()
            .enumerate()
            .map(|(i, &(pts, reb, ast))| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap();
                GameRecord::from_matchup(date, "MIL vs. CHI", pts, reb, ast).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_mean_is_order_independent() {
        let forward = mean(&[12.5, 3.0, 40.25, 7.0]).unwrap();
        let backward = mean(&[7.0, 40.25, 3.0, 12.5]).unwrap();
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn test_combined_series() {
        let games = games();
        let combined = StatSeries::from_games(Stat::Combined, &games);
        assert_eq!(combined.values, vec![45.0, 35.0, 40.0]);
        for (game, value) in games.iter().zip(&combined.values) {
            assert_eq!(game.points + game.rebounds + game.assists, *value);
        }
        assert_eq!(combined.mean(), Some(40.0));
    }

    #[test]
    fn test_series_keeps_order() {
        let points = StatSeries::from_games(Stat::Points, &games());
        assert_eq!(points.values, vec![30.0, 20.0, 25.0]);
        assert_eq!(points.len(), 3);
    }
}
