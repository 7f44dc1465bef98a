//! Least-squares trend extrapolation

use crate::features::mean;
use crate::{GameRecord, Stat};
use serde::Serialize;

/// Minimum number of games needed to fit a trend
pub const MIN_GAMES_FOR_PREDICTION: usize = 5;

/// Slopes smaller than this are reported as flat
const FLAT_SLOPE: f64 = 0.05;

/// Ordinary least-squares line through (index, value) points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fit values against their index 0..n-1
    ///
    /// Needs at least two points.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }

        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mean_x = mean(&xs)?;
        let mean_y = mean(values)?;

        let (covariance, variance) = xs.iter().zip(values).fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

        let slope = covariance / variance;
        Some(TrendLine {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Evaluate the line at game index `x`
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Arrow showing the direction of the trend
    pub fn direction(&self) -> &'static str {
        if self.slope.abs() < FLAT_SLOPE {
            "→"
        } else if self.slope > 0.0 {
            "↑"
        } else {
            "↓"
        }
    }
}

/// Fitted trend and next-game value for one statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatTrend {
    pub stat: Stat,
    pub line: TrendLine,
    pub predicted: f64,
}

/// Next-game predictions for points, rebounds and assists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPrediction {
    pub games_used: usize,
    pub points: StatTrend,
    pub rebounds: StatTrend,
    pub assists: StatTrend,
}

impl TrendPrediction {
    /// Base-stat trends in display order
    pub fn trends(&self) -> [StatTrend; 3] {
        [self.points, self.rebounds, self.assists]
    }

    /// Predicted value for a statistic; `Stat::Combined` sums the base predictions
    pub fn predicted(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Points => self.points.predicted,
            Stat::Rebounds => self.rebounds.predicted,
            Stat::Assists => self.assists.predicted,
            Stat::Combined => self.combined(),
        }
    }

    /// Predicted points + rebounds + assists
    pub fn combined(&self) -> f64 {
        self.points.predicted + self.rebounds.predicted + self.assists.predicted
    }
}

/// Result of a prediction attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TrendOutcome {
    Predicted(TrendPrediction),
    /// Too few games to fit a trend
    InsufficientData { available: usize, required: usize },
}

/// Predict the next game from games in chronological order
///
/// Each base statistic gets its own line over game index; the prediction is
/// the line evaluated one step past the last game. Values are not clamped.
pub fn predict_next(games: &[GameRecord]) -> TrendOutcome {
    let insufficient = TrendOutcome::InsufficientData {
        available: games.len(),
        required: MIN_GAMES_FOR_PREDICTION,
    };
    if games.len() < MIN_GAMES_FOR_PREDICTION {
        return insufficient;
    }

    let next_index = games.len() as f64;
    let trend = |stat: Stat| -> Option<StatTrend> {
        let values: Vec<f64> = games.iter().map(|g| g.stat(stat)).collect();
        let line = TrendLine::fit(&values)?;
        Some(StatTrend {
            stat,
            line,
            predicted: line.at(next_index),
        })
    };
    let (Some(points), Some(rebounds), Some(assists)) = (
        trend(Stat::Points),
        trend(Stat::Rebounds),
        trend(Stat::Assists),
    ) else {
        return insufficient;
    };

    log::debug!("Fitted trends over {} games", games.len());
    TrendOutcome::Predicted(TrendPrediction {
        games_used: games.len(),
        points,
        rebounds,
        assists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn make_games(stats: &[(f64, f64, f64)]) -> Vec<GameRecord> {
        let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        stats
            .iter()
            .enumerate()
            .map(|(i, &(pts, reb, ast))| {
                let date = start.checked_add_days(Days::new(i as u64 * 30)).unwrap();
                GameRecord::from_matchup(date, "PHX vs. DAL", pts, reb, ast).unwrap()
            })
            .collect()
    }

    fn predicted(outcome: &TrendOutcome) -> &TrendPrediction {
        match outcome {
            TrendOutcome::Predicted(p) => p,
            other => panic!("expected prediction, got {:?}", other),
        }
    }

    #[test]
    fn test_fit_line() {
        let line = TrendLine::fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 1.0).abs() < 1e-9);
        assert!((line.at(4.0) - 9.0).abs() < 1e-9);
        assert!(TrendLine::fit(&[3.0]).is_none());
    }

    #[test]
    fn test_linear_points_extrapolate() {
        let games = make_games(&[
            (10.0, 5.0, 3.0),
            (12.0, 5.0, 3.0),
            (14.0, 5.0, 3.0),
            (16.0, 5.0, 3.0),
            (18.0, 5.0, 3.0),
        ]);
        let outcome = predict_next(&games);
        let prediction = predicted(&outcome);

        assert_eq!(prediction.games_used, 5);
        assert!((prediction.predicted(Stat::Points) - 20.0).abs() < 1e-9);
        assert!((prediction.predicted(Stat::Rebounds) - 5.0).abs() < 1e-9);
        assert!((prediction.predicted(Stat::Assists) - 3.0).abs() < 1e-9);
        assert!((prediction.combined() - 28.0).abs() < 1e-9);
        assert!((prediction.predicted(Stat::Combined) - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_value_per_base_stat() {
        let games = make_games(&[
            (22.0, 7.0, 4.0),
            (31.0, 9.0, 2.0),
            (18.0, 11.0, 6.0),
            (27.0, 6.0, 8.0),
            (25.0, 8.0, 5.0),
            (29.0, 10.0, 7.0),
        ]);
        let outcome = predict_next(&games);
        let prediction = predicted(&outcome);
        let stats: Vec<Stat> = prediction.trends().iter().map(|t| t.stat).collect();
        assert_eq!(stats, Stat::BASE.to_vec());
        assert!(prediction.trends().iter().all(|t| t.predicted.is_finite()));
        for trend in prediction.trends() {
            assert_eq!(prediction.predicted(trend.stat), trend.predicted);
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let games = make_games(&[
            (22.0, 7.0, 4.0),
            (31.0, 9.0, 2.0),
            (18.0, 11.0, 6.0),
            (27.0, 6.0, 8.0),
            (25.0, 8.0, 5.0),
        ]);
        assert_eq!(predict_next(&games), predict_next(&games));
    }

    #[test]
    fn test_insufficient_games() {
        let games = make_games(&[(10.0, 5.0, 3.0); 4]);
        assert_eq!(
            predict_next(&games),
            TrendOutcome::InsufficientData {
                available: 4,
                required: MIN_GAMES_FOR_PREDICTION,
            }
        );
    }

    #[test]
    fn test_no_games() {
        assert_eq!(
            predict_next(&[]),
            TrendOutcome::InsufficientData {
                available: 0,
                required: MIN_GAMES_FOR_PREDICTION,
            }
        );
    }

    #[test]
    fn test_prediction_is_not_clamped() {
        let games = make_games(&[
            (20.0, 4.0, 9.0),
            (15.0, 3.0, 7.0),
            (10.0, 2.0, 5.0),
            (5.0, 1.0, 3.0),
            (0.0, 0.0, 1.0),
        ]);
        let outcome = predict_next(&games);
        let prediction = predicted(&outcome);
        assert!((prediction.predicted(Stat::Points) + 5.0).abs() < 1e-9);
        assert!((prediction.predicted(Stat::Rebounds) + 1.0).abs() < 1e-9);
        assert!((prediction.predicted(Stat::Assists) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_direction() {
        let up = TrendLine { slope: 1.2, intercept: 0.0 };
        let down = TrendLine { slope: -0.6, intercept: 0.0 };
        let flat = TrendLine { slope: 0.01, intercept: 0.0 };
        assert_eq!(up.direction(), "↑");
        assert_eq!(down.direction(), "↓");
        assert_eq!(flat.direction(), "→");
    }
}
