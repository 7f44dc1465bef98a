//! Performance charts
//!
//! Builds a 2×2 grid of bar charts (points, rebounds, assists, PRA) from a
//! head-to-head game log. Bars above the series average use a highlight color,
//! and each panel carries a dashed reference line at the average.

pub mod svg;

use crate::data::GameLog;
use crate::features::StatSeries;
use crate::Stat;
use serde::Serialize;

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 800;

/// Reference line color
pub const MEAN_LINE_COLOR: &str = "gray";

/// Two-color palette for one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub above: &'static str,
    pub below: &'static str,
}

impl Palette {
    pub fn for_stat(stat: Stat) -> Self {
        match stat {
            Stat::Points => Palette {
                above: "#4CAF50",
                below: "#2196F3",
            },
            Stat::Rebounds => Palette {
                above: "#FFA726",
                below: "#FFEB3B",
            },
            Stat::Assists => Palette {
                above: "#AB47BC",
                below: "#9575CD",
            },
            Stat::Combined => Palette {
                above: "#FF3D00",
                below: "#FF8A65",
            },
        }
    }

    /// Pick the color for a value relative to the series mean
    pub fn color(&self, value: f64, mean: f64) -> &'static str {
        if value > mean {
            self.above
        } else {
            self.below
        }
    }
}

/// One bar in a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// One statistic's bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub stat: Stat,
    pub title: String,
    pub row: usize,
    pub col: usize,
    pub bars: Vec<Bar>,
    pub mean: f64,
    /// Reference line annotation, e.g. "Avg PTS: 24.3"
    pub annotation: String,
}

/// Complete 2×2 figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceChart {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Panel>,
}

impl PerformanceChart {
    pub fn panel(&self, stat: Stat) -> Option<&Panel> {
        self.panels.iter().find(|p| p.stat == stat)
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self) -> String {
        svg::render(self)
    }

    /// Write the SVG document to a file, creating parent directories
    pub fn save_svg<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_svg())?;
        log::info!("Wrote chart to {}", path.display());
        Ok(())
    }
}

/// Build the performance chart for a head-to-head log
///
/// Returns None when there are no games.
pub fn build_chart(
    games: &GameLog,
    player_label: &str,
    opponent_label: &str,
    seasons: usize,
) -> Option<PerformanceChart> {
    if games.is_empty() {
        return None;
    }

    let games = games.chronological();
    let labels: Vec<String> = games.iter().map(|g| g.label()).collect();

    let mut panels = Vec::with_capacity(Stat::ALL.len());
    for (i, stat) in Stat::ALL.into_iter().enumerate() {
        let series = StatSeries::from_games(stat, &games);
        let mean = series.mean()?;
        let palette = Palette::for_stat(stat);

        let bars = labels
            .iter()
            .zip(&series.values)
            .map(|(label, &value)| Bar {
                label: label.clone(),
                value,
                color: palette.color(value, mean),
            })
            .collect();

        panels.push(Panel {
            stat,
            title: format!("{} - {} vs {}", player_label, stat.label(), opponent_label),
            row: i / 2,
            col: i % 2,
            bars,
            mean,
            annotation: format!("Avg {}: {:.1}", stat.code(), mean),
        });
    }

    Some(PerformanceChart {
        title: format!(
            "{} vs {} Performance (Last {} Seasons)",
            player_label, opponent_label, seasons
        ),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRecord;
    use chrono::NaiveDate;

    fn warriors_log() -> GameLog {
        // Provider order: newest first
        let rows = [
            (2024, 3, 16, "LAL @ GSW", 36.0, 8.0, 10.0),
            (2024, 1, 27, "LAL @ GSW", 36.0, 20.0, 12.0),
            (2023, 3, 5, "LAL vs. GSW", 21.0, 6.0, 4.0),
            (2022, 10, 18, "LAL vs. GSW", 31.0, 14.0, 8.0),
        ];
        GameLog::new(
            rows.iter()
                .map(|&(y, m, d, matchup, pts, reb, ast)| {
                    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                    GameRecord::from_matchup(date, matchup, pts, reb, ast).unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_log_builds_nothing() {
        assert!(build_chart(&GameLog::default(), "LeBron James", "Warriors", 3).is_none());
    }

    #[test]
    fn test_layout_and_titles() {
        let chart =
            build_chart(&warriors_log(), "LeBron James", "Golden State Warriors", 3).unwrap();
        assert_eq!(chart.width, 1200);
        assert_eq!(chart.height, 800);
        assert_eq!(
            chart.title,
            "LeBron James vs Golden State Warriors Performance (Last 3 Seasons)"
        );

        let positions: Vec<(Stat, usize, usize)> =
            chart.panels.iter().map(|p| (p.stat, p.row, p.col)).collect();
        assert_eq!(
            positions,
            vec![
                (Stat::Points, 0, 0),
                (Stat::Rebounds, 0, 1),
                (Stat::Assists, 1, 0),
                (Stat::Combined, 1, 1),
            ]
        );
        assert_eq!(
            chart.panel(Stat::Combined).unwrap().title,
            "LeBron James - PRA (PTS+REB+AST) vs Golden State Warriors"
        );
    }

    #[test]
    fn test_bars_are_chronological() {
        let chart = build_chart(&warriors_log(), "LeBron James", "Warriors", 3).unwrap();
        let points = chart.panel(Stat::Points).unwrap();
        let labels: Vec<&str> = points.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Oct 18, 2022 (Home)",
                "Mar 05, 2023 (Home)",
                "Jan 27, 2024 (Away)",
                "Mar 16, 2024 (Away)",
            ]
        );
    }

    #[test]
    fn test_means_and_annotations() {
        let chart = build_chart(&warriors_log(), "LeBron James", "Warriors", 3).unwrap();

        let points = chart.panel(Stat::Points).unwrap();
        assert!((points.mean - 31.0).abs() < 1e-9);
        assert_eq!(points.annotation, "Avg PTS: 31.0");

        let rebounds = chart.panel(Stat::Rebounds).unwrap();
        assert!((rebounds.mean - 12.0).abs() < 1e-9);

        let combined = chart.panel(Stat::Combined).unwrap();
        assert!((combined.mean - 51.5).abs() < 1e-9);
        assert_eq!(combined.annotation, "Avg PRA: 51.5");
    }

    #[test]
    fn test_combined_bars_sum_base_stats() {
        let log = warriors_log();
        let chart = build_chart(&log, "LeBron James", "Warriors", 3).unwrap();
        let combined = chart.panel(Stat::Combined).unwrap();

        for (game, bar) in log.chronological().iter().zip(&combined.bars) {
            assert_eq!(bar.value, game.points + game.rebounds + game.assists);
        }
    }

    #[test]
    fn test_bar_colors_follow_mean() {
        let chart = build_chart(&warriors_log(), "LeBron James", "Warriors", 3).unwrap();

        for panel in &chart.panels {
            let palette = Palette::for_stat(panel.stat);
            for bar in &panel.bars {
                let expected = if bar.value > panel.mean {
                    palette.above
                } else {
                    palette.below
                };
                assert_eq!(bar.color, expected);
            }
        }

        // Points: 31, 21, 36, 36 against a mean of 31; equal to the mean is not above it
        let colors: Vec<&str> = chart
            .panel(Stat::Points)
            .unwrap()
            .bars
            .iter()
            .map(|b| b.color)
            .collect();
        assert_eq!(colors, vec!["#2196F3", "#2196F3", "#4CAF50", "#4CAF50"]);
    }

    #[test]
    fn test_chart_serializes_to_json() {
        let chart = build_chart(&warriors_log(), "LeBron James", "Warriors", 2).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["panels"].as_array().unwrap().len(), 4);
        assert_eq!(json["panels"][0]["stat"], "Points");
        assert_eq!(json["panels"][0]["bars"][0]["color"], "#2196F3");
    }
}
