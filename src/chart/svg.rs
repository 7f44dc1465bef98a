//! SVG rendering for performance charts

use super::{Panel, PerformanceChart, MEAN_LINE_COLOR};
use std::fmt::Write;

const BACKGROUND: &str = "#111111";
const PLOT_BACKGROUND: &str = "#1b1b1b";
const TEXT_COLOR: &str = "#f2f5fa";
const GRID_COLOR: &str = "#2f2f2f";

const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARGIN_SIDE: f64 = 50.0;
/// Gaps between panels as a fraction of the figure size
const HORIZONTAL_SPACING: f64 = 0.12;
const VERTICAL_SPACING: f64 = 0.15;

const Y_TICKS: usize = 4;

/// Pixel rectangle of one panel's plot area
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Vertical value range of a panel
#[derive(Debug, Clone, Copy)]
struct YScale {
    min: f64,
    max: f64,
}

impl YScale {
    fn for_panel(panel: &Panel) -> Self {
        let values = panel.bars.iter().map(|b| b.value).chain([panel.mean]);
        let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let max = if hi > 0.0 { hi * 1.1 } else { 1.0 };
        let min = if lo < 0.0 { lo * 1.1 } else { 0.0 };
        YScale { min, max }
    }

    fn to_pixel(&self, value: f64, area: &PlotArea) -> f64 {
        area.top + area.height * (self.max - value) / (self.max - self.min)
    }
}

/// Render the chart as an SVG document
pub fn render(chart: &PerformanceChart) -> String {
    let width = chart.width as f64;
    let height = chart.height as f64;
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Helvetica, Arial, sans-serif">"#,
        w = chart.width,
        h = chart.height
    );
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        BACKGROUND
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="36" fill="{}" font-size="20" text-anchor="middle">{}</text>"#,
        width / 2.0,
        TEXT_COLOR,
        escape(&chart.title)
    );

    let h_gap = width * HORIZONTAL_SPACING;
    let v_gap = height * VERTICAL_SPACING;
    let cell_width = (width - 2.0 * MARGIN_SIDE - h_gap) / 2.0;
    let cell_height = (height - MARGIN_TOP - MARGIN_BOTTOM - v_gap) / 2.0;

    for panel in &chart.panels {
        let area = PlotArea {
            left: MARGIN_SIDE + panel.col as f64 * (cell_width + h_gap),
            top: MARGIN_TOP + panel.row as f64 * (cell_height + v_gap),
            width: cell_width,
            height: cell_height,
        };
        render_panel(&mut out, panel, &area);
    }

    out.push_str("</svg>\n");
    out
}

fn render_panel(out: &mut String, panel: &Panel, area: &PlotArea) {
    let scale = YScale::for_panel(panel);

    let _ = writeln!(out, r#"<g class="panel" data-stat="{}">"#, panel.stat.code());
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" fill="{}" font-size="13" text-anchor="middle">{}</text>"#,
        area.left + area.width / 2.0,
        area.top - 12.0,
        TEXT_COLOR,
        escape(&panel.title)
    );
    let _ = writeln!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
        area.left, area.top, area.width, area.height, PLOT_BACKGROUND
    );

    // Gridlines and y-axis labels
    for tick in 0..=Y_TICKS {
        let value = scale.min + (scale.max - scale.min) * tick as f64 / Y_TICKS as f64;
        let y = scale.to_pixel(value, area);
        let _ = writeln!(
            out,
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="1"/>"#,
            area.left,
            area.right(),
            GRID_COLOR,
            y = y
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" fill="{}" font-size="10" text-anchor="end">{:.0}</text>"#,
            area.left - 6.0,
            y + 3.0,
            TEXT_COLOR,
            value
        );
    }

    let zero = scale.to_pixel(0.0, area);
    let slot = area.width / panel.bars.len().max(1) as f64;
    for (i, bar) in panel.bars.iter().enumerate() {
        let x = area.left + i as f64 * slot + slot * 0.1;
        let top = scale.to_pixel(bar.value, area);
        let (y, h) = if top <= zero {
            (top, zero - top)
        } else {
            (zero, top - zero)
        };
        let _ = writeln!(
            out,
            r#"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            x,
            y,
            slot * 0.8,
            h,
            bar.color,
            escape(&bar.label),
            bar.value
        );

        let cx = area.left + (i as f64 + 0.5) * slot;
        let ly = area.bottom() + 12.0;
        let _ = writeln!(
            out,
            r#"<text x="{cx:.1}" y="{ly:.1}" fill="{}" font-size="9" text-anchor="end" transform="rotate(-30 {cx:.1} {ly:.1})">{}</text>"#,
            TEXT_COLOR,
            escape(&bar.label),
            cx = cx,
            ly = ly
        );
    }

    let mean_y = scale.to_pixel(panel.mean, area);
    let _ = writeln!(
        out,
        r#"<line class="mean" x1="{:.1}" y1="{my:.1}" x2="{:.1}" y2="{my:.1}" stroke="{}" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
        area.left,
        area.right(),
        MEAN_LINE_COLOR,
        my = mean_y
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" fill="{}" font-size="11" text-anchor="end">{}</text>"#,
        area.right() - 4.0,
        mean_y - 4.0,
        TEXT_COLOR,
        escape(&panel.annotation)
    );
    out.push_str("</g>\n");
}

/// Escape text for use in SVG content and attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_chart;
    use crate::data::GameLog;
    use crate::GameRecord;
    use chrono::NaiveDate;

    fn chart() -> PerformanceChart {
        let games = (0..5)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2023, 1 + i, 10).unwrap();
                let matchup = if i % 2 == 0 { "NYK vs. BKN" } else { "NYK @ BKN" };
                GameRecord::from_matchup(date, matchup, 20.0 + i as f64, 5.0, 6.0 - i as f64)
                    .unwrap()
            })
            .collect();
        build_chart(&GameLog::new(games), "Jalen Brunson", "Nets & Friends", 2).unwrap()
    }

    #[test]
    fn test_svg_document() {
        let svg = chart().to_svg();
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="1200""#));
        assert!(svg.contains(r#"height="800""#));
    }

    #[test]
    fn test_svg_has_every_bar_and_mean_line() {
        let svg = chart().to_svg();
        assert_eq!(svg.matches(r#"class="bar""#).count(), 20);
        assert_eq!(svg.matches(r#"class="mean""#).count(), 4);
        assert_eq!(svg.matches(r#"class="panel""#).count(), 4);
        assert!(svg.contains("Avg PTS: 22.0"));
        assert!(svg.contains("Avg PRA: 31.0"));
    }

    #[test]
    fn test_svg_uses_bar_colors() {
        let chart = chart();
        let svg = chart.to_svg();
        for panel in &chart.panels {
            for bar in &panel.bars {
                assert!(svg.contains(&format!(r#"fill="{}""#, bar.color)));
            }
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = chart().to_svg();
        assert!(svg.contains("Nets &amp; Friends"));
        assert!(!svg.contains("Nets & Friends"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'b' & c</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&apos;b&apos; &amp; c&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_y_scale_covers_values() {
        let chart = chart();
        let panel = chart.panel(crate::Stat::Points).unwrap();
        let scale = YScale::for_panel(panel);
        assert_eq!(scale.min, 0.0);
        assert!(scale.max >= 24.0);
    }
}
