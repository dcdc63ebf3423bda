// Grouped bar chart rendering, emitted as an SVG document

use anyhow::Result;

use backend_domain::ports::ChartRenderer;
use backend_domain::services::ChartData;
use backend_domain::DisplayCategory;

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 36.0;
const PLOT_HEIGHT: f64 = 220.0;
const BAR_WIDTH: f64 = 12.0;
const BAR_GAP: f64 = 3.0;
const CLUSTER_GAP: f64 = 20.0;

#[derive(Default)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, data: &ChartData) -> Result<Vec<u8>> {
        Ok(render_svg(data).into_bytes())
    }
}

/// One cluster of bars per calendar date, one bar per display category with
/// its stable color. Zero-count bars are left out of the cluster.
pub fn render_svg(data: &ChartData) -> String {
    let categories = DisplayCategory::ALL;
    let cluster_width =
        categories.len() as f64 * BAR_WIDTH + (categories.len() as f64 - 1.0) * BAR_GAP;
    let width = MARGIN_LEFT + data.days.len() as f64 * (cluster_width + CLUSTER_GAP) + MARGIN_RIGHT;
    let height = MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + PLOT_HEIGHT;
    let max = data.max_count().max(1) as f64;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    svg.push_str(&format!(
        r##"<rect width="{width:.0}" height="{height:.0}" fill="#ffffff"/>"##
    ));
    svg.push_str(&format!(
        r##"<text x="{MARGIN_LEFT}" y="20" font-family="sans-serif" font-size="15" font-weight="bold" fill="#0f172a">{}</text>"##,
        data.title
    ));

    // Legend row under the title.
    let mut legend_x = MARGIN_LEFT;
    for category in categories {
        svg.push_str(&format!(
            r#"<rect x="{legend_x:.1}" y="30" width="10" height="10" fill="{}"/>"#,
            category.color()
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="39" font-family="sans-serif" font-size="11" fill="#334155">{}</text>"##,
            legend_x + 14.0,
            category.label()
        ));
        legend_x += 14.0 + category.label().len() as f64 * 6.5 + 16.0;
    }

    // Axes and scale labels.
    svg.push_str(&format!(
        r##"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{baseline:.1}" stroke="#94a3b8"/>"##,
        x = MARGIN_LEFT - 8.0
    ));
    svg.push_str(&format!(
        r##"<line x1="{x:.1}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="#94a3b8"/>"##,
        width - MARGIN_RIGHT,
        x = MARGIN_LEFT - 8.0
    ));
    svg.push_str(&format!(
        r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="#334155" text-anchor="end">{}</text>"##,
        MARGIN_LEFT - 12.0,
        MARGIN_TOP + 4.0,
        max as u32
    ));
    svg.push_str(&format!(
        r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="#334155" text-anchor="end">0</text>"##,
        MARGIN_LEFT - 12.0,
        baseline + 4.0
    ));

    for (day_index, day) in data.days.iter().enumerate() {
        let cluster_x = MARGIN_LEFT + day_index as f64 * (cluster_width + CLUSTER_GAP);
        for category in categories {
            let count = day.counts[category.index()];
            if count == 0 {
                continue;
            }
            let bar_height = count as f64 / max * PLOT_HEIGHT;
            let x = cluster_x + category.index() as f64 * (BAR_WIDTH + BAR_GAP);
            svg.push_str(&format!(
                r#"<rect x="{x:.1}" y="{:.1}" width="{BAR_WIDTH}" height="{bar_height:.1}" fill="{}"/>"#,
                baseline - bar_height,
                category.color()
            ));
        }
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="#334155" text-anchor="middle">{}</text>"##,
            cluster_x + cluster_width / 2.0,
            baseline + 16.0,
            day.date.format("%m-%d")
        ));
    }

    svg.push_str("</svg>");
    svg
}
