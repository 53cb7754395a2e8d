//! Bar chart of category frequencies, written as SVG.

use bizscope_core::CategoryCount;
use html_escape::encode_text;

pub const BAR_COLOR: &str = "orange";
pub const X_LABEL: &str = "Category";
pub const Y_LABEL: &str = "Number of Businesses";

const HEIGHT: f64 = 600.0;
const MIN_WIDTH: f64 = 480.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 200.0;
const BAR_SLOT: f64 = 48.0;
const BAR_GAP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
}

/// A bar chart ready to be written out. Bars keep the order they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: String,
    pub bars: Vec<Bar>,
}

/// One bar per category, in the order of `counts`.
///
/// Empty input gives a chart with axes and no bars.
#[must_use]
pub fn render_chart(counts: &[CategoryCount], title: &str) -> ChartArtifact {
    ChartArtifact {
        title: title.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        color: BAR_COLOR.to_string(),
        bars: counts
            .iter()
            .map(|c| Bar {
                label: c.category.clone(),
                value: c.count,
            })
            .collect(),
    }
}

impl ChartArtifact {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Renders the chart as a standalone SVG document.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_svg(&self) -> String {
        let width = (MARGIN_LEFT + MARGIN_RIGHT + BAR_SLOT * self.bars.len() as f64).max(MIN_WIDTH);
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;
        let max_value = self.bars.iter().map(|b| b.value).max().unwrap_or(0);
        let (axis_max, step) = y_axis(max_value);

        let mut buf = String::new();
        buf.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{HEIGHT:.0}\" viewBox=\"0 0 {width:.0} {HEIGHT:.0}\" font-family=\"sans-serif\">\n"
        ));
        buf.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        buf.push_str(&format!(
            "<text x=\"{:.1}\" y=\"30\" text-anchor=\"middle\" font-size=\"18\">{}</text>\n",
            width / 2.0,
            encode_text(&self.title)
        ));

        // Axes
        buf.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline}\" stroke=\"black\"/>\n"
        ));
        buf.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{baseline}\" x2=\"{:.1}\" y2=\"{baseline}\" stroke=\"black\"/>\n",
            width - MARGIN_RIGHT
        ));

        // Y ticks
        let mut tick = 0;
        while tick <= axis_max {
            let y = baseline - plot_height * tick as f64 / axis_max as f64;
            buf.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\">{tick}</text>\n",
                MARGIN_LEFT - 8.0,
                y + 4.0
            ));
            tick += step;
        }

        for (i, bar) in self.bars.iter().enumerate() {
            let x = MARGIN_LEFT + BAR_SLOT * i as f64 + BAR_GAP / 2.0;
            let bar_width = BAR_SLOT - BAR_GAP;
            let bar_height = plot_height * bar.value as f64 / axis_max as f64;
            let label_x = x + bar_width / 2.0;
            let label_y = baseline + 14.0;
            buf.push_str(&format!(
                "<rect class=\"bar\" x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_width:.1}\" height=\"{bar_height:.1}\" fill=\"{}\"><title>{}: {}</title></rect>\n",
                baseline - bar_height,
                encode_text(&self.color),
                encode_text(&bar.label),
                bar.value
            ));
            buf.push_str(&format!(
                "<text x=\"{label_x:.1}\" y=\"{label_y:.1}\" text-anchor=\"end\" font-size=\"12\" transform=\"rotate(-45 {label_x:.1} {label_y:.1})\">{}</text>\n",
                encode_text(&bar.label)
            ));
        }

        if self.is_empty() {
            buf.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">No categories to display</text>\n",
                width / 2.0,
                MARGIN_TOP + plot_height / 2.0
            ));
        }

        // Axis labels
        buf.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\">{}</text>\n",
            width / 2.0,
            HEIGHT - 16.0,
            encode_text(&self.x_label)
        ));
        buf.push_str(&format!(
            "<text x=\"20\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" transform=\"rotate(-90 20 {:.1})\">{}</text>\n",
            MARGIN_TOP + plot_height / 2.0,
            MARGIN_TOP + plot_height / 2.0,
            encode_text(&self.y_label)
        ));
        buf.push_str("</svg>\n");
        buf
    }
}

/// Top of the y axis and the tick spacing, aiming for at most ten ticks.
fn y_axis(max_value: usize) -> (usize, usize) {
    if max_value == 0 {
        return (1, 1);
    }
    let step = max_value.div_ceil(10);
    (max_value.div_ceil(step) * step, step)
}
