use std::fmt::Write;

use crate::model::profile::Viewport;
use crate::pipeline::stage5_color::HeatmapGrid;
use crate::report::{compact_id, format_px, html_escape, short_name};

const MIN_CELL_WIDTH: f64 = 80.0;
const MIN_CELL_HEIGHT: f64 = 25.0;
const BAND_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapGeometry {
    pub margins: Margins,
    pub width: f64,
    pub height: f64,
}

impl HeatmapGeometry {
    pub fn for_viewport(viewport: Viewport, n_years: usize, n_rows: usize) -> Self {
        let vw = viewport.width as f64;
        let vh = viewport.height as f64;
        let (margins, width, height) = if viewport.is_compact() {
            let m = Margins {
                top: 50.0,
                right: 30.0,
                bottom: 10.0,
                left: 70.0,
            };
            let side = vw * 0.95;
            (m, side - m.left - m.right, side - m.top - m.bottom)
        } else {
            let m = Margins {
                top: 50.0,
                right: 0.0,
                bottom: 10.0,
                left: 180.0,
            };
            (
                m,
                vw - 150.0 - m.left - m.right,
                vh - 150.0 - m.top - m.bottom,
            )
        };
        Self {
            margins,
            width: width.max(n_years as f64 * MIN_CELL_WIDTH),
            height: height.max(n_rows as f64 * MIN_CELL_HEIGHT),
        }
    }

    pub fn outer_width(&self) -> f64 {
        self.width + self.margins.left + self.margins.right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margins.top + self.margins.bottom
    }
}

/// Evenly spaced bands over `[0, extent]` with equal inner and outer padding,
/// centred in the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(n: usize, extent: f64, padding: f64) -> Self {
        let n = n as f64;
        let step = extent / (n - padding + 2.0 * padding).max(1.0);
        let start = (extent - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

pub fn render_heatmap_svg(
    grid: &HeatmapGrid,
    viewport: Viewport,
    count_label: &str,
) -> String {
    let geometry = HeatmapGeometry::for_viewport(viewport, grid.years.len(), grid.participants.len());
    let x = BandScale::new(grid.years.len(), geometry.width, BAND_PADDING);
    let y = BandScale::new(grid.participants.len(), geometry.height, BAND_PADDING);
    let count_word = count_label.to_lowercase();

    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        format_px(geometry.outer_width()),
        format_px(geometry.outer_height())
    );
    let _ = write!(
        out,
        "<g transform=\"translate({},{})\">",
        format_px(geometry.margins.left),
        format_px(geometry.margins.top)
    );

    out.push_str("<g class=\"axis\">");
    for (i, year) in grid.years.iter().enumerate() {
        let _ = write!(
            out,
            "<text x=\"{}\" y=\"-9\" text-anchor=\"middle\">{}</text>",
            format_px(x.position(i) + x.bandwidth() / 2.0),
            year
        );
    }
    out.push_str("</g><g class=\"axis\">");
    for (i, name) in grid.participants.iter().enumerate() {
        let label = if viewport.is_compact() {
            short_name(name)
        } else {
            name.as_str()
        };
        let _ = write!(
            out,
            "<text x=\"-9\" y=\"{}\" text-anchor=\"end\" dominant-baseline=\"central\">{}</text>",
            format_px(y.position(i) + y.bandwidth() / 2.0),
            html_escape(label)
        );
    }
    out.push_str("</g>");

    let n_years = grid.years.len().max(1);
    for (idx, cell) in grid.cells.iter().enumerate() {
        let row = idx / n_years;
        let col = idx % n_years;
        let _ = write!(
            out,
            "<rect id=\"{}{}Rect\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" style=\"fill:{}\">",
            compact_id(&cell.name),
            cell.year,
            format_px(x.position(col)),
            format_px(y.position(row)),
            format_px(x.bandwidth()),
            format_px(y.bandwidth()),
            cell.fill.css()
        );
        if cell.value > 0 {
            let _ = write!(
                out,
                "<title>{} ate {} {} in {}</title>",
                html_escape(&cell.name),
                cell.value,
                html_escape(&count_word),
                cell.year
            );
        }
        out.push_str("</rect>");
    }

    for (idx, cell) in grid.cells.iter().enumerate() {
        let Some(label) = cell.label else {
            continue;
        };
        let row = idx / n_years;
        let col = idx % n_years;
        let _ = write!(
            out,
            "<text class=\"heatmapLabel\" x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" pointer-events=\"none\" style=\"fill:{}\">{}</text>",
            format_px(x.position(col) + x.bandwidth() / 2.0),
            format_px(y.position(row) + y.bandwidth() / 2.0),
            label.css(),
            cell.value
        );
    }

    out.push_str("</g></svg>");
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/svg.rs"]
mod tests;
