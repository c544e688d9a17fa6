use resvg::usvg;
use std::fmt::Write;
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};

use super::grid::{CellState, PillGrid};

const PILL_SIZE: f64 = 50.0;
const PADDING: f64 = 20.0;
const GAP: f64 = 8.0;
const STROKE_WIDTH: u32 = 3;
const BACKGROUND: &str = "#FAFAFA";
const CROSS_COLOR: &str = "#9E9E9E";

/// Legend shown under the text sheet in chat replies
pub const LEGEND: &str = "✕:飲んだ ●:今日 ○:残り";

impl CellState {
    /// (fill, stroke) colors for the SVG sheet
    fn colors(&self) -> (&'static str, &'static str) {
        match self {
            CellState::Consumed => ("#E0E0E0", "#BDBDBD"),
            CellState::NextUp => ("#FF5252", "#D32F2F"),
            CellState::Remaining => ("#4CAF50", "#388E3C"),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CellState::Consumed => "✕",
            CellState::NextUp => "●",
            CellState::Remaining => "○",
        }
    }
}

fn sheet_extent(cells: usize) -> f64 {
    if cells == 0 {
        return PADDING * 2.0;
    }
    PADDING * 2.0 + cells as f64 * PILL_SIZE + (cells - 1) as f64 * GAP
}

/// Renders the sheet as an SVG document.
pub fn render_svg(grid: &PillGrid) -> String {
    let width = sheet_extent(grid.cols());
    let height = sheet_extent(grid.rows());
    let radius = PILL_SIZE / 2.0 - 2.0;

    let mut svg = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{BACKGROUND}"/>"#);

    for (row, col, state) in grid.iter_raster() {
        let cx = PADDING + col as f64 * (PILL_SIZE + GAP) + PILL_SIZE / 2.0;
        let cy = PADDING + row as f64 * (PILL_SIZE + GAP) + PILL_SIZE / 2.0;
        let (fill, stroke) = state.colors();

        let _ = writeln!(
            svg,
            r#"  <circle cx="{cx}" cy="{cy}" r="{radius}" fill="{fill}" stroke="{stroke}" stroke-width="{STROKE_WIDTH}"/>"#
        );

        if state == CellState::Consumed {
            let offset = radius * 0.5;
            for (x1, y1, x2, y2) in [
                (cx - offset, cy - offset, cx + offset, cy + offset),
                (cx + offset, cy - offset, cx - offset, cy + offset),
            ] {
                let _ = writeln!(
                    svg,
                    r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{CROSS_COLOR}" stroke-width="{STROKE_WIDTH}" stroke-linecap="round"/>"#
                );
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid sheet SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Sheet size {0}x{1} cannot be rasterized")]
    Size(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Rasterizes [`render_svg`] output to a PNG of the same pixel size.
pub fn render_png(grid: &PillGrid) -> Result<Vec<u8>, RenderError> {
    let tree = usvg::Tree::from_str(&render_svg(grid), &usvg::Options::default())?;
    let size = tree.size().to_int_size();

    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or(RenderError::Size(size.width(), size.height()))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

/// Renders the sheet as lines of glyphs, one line per row in raster order.
pub fn render_text(grid: &PillGrid) -> String {
    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| grid.cell(row, col).glyph())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
