//! Medicine counter state machine and pill sheet rendering.
//!
//! Everything in here is pure: persistence lives in
//! [`crate::services::medicine`].

pub mod counter;
pub mod grid;
pub mod render;

pub use counter::{HistoryAction, MedicineStatus, StatusReport, TakeOutcome};
pub use grid::{CellState, PillGrid, GRID_COLUMNS};
pub use render::{render_png, render_svg, render_text, RenderError, LEGEND};

/// Renders the text pill sheet for a status report.
pub fn pill_text(report: &StatusReport, max: i64) -> String {
    render_text(&PillGrid::new(report.remaining, report.taken_today, max))
}
