//! Charts module - Chart layout and rendering

mod plotter;
mod renderer;

pub use plotter::{BarPanel, ChartData, ChartPlotter, Mark, PieSlice, BAR_PANEL_TITLE, NO_DATA_LINES};
pub use renderer::StaticChartRenderer;
