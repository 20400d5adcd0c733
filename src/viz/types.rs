//! Public types and constants for the visualization module.

use crate::chart::DEFAULT_TITLE;

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    /// Single-column panel on the right, one block per category.
    Right,
    /// Band below the chart, one column per category.
    Bottom,
    /// No legend.
    Hidden,
}

/// The legend sits beside the chart, as in the published figure.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Right;

/// Rendering options for [`super::plot_emissions`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Locale tag for number formatting (`en`, `de`, ...).
    pub locale: String,
    pub legend: LegendMode,
    /// Year to draw a hover cursor and tooltip for.
    pub hover: Option<i32>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            title: DEFAULT_TITLE.to_string(),
            locale: "en".to_string(),
            legend: DEFAULT_LEGEND_MODE,
            hover: None,
        }
    }
}
