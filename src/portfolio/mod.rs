//! Portfolio computation: aggregation into slices and the chart geometry built from them.
//!
//! Everything in here is pure and deterministic.

pub mod aggregator;
pub mod donut;
pub mod format;
pub mod sparkline;

pub use aggregator::{aggregate, legend, token_color, total_value, CHART_COLORS, MAX_SLICES};
pub use donut::{render_donut, DonutArc, DonutChart, DonutGeometry};
pub use format::{format_change, format_percentage, format_usd};
pub use sparkline::{trend_color, Sparkline};
