//! Donut chart geometry
//!
//! Converts portfolio slices into SVG ring segments. Angles are kept in degrees
//! and measured clockwise from 12 o'clock; they are converted to radians only
//! where the trigonometry happens.

use std::f64::consts::PI;
use std::fmt::Write as _;

use serde::Serialize;

use crate::models::PortfolioSlice;

pub const OUTER_RADIUS: f64 = 80.0;
pub const INNER_RADIUS: f64 = 42.0;
pub const VIEW_BOX_SIZE: f64 = 160.0;

/// Fill of the disk drawn when there is nothing to chart
pub const PLACEHOLDER_FILL: &str = "#18181B";
pub const SLICE_STROKE: &str = "#ffffff";
pub const SLICE_STROKE_WIDTH: f64 = 1.0;

const FULL_CIRCLE: f64 = 360.0;
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// Ring dimensions. Both circles share the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutGeometry {
    pub cx: f64,
    pub cy: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            cx: OUTER_RADIUS,
            cy: OUTER_RADIUS,
            outer_radius: OUTER_RADIUS,
            inner_radius: INNER_RADIUS,
        }
    }
}

impl DonutGeometry {
    /// Point at `angle_degrees` (clockwise from 12 o'clock) on a circle of `radius`.
    pub fn point(&self, radius: f64, angle_degrees: f64) -> (f64, f64) {
        let theta = (angle_degrees - 90.0) * PI / 180.0;
        (self.cx + radius * theta.cos(), self.cy + radius * theta.sin())
    }
}

/// One ring segment ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutArc {
    pub path_data: String,
    pub fill_color: String,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
    pub large_arc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DonutChart {
    /// Neutral inner-radius disk, used when there is no data
    Placeholder { cx: f64, cy: f64, r: f64, fill: String },
    Arcs { arcs: Vec<DonutArc> },
}

impl DonutChart {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DonutChart::Placeholder { .. })
    }

    pub fn arcs(&self) -> &[DonutArc] {
        match self {
            DonutChart::Placeholder { .. } => &[],
            DonutChart::Arcs { arcs } => arcs,
        }
    }

    /// Standalone SVG document for the chart.
    pub fn to_svg(&self) -> String {
        let size = VIEW_BOX_SIZE;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );

        match self {
            DonutChart::Placeholder { cx, cy, r, fill } => {
                let _ = write!(svg, r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#, cx, cy, r, fill);
            }
            DonutChart::Arcs { arcs } => {
                for arc in arcs {
                    let _ = write!(
                        svg,
                        r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                        arc.path_data, arc.fill_color, SLICE_STROKE, SLICE_STROKE_WIDTH
                    );
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render slices with the default 160x160 geometry.
pub fn render_donut(slices: &[PortfolioSlice], total_value: f64) -> DonutChart {
    render_donut_with(&DonutGeometry::default(), slices, total_value)
}

pub fn render_donut_with(
    geometry: &DonutGeometry,
    slices: &[PortfolioSlice],
    total_value: f64,
) -> DonutChart {
    if slices.is_empty() || !total_value.is_finite() || total_value <= 0.0 {
        return DonutChart::Placeholder {
            cx: geometry.cx,
            cy: geometry.cy,
            r: geometry.inner_radius,
            fill: PLACEHOLDER_FILL.to_string(),
        };
    }

    let mut cumulative_angle = 0.0;
    let mut arcs = Vec::with_capacity(slices.len());

    for slice in slices {
        let fraction = slice.value / total_value;
        let sweep = fraction * FULL_CIRCLE;
        let start = cumulative_angle;
        let end = cumulative_angle + sweep;
        let large_arc = sweep > 180.0;

        let path_data = if sweep >= FULL_CIRCLE - FULL_CIRCLE_EPSILON {
            full_ring_path(geometry, start)
        } else {
            segment_path(geometry, start, end, large_arc)
        };

        arcs.push(DonutArc {
            path_data,
            fill_color: slice.color.clone(),
            start_degrees: start,
            sweep_degrees: sweep,
            large_arc,
        });

        cumulative_angle += sweep;
    }

    DonutChart::Arcs { arcs }
}

fn segment_path(geometry: &DonutGeometry, start: f64, end: f64, large_arc: bool) -> String {
    let (r_out, r_in) = (geometry.outer_radius, geometry.inner_radius);
    let (x1, y1) = geometry.point(r_out, start);
    let (x2, y2) = geometry.point(r_out, end);
    let (x3, y3) = geometry.point(r_in, end);
    let (x4, y4) = geometry.point(r_in, start);
    let flag = u8::from(large_arc);

    [
        format!("M {} {}", x1, y1),
        format!("A {} {} 0 {} 1 {} {}", r_out, r_out, flag, x2, y2),
        format!("L {} {}", x3, y3),
        format!("A {} {} 0 {} 0 {} {}", r_in, r_in, flag, x4, y4),
        "Z".to_string(),
    ]
    .join(" ")
}

// An arc whose endpoints coincide draws nothing, so a whole ring is two half arcs per radius.
fn full_ring_path(geometry: &DonutGeometry, start: f64) -> String {
    let (r_out, r_in) = (geometry.outer_radius, geometry.inner_radius);
    let (x1, y1) = geometry.point(r_out, start);
    let (xm, ym) = geometry.point(r_out, start + 180.0);
    let (x3, y3) = geometry.point(r_in, start);
    let (xn, yn) = geometry.point(r_in, start + 180.0);

    [
        format!("M {} {}", x1, y1),
        format!("A {} {} 0 0 1 {} {}", r_out, r_out, xm, ym),
        format!("A {} {} 0 0 1 {} {}", r_out, r_out, x1, y1),
        format!("L {} {}", x3, y3),
        format!("A {} {} 0 0 0 {} {}", r_in, r_in, xn, yn),
        format!("A {} {} 0 0 0 {} {}", r_in, r_in, x3, y3),
        "Z".to_string(),
    ]
    .join(" ")
}
