//! 7-day price sparkline rendering.

use serde::Serialize;

pub const SPARKLINE_WIDTH: f64 = 96.0;
pub const SPARKLINE_HEIGHT: f64 = 40.0;
pub const TREND_UP_COLOR: &str = "#10B981";
pub const TREND_DOWN_COLOR: &str = "#EF4444";

/// Stroke colour for a 24h change: green when flat or up, red when down.
pub fn trend_color(price_change_24h: f64) -> &'static str {
    if price_change_24h >= 0.0 {
        TREND_UP_COLOR
    } else {
        TREND_DOWN_COLOR
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub path_data: String,
    pub stroke_color: String,
    pub width: f64,
    pub height: f64,
}

impl Sparkline {
    /// Scale `prices` into a `width` x `height` box. Returns `None` when there
    /// is nothing to draw, which the table shows as "No data".
    pub fn from_prices(prices: &[f64], price_change_24h: f64, width: f64, height: f64) -> Option<Self> {
        let points: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
        if points.is_empty() {
            return None;
        }

        let min = points.iter().copied().fold(f64::INFINITY, f64::min);
        let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        let y_of = |price: f64| {
            if range > 0.0 {
                height - (price - min) / range * height
            } else {
                height / 2.0
            }
        };

        let path_data = if points.len() == 1 {
            let y = y_of(points[0]);
            format!("M 0 {} L {} {}", y, width, y)
        } else {
            let step = width / (points.len() - 1) as f64;
            points
                .iter()
                .enumerate()
                .map(|(i, price)| {
                    let command = if i == 0 { "M" } else { "L" };
                    format!("{} {} {}", command, i as f64 * step, y_of(*price))
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        Some(Self {
            path_data,
            stroke_color: trend_color(price_change_24h).to_string(),
            width,
            height,
        })
    }

    /// Sparkline in the default table cell size.
    pub fn for_table(prices: &[f64], price_change_24h: f64) -> Option<Self> {
        Self::from_prices(prices, price_change_24h, SPARKLINE_WIDTH, SPARKLINE_HEIGHT)
    }

    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><path d="{d}" fill="none" stroke="{c}" stroke-width="2"/></svg>"#,
            w = self.width,
            h = self.height,
            d = self.path_data,
            c = self.stroke_color,
        )
    }
}
