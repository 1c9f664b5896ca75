//! Portfolio aggregation
//!
//! Turns the tracked token list and the manual holdings into the ranked slices
//! shown in the breakdown chart, plus the grand total across every token.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{LegendEntry, Portfolio, PortfolioSlice, Token};

/// Maximum number of slices shown in the breakdown
pub const MAX_SLICES: usize = 6;

/// Chart palette, assigned by rank
pub const CHART_COLORS: [&str; 6] = [
    "#10B981",
    "#A78BFA",
    "#60A5FA",
    "#18C9DD",
    "#FB923C",
    "#FB7185",
];

/// Palette colour for a given rank, cycling past the end of the palette.
pub fn token_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Value held in `token`. Negative or non-finite inputs count as nothing.
pub fn holding_value(token: &Token, holdings: &HashMap<String, f64>) -> f64 {
    let amount = holdings.get(&token.id).copied().unwrap_or(0.0);
    if !amount.is_finite() || amount <= 0.0 {
        return 0.0;
    }
    if !token.current_price.is_finite() || token.current_price <= 0.0 {
        return 0.0;
    }
    let value = token.value_of(amount);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Sum of `holding * price` over every tracked token.
pub fn total_value(tokens: &[Token], holdings: &HashMap<String, f64>) -> f64 {
    tokens.iter().map(|t| holding_value(t, holdings)).sum()
}

/// Rank tokens by held value and keep the top [`MAX_SLICES`].
///
/// Ties keep watchlist order. Colours follow the final rank, so the largest
/// position is always the first palette colour regardless of where the token
/// sits in the watchlist.
pub fn aggregate(tokens: &[Token], holdings: &HashMap<String, f64>) -> Portfolio {
    let mut ranked: Vec<(&Token, f64)> = tokens
        .iter()
        .map(|t| (t, holding_value(t, holdings)))
        .filter(|(_, value)| *value > 0.0)
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(MAX_SLICES);

    let slices = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (token, value))| PortfolioSlice {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            value,
            color: token_color(rank).to_string(),
        })
        .collect();

    Portfolio {
        slices,
        total_value: total_value(tokens, holdings),
    }
}

/// Legend rows: each slice as a share of the grand total.
pub fn legend(portfolio: &Portfolio) -> Vec<LegendEntry> {
    portfolio
        .slices
        .iter()
        .map(|slice| LegendEntry {
            label: format!("{} ({})", slice.name, slice.symbol.to_uppercase()),
            color: slice.color.clone(),
            percentage: if portfolio.total_value > 0.0 {
                slice.value / portfolio.total_value * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
