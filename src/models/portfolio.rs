use serde::{Deserialize, Serialize};

/// One wedge of the portfolio breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSlice {
    pub name: String,
    pub symbol: String,
    pub value: f64,
    pub color: String,
}

/// Aggregated portfolio: the top slices plus the grand total over every token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// At most six slices, value descending
    pub slices: Vec<PortfolioSlice>,
    /// Sum over all tracked tokens, not only the displayed slices
    pub total_value: f64,
}

impl Portfolio {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Sum of the displayed slices. This is the denominator the donut uses.
    pub fn chart_total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub percentage: f64,
}
