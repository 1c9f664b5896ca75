//! Display formatting for prices, values and percentages.

/// `$1,234.56` style, two decimals with thousands separators.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Signed 24h change, e.g. `+1.23%`.
pub fn format_change(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{:.2}%", percent)
    } else {
        format!("{:.2}%", percent)
    }
}

/// Legend share, one decimal.
pub fn format_percentage(percent: f64) -> String {
    format!("{:.1}%", percent)
}
