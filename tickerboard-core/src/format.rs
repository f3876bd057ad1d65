//! Display formatting for grid cells and summary badges.
//!
//! All functions are pure and allocation-only; the views never format
//! numbers any other way.

/// `$12.34`, or `-$12.34` for negative amounts.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round();
    if cents < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value.abs())
    }
}

/// Percentage points with two decimals: `1.23%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Same as [`format_percentage`] with an explicit `+` on gains.
pub fn format_signed_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format_percentage(value)
    }
}

/// Share volume: millions with one decimal, otherwise whole thousands.
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else {
        format!("{:.0}K", v / 1_000.0)
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Market cap given in billions; switches to trillions at 1000B.
pub fn format_market_cap(billions: f64) -> String {
    if billions >= 1_000.0 {
        format!("{:.2}T", billions / 1_000.0)
    } else {
        format!("{billions:.1}B")
    }
}

/// P/E ratio, or a dash when not applicable.
pub fn format_pe_ratio(pe: f64) -> String {
    if pe <= 0.0 {
        "-".to_string()
    } else {
        format_number(pe, 2)
    }
}

/// Large currency amounts with a magnitude suffix: `$1.2B`, `$340.0M`.
pub fn format_compact_currency(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format_currency(value);
    };
    format!("{sign}${scaled:.1}{suffix}")
}
