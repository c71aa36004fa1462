//! Text views rendered with askama.
//!
//! View structs hold pre-formatted strings; templates only lay them out.

pub mod admin;
pub mod auth;
pub mod canteen;
pub mod parent;
pub mod student;
pub mod vendor;

use chrono::{DateTime, NaiveDateTime};

use campus_wallet_core::{CategoryBreakdown, Rupees, SpendingCategory};

/// Width of a full (100%) spending bar, in characters.
pub const BAR_WIDTH: u32 = 30;

const BAR_CHAR: char = '#';

/// One row of a category spending chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingBarView {
    pub label: String,
    pub amount: String,
    pub bar: String,
    pub percent: u32,
}

impl SpendingBarView {
    fn new(breakdown: &CategoryBreakdown, category: SpendingCategory) -> Self {
        let percent = breakdown.bar_percent(category);
        Self {
            label: category.label().to_string(),
            amount: breakdown.get(category).to_string(),
            bar: bar(percent),
            percent,
        }
    }
}

/// Chart rows for all categories, in display order.
#[must_use]
pub fn spending_bars(breakdown: &CategoryBreakdown) -> Vec<SpendingBarView> {
    SpendingCategory::ALL
        .iter()
        .map(|category| SpendingBarView::new(breakdown, *category))
        .collect()
}

/// A run of bar characters proportional to `percent` of [`BAR_WIDTH`].
///
/// Any non-zero percentage draws at least one character.
#[must_use]
pub fn bar(percent: u32) -> String {
    if percent == 0 {
        return String::new();
    }
    let width = (percent.min(100) * BAR_WIDTH).div_ceil(100);
    std::iter::repeat_n(BAR_CHAR, width as usize).collect()
}

/// Format an API timestamp for display.
///
/// Accepts RFC 3339 and naive ISO 8601 timestamps; anything else is shown
/// as received.
#[must_use]
pub fn format_time(raw: &str) -> String {
    const DISPLAY: &str = "%d %b %Y, %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Amount still missing to cover `needed` from `available`, if any.
#[must_use]
pub fn shortfall(needed: Rupees, available: Rupees) -> Option<Rupees> {
    let missing = needed.get().saturating_sub(available.get());
    (missing > 0).then(|| Rupees::new(missing))
}
