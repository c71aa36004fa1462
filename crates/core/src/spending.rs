//! Per-category spending totals and bar widths.

use serde::{Deserialize, Serialize};

use crate::types::{Rupees, SpendingCategory};

/// Minimum bar width (percent) for any category with non-zero spending, so
/// small amounts stay visible next to large ones.
pub const MIN_VISIBLE_BAR_PERCENT: u32 = 15;

/// Spending totals split by category.
///
/// Missing categories deserialize as zero; the admin stats endpoint omits
/// categories nobody has spent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub food: Rupees,
    #[serde(default)]
    pub events: Rupees,
    #[serde(default)]
    pub stationery: Rupees,
}

impl CategoryBreakdown {
    /// Total for one category.
    #[must_use]
    pub const fn get(&self, category: SpendingCategory) -> Rupees {
        match category {
            SpendingCategory::Food => self.food,
            SpendingCategory::Events => self.events,
            SpendingCategory::Stationery => self.stationery,
        }
    }

    /// Largest category total, floored at one rupee so it can be divided by.
    #[must_use]
    pub fn scale(&self) -> i64 {
        SpendingCategory::ALL
            .iter()
            .map(|c| self.get(*c).get())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Bar width for a category as a percentage of the largest category.
    ///
    /// Non-zero categories never drop below [`MIN_VISIBLE_BAR_PERCENT`]; zero
    /// or negative totals get no bar at all.
    #[must_use]
    pub fn bar_percent(&self, category: SpendingCategory) -> u32 {
        let amount = self.get(category).get();
        if amount <= 0 {
            return 0;
        }
        let percent = amount.saturating_mul(100) / self.scale();
        u32::try_from(percent.clamp(0, 100))
            .unwrap_or(100)
            .max(MIN_VISIBLE_BAR_PERCENT)
    }

    /// Categories paired with their totals, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SpendingCategory, Rupees)> + '_ {
        SpendingCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(food: i64, events: i64, stationery: i64) -> CategoryBreakdown {
        CategoryBreakdown {
            food: Rupees::new(food),
            events: Rupees::new(events),
            stationery: Rupees::new(stationery),
        }
    }

    #[test]
    fn test_largest_category_is_full_width() {
        let b = breakdown(200, 100, 0);
        assert_eq!(b.bar_percent(SpendingCategory::Food), 100);
        assert_eq!(b.bar_percent(SpendingCategory::Events), 50);
        assert_eq!(b.bar_percent(SpendingCategory::Stationery), 0);
    }

    #[test]
    fn test_small_amounts_get_minimum_width() {
        let b = breakdown(1000, 5, 0);
        assert_eq!(
            b.bar_percent(SpendingCategory::Events),
            MIN_VISIBLE_BAR_PERCENT
        );
    }

    #[test]
    fn test_all_zero_has_no_bars() {
        let b = CategoryBreakdown::default();
        assert_eq!(b.scale(), 1);
        for (category, _) in b.iter() {
            assert_eq!(b.bar_percent(category), 0);
        }
    }

    #[test]
    fn test_missing_categories_default_to_zero() {
        let b: CategoryBreakdown = serde_json::from_str(r#"{"food": 120}"#).expect("parse");
        assert_eq!(b, breakdown(120, 0, 0));
    }
}
