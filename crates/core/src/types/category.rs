//! Spending categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a spending category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid category: {0}. Valid categories: food, events, stationery")]
pub struct CategoryError(pub String);

/// Category a payment is booked against.
///
/// Parents only ever see totals per category, never individual payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpendingCategory {
    #[default]
    Food,
    Events,
    Stationery,
}

impl SpendingCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 3] = [Self::Food, Self::Events, Self::Stationery];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Events => "events",
            Self::Stationery => "stationery",
        }
    }

    /// Label with an icon, as shown on the dashboards.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "🍔 Food",
            Self::Events => "🎉 Events",
            Self::Stationery => "📝 Stationery",
        }
    }
}

impl std::fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpendingCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "events" => Ok(Self::Events),
            "stationery" => Ok(Self::Stationery),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}
