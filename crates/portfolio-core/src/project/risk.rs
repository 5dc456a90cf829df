//! Risk tier derived from budget and planned schedule length.

use crate::money::Money;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const LOW_BUDGET_CEILING: Money = Money::from_units(100_000);
const HIGH_BUDGET_FLOOR: Money = Money::from_units(500_000);

/// Risk classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Undefined,
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of complete months from `start` to `end`.
///
/// A partial trailing month does not count, and the result is negative when
/// `end` precedes `start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_month = i64::from(start.year()) * 12 + i64::from(start.month0());
    let end_month = i64::from(end.year()) * 12 + i64::from(end.month0());
    let mut months = end_month - start_month;
    let days = i64::from(end.day()) - i64::from(start.day());

    if months > 0 && days < 0 {
        months -= 1;
    } else if months < 0 && days > 0 {
        months += 1;
    }
    months
}

/// Classify a project's risk.
///
/// Rules are evaluated top to bottom:
/// - high: budget above 500,000 or longer than 6 months
/// - medium: budget above 100,000 or between 4 and 6 months
/// - low: budget up to 100,000 and at most 3 months
/// - anything else falls back to medium
pub fn classify(
    start_date: Option<NaiveDate>,
    planned_end_date: Option<NaiveDate>,
    budget: Option<Money>,
) -> RiskTier {
    let (Some(start), Some(end), Some(budget)) = (start_date, planned_end_date, budget) else {
        return RiskTier::Undefined;
    };

    let months = whole_months_between(start, end);

    if budget > HIGH_BUDGET_FLOOR || months > 6 {
        RiskTier::High
    } else if budget > LOW_BUDGET_CEILING || (months > 3 && months <= 6) {
        RiskTier::Medium
    } else if budget <= LOW_BUDGET_CEILING && months <= 3 {
        RiskTier::Low
    } else {
        RiskTier::Medium
    }
}
