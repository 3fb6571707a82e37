//! Monetary amounts scraped from the dashboard.
//!
//! Values are held in minor units (paise) so that totals are exact; rendering
//! uses the Indian digit grouping the dashboard itself shows (`Rs 1,00,000.00`).

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const CURRENCY_PREFIX: &str = "Rs";
pub const NOT_AVAILABLE: &str = "N/A";

/// Default upper bound for a plausible scraped figure.
pub const DEFAULT_AMOUNT_CEILING: f64 = 100_000_000.0;

/// Default lower bound used by the "large amount" extraction rule.
pub const DEFAULT_LARGE_AMOUNT_FLOOR: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Amount {
    Value { paise: i64 },
    #[default]
    NotAvailable,
}

impl Amount {
    pub fn from_paise(paise: i64) -> Self {
        Amount::Value { paise }
    }

    pub fn from_rupees(rupees: f64) -> Self {
        Amount::Value {
            paise: (rupees * 100.0).round() as i64,
        }
    }

    /// Cleans a captured figure such as `"1,23,456.78"` and applies the sanity
    /// bound: the parsed value must be positive and must not exceed `ceiling`.
    pub fn parse_figure(raw: &str, ceiling: f64) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        let value: f64 = cleaned.parse().ok()?;

        if !value.is_finite() || value <= 0.0 || value > ceiling {
            return None;
        }

        Some(Self::from_rupees(value))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Amount::Value { .. })
    }

    /// Numeric value in rupees; `N/A` counts as zero.
    pub fn rupees(&self) -> f64 {
        match self {
            Amount::Value { paise } => *paise as f64 / 100.0,
            Amount::NotAvailable => 0.0,
        }
    }

    fn paise_or_zero(&self) -> i64 {
        match self {
            Amount::Value { paise } => *paise,
            Amount::NotAvailable => 0,
        }
    }
}

/// Sum of both sides, treating `N/A` as zero. A non-positive total is `N/A`.
pub fn total_volume(payin: &Amount, payout: &Amount) -> Amount {
    let total = payin.paise_or_zero().saturating_add(payout.paise_or_zero());
    if total > 0 {
        Amount::from_paise(total)
    } else {
        Amount::NotAvailable
    }
}

/// Groups an integer the way `en-IN` does: last three digits, then pairs.
fn group_indian(mut value: u64) -> String {
    let last_three = value % 1000;
    value /= 1000;

    if value == 0 {
        return last_three.to_string();
    }

    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 100);
        value /= 100;
    }

    let mut out = String::new();
    for (index, group) in groups.iter().rev().enumerate() {
        if index == 0 {
            out.push_str(&group.to_string());
        } else {
            out.push_str(&format!("{:02}", group));
        }
        out.push(',');
    }
    out.push_str(&format!("{:03}", last_three));
    out
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::NotAvailable => f.write_str(NOT_AVAILABLE),
            Amount::Value { paise } => {
                let sign = if *paise < 0 { "-" } else { "" };
                let abs = paise.unsigned_abs();
                write!(
                    f,
                    "{} {}{}.{:02}",
                    CURRENCY_PREFIX,
                    sign,
                    group_indian(abs / 100),
                    abs % 100
                )
            }
        }
    }
}

impl FromStr for Amount {
    type Err = std::convert::Infallible;

    /// Reads a rendered amount back. Anything that does not parse is `N/A`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            return Ok(Amount::NotAvailable);
        }

        let numeric: String = trimmed
            .trim_start_matches(CURRENCY_PREFIX)
            .trim_start_matches('.')
            .trim_start_matches('₹')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        Ok(numeric
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Amount::from_rupees)
            .unwrap_or(Amount::NotAvailable))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
