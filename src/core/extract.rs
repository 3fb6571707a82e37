//! Amount extraction from summary responses.
//!
//! Each side (payin, payout) gets an ordered list of rules. Every pattern is
//! matched case-insensitively, so `Rs`, `RS` and `rs` are all accepted.

use crate::domain::amount::{Amount, DEFAULT_AMOUNT_CEILING, DEFAULT_LARGE_AMOUNT_FLOOR};
use crate::utils::error::Result;
use regex::Regex;

/// Currency token accepted in front of a figure.
const CURRENCY: &str = r"(?:\bRs\.?|₹)\s*";
const FIGURE: &str = r"([\d,]+\.?\d*)";

/// How a rule picks a value among its matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchSelector {
    /// Only the first match counts; if it fails the bounds the rule yields nothing.
    First,
    /// First match whose value passes the bounds.
    FirstValid,
    /// First match strictly above the given floor that passes the bounds.
    FirstAbove(f64),
}

#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub selector: MatchSelector,
}

impl ExtractionRule {
    pub fn new(name: &'static str, pattern: &str, selector: MatchSelector) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            selector,
        })
    }

    fn apply(&self, text: &str, ceiling: f64) -> Option<Amount> {
        let mut figures = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

        match self.selector {
            MatchSelector::First => figures
                .next()
                .and_then(|figure| Amount::parse_figure(figure, ceiling)),
            MatchSelector::FirstValid => {
                figures.find_map(|figure| Amount::parse_figure(figure, ceiling))
            }
            MatchSelector::FirstAbove(floor) => figures
                .filter_map(|figure| Amount::parse_figure(figure, ceiling))
                .find(|amount| amount.rupees() > floor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountBounds {
    pub ceiling: f64,
    pub large_amount_floor: f64,
}

impl Default for AmountBounds {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_AMOUNT_CEILING,
            large_amount_floor: DEFAULT_LARGE_AMOUNT_FLOOR,
        }
    }
}

/// Ordered rule list evaluated left to right; the first rule that yields a
/// valid amount wins.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    label: String,
    rules: Vec<ExtractionRule>,
    ceiling: f64,
}

impl AmountExtractor {
    /// Default rules for a summary table labelled `Total <label> Amount`.
    pub fn for_label(label: &str, bounds: AmountBounds) -> Result<Self> {
        let escaped = regex::escape(label);
        let cell = format!(r#"<td class="text-center">\s*{}{}\s*</td>"#, CURRENCY, FIGURE);
        let money = format!("(?i){}{}", CURRENCY, FIGURE);

        let rules = vec![
            ExtractionRule::new(
                "labelled_cell",
                &format!(r"(?is)Total\s+{}\s+Amount.*?{}", escaped, cell),
                MatchSelector::First,
            )?,
            ExtractionRule::new("table_cell", &format!("(?i){}", cell), MatchSelector::First)?,
            ExtractionRule::new(
                "json_field",
                &format!(
                    r#"(?i)"total_?{}_?amount"\s*:\s*"?(?:{})?{}"#,
                    escaped, CURRENCY, FIGURE
                ),
                MatchSelector::First,
            )?,
            ExtractionRule::new(
                "large_amount",
                &money,
                MatchSelector::FirstAbove(bounds.large_amount_floor),
            )?,
            ExtractionRule::new("any_amount", &money, MatchSelector::FirstValid)?,
        ];

        Ok(Self {
            label: label.to_string(),
            rules,
            ceiling: bounds.ceiling,
        })
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Inserts a rule ahead of the defaults.
    pub fn with_priority_rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    /// Returns the amount together with the name of the rule that produced it.
    pub fn extract_with_rule(&self, text: Option<&str>) -> (Amount, Option<&'static str>) {
        let Some(text) = text else {
            tracing::warn!("❌ No {} response to extract from", self.label);
            return (Amount::NotAvailable, None);
        };

        for rule in &self.rules {
            if let Some(amount) = rule.apply(text, self.ceiling) {
                tracing::info!("💰 {} amount {} (rule: {})", self.label, amount, rule.name);
                return (amount, Some(rule.name));
            }
            tracing::debug!("{} rule '{}' found nothing", self.label, rule.name);
        }

        tracing::warn!("❌ Could not extract {} amount", self.label);
        (Amount::NotAvailable, None)
    }

    pub fn extract(&self, text: Option<&str>) -> Amount {
        self.extract_with_rule(text).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYIN_TABLE: &str = r#"
        <table>
          <thead><tr>
            <th>Total Transactions</th><th>Success Rate</th>
            <th>Total Payin Amount</th><th>Charges</th>
          </tr></thead>
          <tbody><tr>
            <td class="text-center">152</td>
            <td class="text-center">97.5%</td>
            <td class="text-center">Rs 4,52,310.50</td>
            <td class="text-center">Rs 9,046.21</td>
          </tr></tbody>
        </table>"#;

    fn payin() -> AmountExtractor {
        AmountExtractor::for_label("Payin", AmountBounds::default()).unwrap()
    }

    #[test]
    fn test_labelled_cell_wins() {
        let (amount, rule) = payin().extract_with_rule(Some(PAYIN_TABLE));
        assert_eq!(amount.to_string(), "Rs 4,52,310.50");
        assert_eq!(rule, Some("labelled_cell"));
    }

    #[test]
    fn test_label_is_side_specific() {
        let payout = AmountExtractor::for_label("Payout", AmountBounds::default()).unwrap();
        let (amount, rule) = payout.extract_with_rule(Some(PAYIN_TABLE));
        // 沒有 "Total Payout Amount"，退回第一個表格金額
        assert_eq!(rule, Some("table_cell"));
        assert_eq!(amount.to_string(), "Rs 4,52,310.50");
    }

    #[test]
    fn test_json_field() {
        let body = r#"{"status":true,"total_payin_amount":"125000.5","count":12}"#;
        let (amount, rule) = payin().extract_with_rule(Some(body));
        assert_eq!(rule, Some("json_field"));
        assert_eq!(amount.to_string(), "Rs 1,25,000.50");

        let camel = r#"{"totalPayinAmount": 880}"#;
        assert_eq!(payin().extract(Some(camel)).to_string(), "Rs 880.00");
    }

    #[test]
    fn test_large_amount_preferred_over_small() {
        let text = "Charges Rs 45.00 on volume Rs 12,500";
        let (amount, rule) = payin().extract_with_rule(Some(text));
        assert_eq!(rule, Some("large_amount"));
        assert_eq!(amount.to_string(), "Rs 12,500.00");
    }

    #[test]
    fn test_any_amount_fallback() {
        let (amount, rule) = payin().extract_with_rule(Some("Today: ₹ 500"));
        assert_eq!(rule, Some("any_amount"));
        assert_eq!(amount.to_string(), "Rs 500.00");
    }

    #[test]
    fn test_currency_token_is_case_insensitive_everywhere() {
        let cell = r#"<td class="text-center">RS 5,000</td>"#;
        assert_eq!(payin().extract_with_rule(Some(cell)).1, Some("table_cell"));

        let (amount, rule) = payin().extract_with_rule(Some("volume RS 5,000 today"));
        assert_eq!(rule, Some("large_amount"));
        assert_eq!(amount.to_string(), "Rs 5,000.00");

        let (amount, rule) = payin().extract_with_rule(Some("fee rs. 40"));
        assert_eq!(rule, Some("any_amount"));
        assert_eq!(amount.to_string(), "Rs 40.00");
    }

    #[test]
    fn test_invalid_first_match_falls_through_to_later_rules() {
        let text = r#"<td class="text-center">Rs 0.00</td> settled Rs 2,000.00"#;
        let (amount, rule) = payin().extract_with_rule(Some(text));
        assert_eq!(rule, Some("large_amount"));
        assert_eq!(amount.to_string(), "Rs 2,000.00");
    }

    #[test]
    fn test_ceiling_is_configurable() {
        let text = r#"Total Payin Amount <td class="text-center">Rs 50,00,000.00</td>"#;
        let strict = AmountExtractor::for_label(
            "Payin",
            AmountBounds {
                ceiling: 1_000_000.0,
                large_amount_floor: 1_000.0,
            },
        )
        .unwrap();
        assert_eq!(strict.extract(Some(text)), Amount::NotAvailable);
        assert_eq!(payin().extract(Some(text)).to_string(), "Rs 50,00,000.00");
    }

    #[test]
    fn test_text_without_currency_is_not_available() {
        for text in ["", "<html><body>Session expired</body></html>", "{\"status\":false}", "1,000.00", "took 3 hours 12 minutes"] {
            assert_eq!(payin().extract(Some(text)), Amount::NotAvailable, "{}", text);
        }
        assert_eq!(payin().extract(None), Amount::NotAvailable);
    }

    #[test]
    fn test_priority_rule_runs_first() {
        let rule = ExtractionRule::new(
            "net_amount",
            r"Net:\s*INR\s*([\d,]+\.?\d*)",
            MatchSelector::First,
        )
        .unwrap();
        let extractor = payin().with_priority_rule(rule);
        assert_eq!(extractor.rules()[0].name, "net_amount");

        let (amount, rule) = extractor.extract_with_rule(Some("Net: INR 3,300 / Rs 9,999"));
        assert_eq!(rule, Some("net_amount"));
        assert_eq!(amount.to_string(), "Rs 3,300.00");
    }
}
