use serde::{Deserialize, Serialize};

use super::categories::AllocationKind;
use crate::error::AllocationError;

/// Target and progress for a `special` or `savings` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub target_amount: f64,
    pub current_amount: f64,
}

/// A named share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationItem {
    pub category: String,
    pub amount: f64,
    /// `amount / total * 100`, or 0 when the total is not positive.
    pub percentage: f64,
    pub kind: AllocationKind,
    #[serde(flatten)]
    pub goal: Option<SavingsGoal>,
}

impl AllocationItem {
    pub(crate) fn new(category: &str, amount: f64, total: f64, kind: AllocationKind) -> Self {
        Self {
            category: category.to_string(),
            amount,
            percentage: percentage_of(amount, total),
            kind,
            goal: None,
        }
    }

    pub(crate) fn with_target(mut self, target_amount: f64) -> Self {
        self.goal = Some(SavingsGoal {
            target_amount,
            current_amount: 0.0,
        });
        self
    }
}

/// Suggested allocations for one paycheck plus a human-readable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub total_amount: f64,
    pub allocations: Vec<AllocationItem>,
    pub advice: String,
    /// True when no category was recognized and the 50/30/20 split was used.
    pub default_split: bool,
}

impl AllocationPlan {
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().map(|item| item.amount).sum()
    }

    /// Unallocated remainder; negative when the plan over-allocates.
    pub fn remaining(&self) -> f64 {
        self.total_amount - self.total_allocated()
    }

    /// Reject plans that must not be persisted: a negative total, or
    /// allocations summing to more than the total.
    pub fn ensure_within_total(&self) -> Result<(), AllocationError> {
        if self.total_amount < 0.0 {
            return Err(AllocationError::NegativeTotal(self.total_amount));
        }
        let allocated = self.total_allocated();
        if allocated > self.total_amount {
            return Err(AllocationError::OverAllocated {
                allocated,
                total: self.total_amount,
            });
        }
        Ok(())
    }
}

pub(crate) fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

/// Two decimals with `,` thousands separators: `1234567.8` → `1,234,567.80`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    format!("{}{grouped}.{frac_part}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(total: f64, amounts: &[f64]) -> AllocationPlan {
        AllocationPlan {
            total_amount: total,
            allocations: amounts
                .iter()
                .map(|&a| AllocationItem::new("Line", a, total, AllocationKind::Regular))
                .collect(),
            advice: String::new(),
            default_split: false,
        }
    }

    #[test]
    fn totals_and_remaining() {
        let p = plan(1000.0, &[200.0, 300.0]);
        assert_eq!(p.total_allocated(), 500.0);
        assert_eq!(p.remaining(), 500.0);
        assert!(p.ensure_within_total().is_ok());
    }

    #[test]
    fn over_allocation_is_rejected() {
        let p = plan(1000.0, &[700.0, 400.0]);
        assert_eq!(p.remaining(), -100.0);
        assert_eq!(
            p.ensure_within_total(),
            Err(AllocationError::OverAllocated {
                allocated: 1100.0,
                total: 1000.0
            })
        );
    }

    #[test]
    fn negative_total_is_rejected() {
        let p = plan(-5.0, &[]);
        assert_eq!(p.ensure_within_total(), Err(AllocationError::NegativeTotal(-5.0)));
    }

    #[test]
    fn percentage_is_zero_without_positive_total() {
        assert_eq!(percentage_of(50.0, 0.0), 0.0);
        assert_eq!(percentage_of(50.0, -10.0), 0.0);
        assert_eq!(percentage_of(50.0, 200.0), 25.0);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(460_000.0), "460,000.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-40_000.0), "-40,000.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn goal_fields_flatten_into_item_json() {
        let item = AllocationItem::new("Emergency Fund", 200.0, 1000.0, AllocationKind::Savings)
            .with_target(6000.0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "Emergency Fund");
        assert_eq!(json["kind"], "savings");
        assert_eq!(json["percentage"], 20.0);
        assert_eq!(json["targetAmount"], 6000.0);
        assert_eq!(json["currentAmount"], 0.0);

        let regular = AllocationItem::new("Food", 100.0, 1000.0, AllocationKind::Regular);
        let json = serde_json::to_value(&regular).unwrap();
        assert!(json.get("targetAmount").is_none());
    }
}
