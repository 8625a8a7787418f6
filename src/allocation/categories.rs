//! The fixed budget category table.
//!
//! Order matters twice: categories are reported in table order, and explicit
//! amounts in the request are handed out to mentioned categories in table
//! order. Goal-bearing categories come first.

use serde::{Deserialize, Serialize};

/// Classification of a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    /// Recurring monthly expense.
    Regular,
    /// One-off savings target such as a car or a trip.
    Special,
    /// Long-term savings goal.
    Savings,
}

impl AllocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Special => "special",
            Self::Savings => "savings",
        }
    }

    /// Whether lines of this kind carry a target and progress amount.
    pub fn has_goal(&self) -> bool {
        !matches!(self, Self::Regular)
    }
}

impl std::fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a goal's target amount is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetFormula {
    /// A multiple of the whole paycheck.
    TimesTotal(f64),
    /// A multiple of the line's own monthly amount.
    TimesAmount(f64),
}

impl TargetFormula {
    pub fn target(&self, amount: f64, total: f64) -> f64 {
        match *self {
            Self::TimesTotal(factor) => total * factor,
            Self::TimesAmount(factor) => amount * factor,
        }
    }
}

/// One row of the category table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryDef {
    pub label: &'static str,
    /// Lower-case substrings that mark the category as mentioned.
    pub keywords: &'static [&'static str],
    /// Share of the total used when no explicit amount is available.
    pub default_percent: f64,
    pub kind: AllocationKind,
    /// Present exactly when `kind.has_goal()`.
    pub target: Option<TargetFormula>,
}

impl CategoryDef {
    /// Literal substring match against already lower-cased text.
    pub fn is_mentioned_in(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

const fn regular(label: &'static str, keywords: &'static [&'static str], default_percent: f64) -> CategoryDef {
    CategoryDef {
        label,
        keywords,
        default_percent,
        kind: AllocationKind::Regular,
        target: None,
    }
}

const fn goal(
    label: &'static str,
    keywords: &'static [&'static str],
    default_percent: f64,
    kind: AllocationKind,
    target: TargetFormula,
) -> CategoryDef {
    CategoryDef {
        label,
        keywords,
        default_percent,
        kind,
        target: Some(target),
    }
}

/// Built-in category table, scanned in order.
///
/// Keywords match as literal substrings of the lower-cased request, so
/// collisions are accepted as a known limitation: "card" mentions `car`,
/// "current" and "parent" mention `rent`, "billion" mentions `bill`.
pub const CATEGORIES: &[CategoryDef] = &[
    goal("Car Fund", &["car", "vehicle", "bike"], 20.0, AllocationKind::Special, TargetFormula::TimesTotal(5.0)),
    goal("House Fund", &["house", "home", "apartment", "down payment"], 20.0, AllocationKind::Special, TargetFormula::TimesTotal(24.0)),
    goal("Travel Fund", &["vacation", "travel", "trip", "holiday"], 10.0, AllocationKind::Special, TargetFormula::TimesTotal(2.0)),
    goal("Wedding Fund", &["wedding", "marriage"], 15.0, AllocationKind::Special, TargetFormula::TimesTotal(12.0)),
    goal("Gadget Fund", &["phone", "laptop", "gadget", "computer"], 10.0, AllocationKind::Special, TargetFormula::TimesTotal(1.0)),
    goal("Education Fund", &["education", "course", "tuition", "college", "school"], 10.0, AllocationKind::Special, TargetFormula::TimesTotal(6.0)),
    goal("Emergency Fund", &["emergency"], 20.0, AllocationKind::Savings, TargetFormula::TimesTotal(6.0)),
    goal("Investments", &["invest", "stock", "mutual fund"], 15.0, AllocationKind::Savings, TargetFormula::TimesAmount(12.0)),
    goal("Retirement", &["retire", "pension"], 10.0, AllocationKind::Savings, TargetFormula::TimesTotal(12.0)),
    regular("Rent", &["rent", "housing", "mortgage"], 30.0),
    regular("Food", &["food", "grocer", "dining", "restaurant", "meal"], 15.0),
    regular("Transport", &["transport", "commute", "fuel", "petrol"], 10.0),
    regular("Utilities", &["utilit", "electric", "water", "internet", "bill"], 10.0),
    regular("Health", &["health", "medical", "medicine", "gym", "insurance"], 5.0),
    regular("Entertainment", &["entertainment", "movie", "hobby", "hobbies", "leisure", "shopping"], 5.0),
    regular("Debt Repayment", &["debt", "loan", "credit card"], 10.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_kinds_have_targets_and_regular_kinds_do_not() {
        for def in CATEGORIES {
            assert_eq!(def.target.is_some(), def.kind.has_goal(), "{}", def.label);
        }
    }

    #[test]
    fn keywords_are_lower_case_and_labels_unique() {
        let mut labels: Vec<&str> = CATEGORIES.iter().map(|d| d.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), CATEGORIES.len());

        for def in CATEGORIES {
            assert!(!def.keywords.is_empty(), "{}", def.label);
            for kw in def.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "{}", def.label);
            }
        }
    }

    #[test]
    fn goal_categories_precede_regular_ones() {
        let first_regular = CATEGORIES
            .iter()
            .position(|d| d.kind == AllocationKind::Regular)
            .unwrap();
        assert!(CATEGORIES[first_regular..]
            .iter()
            .all(|d| d.kind == AllocationKind::Regular));
    }

    #[test]
    fn target_formulas() {
        assert_eq!(TargetFormula::TimesTotal(6.0).target(100.0, 1000.0), 6000.0);
        assert_eq!(TargetFormula::TimesAmount(12.0).target(100.0, 1000.0), 1200.0);
    }

    #[test]
    fn substring_matching_is_literal() {
        let car = &CATEGORIES[0];
        assert!(car.is_mentioned_in("saving for a new car"));
        // known limitation: "card" contains "car"
        assert!(car.is_mentioned_in("pay off the credit card"));
        assert!(!car.is_mentioned_in("groceries and rent"));
    }

    #[test]
    fn substring_collisions_are_matched() {
        let rent = CATEGORIES.iter().find(|d| d.label == "Rent").unwrap();
        let utilities = CATEGORIES.iter().find(|d| d.label == "Utilities").unwrap();
        assert!(rent.is_mentioned_in("my current savings"));
        assert!(rent.is_mentioned_in("gift for a parent"));
        assert!(utilities.is_mentioned_in("a billion ideas"));
    }
}
