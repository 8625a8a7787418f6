//! Free-text paycheck allocation.
//!
//! [`suggest_allocations`] turns a request such as "save 500000 for a car and
//! spend 40000 on food" into a structured [`AllocationPlan`]. Explicit amounts
//! are assigned to mentioned categories strictly left to right, in table order,
//! with no attempt to pair a number with its nearest keyword.

use tracing::{debug, info};

use super::categories::{AllocationKind, CategoryDef, CATEGORIES};
use super::parse::{extract_amounts, mentioned_categories};
use super::plan::{format_amount, AllocationItem, AllocationPlan};

const DEFAULT_SPLIT_ADVICE: &str = "No budget categories were recognized, so this plan follows the \
50/30/20 rule: 50% of your paycheck covers needs such as rent, groceries and bills, 30% goes to \
wants such as dining out and entertainment, and 20% builds an emergency fund worth six months \
of income.";

/// Stateless allocation advisor over a category table.
#[derive(Debug, Clone, Copy)]
pub struct AllocationAdvisor {
    categories: &'static [CategoryDef],
}

impl Default for AllocationAdvisor {
    fn default() -> Self {
        Self::new(CATEGORIES)
    }
}

impl AllocationAdvisor {
    pub fn new(categories: &'static [CategoryDef]) -> Self {
        Self { categories }
    }

    /// Build a plan for `request_text` against `total_amount`. Never fails;
    /// a non-positive total yields zero default amounts and zero percentages.
    pub fn suggest(&self, request_text: &str, total_amount: f64) -> AllocationPlan {
        let base = if total_amount > 0.0 { total_amount } else { 0.0 };
        let mentioned = mentioned_categories(self.categories, request_text);
        let mut amounts = extract_amounts(request_text);

        debug!(
            categories = mentioned.len(),
            amounts = amounts.len(),
            total = total_amount,
            "parsed budget request"
        );

        if mentioned.is_empty() {
            info!(total = total_amount, "no categories recognized, using 50/30/20 split");
            return default_split(total_amount, base);
        }

        let allocations: Vec<AllocationItem> = mentioned
            .into_iter()
            .map(|def| {
                let amount = amounts
                    .pop_front()
                    .unwrap_or(base * def.default_percent / 100.0);
                let item = AllocationItem::new(def.label, amount, base, def.kind);
                match def.target {
                    Some(formula) => item.with_target(formula.target(amount, base)),
                    None => item,
                }
            })
            .collect();

        let mut plan = AllocationPlan {
            total_amount,
            allocations,
            advice: String::new(),
            default_split: false,
        };
        plan.advice = summary_advice(&plan, base);
        plan
    }
}

/// Allocate `total_amount` according to `request_text` with the built-in
/// category table.
pub fn suggest_allocations(request_text: &str, total_amount: f64) -> AllocationPlan {
    AllocationAdvisor::default().suggest(request_text, total_amount)
}

fn default_split(total_amount: f64, base: f64) -> AllocationPlan {
    let needs = base * 0.5;
    let wants = base * 0.3;
    // Emergency takes the remainder so the three lines sum to the total exactly.
    let emergency = base - (needs + wants);

    AllocationPlan {
        total_amount,
        allocations: vec![
            AllocationItem::new("Needs", needs, base, AllocationKind::Regular),
            AllocationItem::new("Wants", wants, base, AllocationKind::Regular),
            AllocationItem::new("Emergency Fund", emergency, base, AllocationKind::Savings)
                .with_target(base * 6.0),
        ],
        advice: DEFAULT_SPLIT_ADVICE.to_string(),
        default_split: true,
    }
}

fn summary_advice(plan: &AllocationPlan, base: f64) -> String {
    let allocated = plan.total_allocated();
    let share = if base > 0.0 { allocated / base * 100.0 } else { 0.0 };
    let remaining = plan.remaining();

    let mut advice = format!(
        "You have allocated {} across {} categor{} ({share:.1}% of your paycheck). Remaining unallocated: {}.",
        format_amount(allocated),
        plan.allocations.len(),
        if plan.allocations.len() == 1 { "y" } else { "ies" },
        format_amount(remaining),
    );
    if remaining < 0.0 {
        advice.push_str(&format!(
            " This plan is over your paycheck by {}; reduce some amounts before saving it.",
            format_amount(-remaining)
        ));
    }
    advice
}
