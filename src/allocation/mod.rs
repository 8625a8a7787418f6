//! Rule-based paycheck allocation.

pub mod advisor;
pub mod categories;
pub mod parse;
pub mod plan;

pub use advisor::{suggest_allocations, AllocationAdvisor};
pub use categories::{AllocationKind, CategoryDef, TargetFormula, CATEGORIES};
pub use plan::{AllocationItem, AllocationPlan, SavingsGoal};
