//! Plan selection and grouping.
//!
//! Two pure functions over borrowed catalog data:
//!
//! - [`select_affordable`] picks the plans visible at a budget. A zero budget
//!   shows only free tiers; a positive budget shows paid plans priced at or
//!   below it, and free tiers drop out.
//! - [`partition_by_tool`] groups plans per tool, each group sorted by price
//!   with ties kept in input order.
//!
//! Neither function mutates its input, and both are total.

use crate::domain::model::{Budget, Plan};
use std::collections::BTreeMap;

/// Per-tool ordered plans, keyed by tool identifier.
pub type ToolGroups = BTreeMap<String, Vec<Plan>>;

/// Returns the plans visible at `budget`, in catalog order.
pub fn select_affordable(catalog: &[Plan], budget: Budget) -> Vec<Plan> {
    let limit = budget.dollars();
    catalog
        .iter()
        .filter(|plan| {
            if budget.is_zero() {
                plan.price_usd_monthly == 0
            } else {
                plan.price_usd_monthly > 0 && plan.price_usd_monthly <= limit
            }
        })
        .cloned()
        .collect()
}

/// Groups `plans` by tool and sorts each group ascending by price.
///
/// Tools that do not occur in `plans` get no entry.
pub fn partition_by_tool<I>(plans: I) -> ToolGroups
where
    I: IntoIterator<Item = Plan>,
{
    let mut groups = ToolGroups::new();
    for plan in plans {
        groups.entry(plan.tool.clone()).or_default().push(plan);
    }
    for group in groups.values_mut() {
        // sort_by_key is stable
        group.sort_by_key(|plan| plan.price_usd_monthly);
    }
    groups
}

/// `partition_by_tool(select_affordable(catalog, budget))`.
pub fn affordable_by_tool(catalog: &[Plan], budget: Budget) -> ToolGroups {
    partition_by_tool(select_affordable(catalog, budget))
}
