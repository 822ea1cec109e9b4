//! Filtering and aggregation over a collection of expenses.
//!
//! Everything here is a pure function of its input, so the values shown to the user can always be
//! recomputed from the collection and the selected month.

use crate::model::{Amount, Category, Expense, MonthKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The expenses dated in `month`, in collection order.
pub fn filter_by_month<'a>(expenses: &'a [Expense], month: &MonthKey) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| &e.month_key() == month)
        .collect()
}

/// The sum of the amounts. Zero when there are no expenses.
pub fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Amount {
    expenses.into_iter().map(Expense::amount).sum()
}

/// One row of the per-month summary.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub key: MonthKey,
    pub label: String,
    pub total: Amount,
    pub count: usize,
}

/// Groups the expenses by month and sums each group, most recent month first.
pub fn monthly_summary(expenses: &[Expense]) -> Vec<MonthSummary> {
    let mut groups: BTreeMap<MonthKey, (Amount, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = groups.entry(expense.month_key()).or_default();
        entry.0 = entry.0 + expense.amount();
        entry.1 += 1;
    }

    groups
        .into_iter()
        .rev()
        .map(|(key, (total, count))| MonthSummary {
            label: key.short_label(),
            key,
            total,
            count,
        })
        .collect()
}

/// The total spent per category, in the order categories are offered. `Other` labels are
/// grouped under their label. Categories without expenses are left out.
pub fn category_totals<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Vec<(Category, Amount)> {
    let mut totals: Vec<(Category, Amount)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| c == expense.category()) {
            Some((_, sum)) => *sum = *sum + expense.amount(),
            None => totals.push((expense.category().clone(), expense.amount())),
        }
    }
    // stable, so labels within Other keep their first-seen order
    totals.sort_by_key(|(c, _)| c.rank());
    totals
}
