//! Rollups over the transaction collection. Everything here is pure and is
//! recomputed on each call.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::core::services::category_service::CategoryRegistry;
use crate::core::services::transaction_service::filter_by_categories;
use crate::domain::category::CategoryId;
use crate::domain::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTotals {
    pub expense: f64,
    pub income: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryId,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    pub spent: f64,
    pub limit: f64,
    /// Share of the limit used, capped at 100.
    pub percent: f64,
    pub over_budget: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionTotals {
    pub spent: f64,
    pub received: f64,
    pub net: f64,
}

impl SelectionTotals {
    /// `+` for a non-negative net, `-` otherwise.
    pub fn net_sign(&self) -> char {
        if self.net >= 0.0 {
            '+'
        } else {
            '-'
        }
    }

    pub fn net_magnitude(&self) -> f64 {
        self.net.abs()
    }
}

/// "Most spent on" insight for the header card.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    pub category: CategoryId,
    pub label: String,
    pub icon: String,
    pub total: f64,
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: CategoryId,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub total: f64,
    /// Share of all-time expense.
    pub share: f64,
    pub selected: bool,
}

/// Everything the summary screen shows, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub today_totals: DailyTotals,
    pub today_transactions: Vec<Transaction>,
    pub breakdown: Vec<CategoryBreakdown>,
    pub total_expenses: f64,
    pub budget: Option<BudgetProgress>,
    pub top: Option<TopCategory>,
    pub selection: SelectionTotals,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(
        txns: &[Transaction],
        categories: &CategoryRegistry,
        today: NaiveDate,
        budget_limit: Option<f64>,
        selected: &[CategoryId],
    ) -> DashboardSummary {
        let today_totals = today_totals(txns, today);
        let totals = category_totals(txns);
        let total_expenses = total_expenses(txns);
        let breakdown = totals
            .iter()
            .map(|entry| {
                let view = categories.resolve(&entry.category);
                CategoryBreakdown {
                    category: entry.category.clone(),
                    label: view.label.into_owned(),
                    icon: view.icon.into_owned(),
                    color: view.color.into_owned(),
                    total: entry.total,
                    share: category_share(entry.total, total_expenses),
                    selected: selected.contains(&entry.category),
                }
            })
            .collect();

        DashboardSummary {
            today,
            today_totals,
            today_transactions: txns.iter().filter(|t| t.date == today).cloned().collect(),
            breakdown,
            total_expenses,
            budget: budget_progress(today_totals.expense, budget_limit),
            top: top_category(&totals, categories),
            selection: multi_select_totals(txns, selected),
        }
    }
}

/// Sums today's expense and income separately.
pub fn today_totals(txns: &[Transaction], today: NaiveDate) -> DailyTotals {
    txns.iter()
        .filter(|txn| txn.date == today)
        .fold(DailyTotals::default(), |mut acc, txn| {
            if txn.is_expense() {
                acc.expense += txn.amount;
            } else {
                acc.income += txn.amount;
            }
            acc
        })
}

/// Expense totals per category, largest first. Income is excluded. Ties
/// keep the order in which categories were first seen.
pub fn category_totals(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for txn in txns.iter().filter(|txn| txn.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&slot) => totals[slot].total += txn.amount,
            None => {
                index.insert(&txn.category, totals.len());
                totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    total: txn.amount,
                });
            }
        }
    }
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

pub fn total_expenses(txns: &[Transaction]) -> f64 {
    txns.iter()
        .filter(|txn| txn.is_expense())
        .map(|txn| txn.amount)
        .sum()
}

/// Percentage of `total` taken by `amount`; zero when there is no total.
pub fn category_share(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

/// `None` while no budget is set. A non-positive limit counts as fully used
/// as soon as anything is spent.
pub fn budget_progress(spent: f64, limit: Option<f64>) -> Option<BudgetProgress> {
    let limit = limit?;
    let percent = if limit > 0.0 {
        (spent / limit * 100.0).clamp(0.0, 100.0)
    } else if spent > 0.0 {
        100.0
    } else {
        0.0
    };
    Some(BudgetProgress {
        spent,
        limit,
        percent,
        over_budget: spent > limit,
    })
}

/// Spent, received and net over the selected categories, or over everything
/// when nothing is selected.
pub fn multi_select_totals<S>(txns: &[Transaction], selected: &[S]) -> SelectionTotals
where
    S: AsRef<str>,
{
    let in_scope: Vec<&Transaction> = if selected.is_empty() {
        txns.iter().collect()
    } else {
        filter_by_categories(txns, selected)
    };
    let (spent, received) = in_scope
        .into_iter()
        .fold((0.0, 0.0), |(spent, received), txn| {
            if txn.is_expense() {
                (spent + txn.amount, received)
            } else {
                (spent, received + txn.amount)
            }
        });
    SelectionTotals {
        spent,
        received,
        net: received - spent,
    }
}

pub fn top_category(totals: &[CategoryTotal], categories: &CategoryRegistry) -> Option<TopCategory> {
    let first = totals.first()?;
    let view = categories.resolve(&first.category);
    Some(TopCategory {
        category: first.category.clone(),
        label: view.label.into_owned(),
        icon: view.icon.into_owned(),
        total: first.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn txn(id: &str, amount: f64, category: &str, kind: TransactionKind, date: NaiveDate) -> Transaction {
        Transaction {
            id: id.into(),
            amount,
            note: None,
            category: category.into(),
            kind,
            date,
            time: "10:00 am".into(),
        }
    }

    fn exp(id: &str, amount: f64, category: &str) -> Transaction {
        txn(id, amount, category, TransactionKind::Expense, day(10))
    }

    fn inc(id: &str, amount: f64, category: &str) -> Transaction {
        txn(id, amount, category, TransactionKind::Income, day(10))
    }

    #[test]
    fn today_totals_counts_every_matching_row() {
        let txns = vec![
            exp("a", 10.0, "food"),
            exp("b", 10.0, "food"),
            inc("c", 50.0, "other"),
            txn("d", 99.0, "food", TransactionKind::Expense, day(9)),
        ];
        let totals = today_totals(&txns, day(10));
        assert_eq!(totals, DailyTotals { expense: 20.0, income: 50.0 });
    }

    #[test]
    fn category_totals_exclude_income() {
        let txns = vec![exp("a", 100.0, "A"), inc("b", 500.0, "A")];
        assert_eq!(
            category_totals(&txns),
            vec![CategoryTotal { category: "A".into(), total: 100.0 }]
        );
    }

    #[test]
    fn category_totals_sort_desc_with_stable_ties() {
        let txns = vec![
            exp("a", 30.0, "bills"),
            exp("b", 50.0, "food"),
            exp("c", 20.0, "health"),
            exp("d", 10.0, "bills"),
            exp("e", 40.0, "transport"),
        ];
        let order: Vec<_> = category_totals(&txns)
            .into_iter()
            .map(|t| (t.category, t.total))
            .collect();
        assert_eq!(
            order,
            vec![
                ("food".to_string(), 50.0),
                ("bills".to_string(), 40.0),
                ("transport".to_string(), 40.0),
                ("health".to_string(), 20.0),
            ]
        );
    }

    #[test]
    fn budget_progress_caps_at_hundred() {
        let progress = budget_progress(120.0, Some(100.0)).unwrap();
        assert!(progress.over_budget);
        assert_eq!(progress.percent, 100.0);

        let half = budget_progress(50.0, Some(100.0)).unwrap();
        assert!(!half.over_budget);
        assert_eq!(half.percent, 50.0);

        let exact = budget_progress(100.0, Some(100.0)).unwrap();
        assert!(!exact.over_budget);
    }

    #[test]
    fn budget_progress_inactive_without_limit() {
        assert!(budget_progress(10.0, None).is_none());
        let zero = budget_progress(0.0, Some(0.0)).unwrap();
        assert_eq!(zero.percent, 0.0);
        let spent = budget_progress(5.0, Some(0.0)).unwrap();
        assert_eq!(spent.percent, 100.0);
        assert!(spent.over_budget);
    }

    #[test]
    fn multi_select_restricts_to_selection() {
        let txns = vec![exp("a", 100.0, "A"), exp("b", 50.0, "B"), inc("c", 200.0, "A")];
        let totals = multi_select_totals(&txns, &["A"]);
        assert_eq!(
            totals,
            SelectionTotals { spent: 100.0, received: 200.0, net: 100.0 }
        );
        assert_eq!(totals.net_sign(), '+');
    }

    #[test]
    fn empty_selection_covers_everything() {
        let txns = vec![exp("a", 100.0, "A"), exp("b", 50.0, "B"), inc("c", 20.0, "A")];
        let none: [&str; 0] = [];
        let totals = multi_select_totals(&txns, &none);
        assert_eq!(totals.spent, 150.0);
        assert_eq!(totals.received, 20.0);
        assert_eq!(totals.net_sign(), '-');
        assert_eq!(totals.net_magnitude(), 130.0);
    }

    #[test]
    fn share_is_zero_without_expenses() {
        assert_eq!(category_share(10.0, 0.0), 0.0);
        assert_eq!(category_share(25.0, 100.0), 25.0);
    }

    #[test]
    fn dashboard_resolves_labels_with_fallback() {
        let registry = CategoryRegistry::new();
        let txns = vec![
            exp("a", 70.0, "custom_gone"),
            exp("b", 30.0, "food"),
            inc("c", 10.0, "food"),
        ];
        let selected = vec!["food".to_string()];
        let summary = SummaryService::dashboard(&txns, &registry, day(10), Some(50.0), &selected);
        assert_eq!(summary.today_totals.expense, 100.0);
        assert_eq!(summary.total_expenses, 100.0);
        let top = summary.top.unwrap();
        assert_eq!(top.label, "Transaction");
        assert_eq!(top.total, 70.0);
        assert_eq!(summary.breakdown[1].label, "Food & Dining");
        assert!(summary.breakdown[1].selected);
        assert_eq!(summary.breakdown[0].share, 70.0);
        assert!(summary.budget.unwrap().over_budget);
        assert_eq!(summary.selection.net, -20.0);
        assert_eq!(summary.today_transactions.len(), 3);
    }
}
