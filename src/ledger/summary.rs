//! Derived totals: ledger-wide summary, expense split by category, and the
//! rolling monthly window used for trend charts.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use super::{category::Category, transaction::Transaction, transaction::TransactionKind};

/// Number of calendar months covered by the monthly aggregate, reference month included.
pub const MONTHLY_WINDOW: u32 = 6;

const MONTH_LABEL_FORMAT: &str = "%b %Y";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Summary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = sum_by_kind(transactions);
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.balance < 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Expense totals per category, in order of each category's first
/// appearance. Categories without expenses are absent rather than zero.
pub fn category_totals<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
        match totals.iter_mut().find(|entry| entry.category == txn.category) {
            Some(entry) => entry.total += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category,
                total: txn.amount,
            }),
        }
    }
    totals
}

/// One calendar month of the trend window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyBucket {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyBucket {
    fn empty(start: NaiveDate) -> Self {
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self {
            label: start.format(MONTH_LABEL_FORMAT).to_string(),
            start,
            end,
            income: 0.0,
            expense: 0.0,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Builds the [`MONTHLY_WINDOW`] buckets ending with the month of `reference`,
/// oldest first, and totals each transaction into the bucket its date falls
/// in. Transactions dated outside the window are ignored.
pub fn monthly_totals<'a, I>(transactions: I, reference: NaiveDate) -> Vec<MonthlyBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: Vec<MonthlyBucket> = month_starts(reference)
        .into_iter()
        .map(MonthlyBucket::empty)
        .collect();
    for txn in transactions {
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.contains(txn.date)) {
            match txn.kind {
                TransactionKind::Income => bucket.income += txn.amount,
                TransactionKind::Expense => bucket.expense += txn.amount,
            }
        }
    }
    buckets
}

fn month_starts(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = reference.with_day(1).unwrap_or(reference);
    (0..MONTHLY_WINDOW)
        .rev()
        .map(|back| {
            first
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN)
        })
        .collect()
}

fn sum_by_kind<'a, I>(transactions: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
            TransactionKind::Income => (income + txn.amount, expense),
            TransactionKind::Expense => (income, expense + txn.amount),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(
        id: u64,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            description: format!("txn {id}"),
            amount,
            category,
            kind,
            date: on,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn month_starts_cross_year_boundary() {
        let starts = month_starts(date(2024, 2, 29));
        assert_eq!(
            starts,
            vec![
                date(2023, 9, 1),
                date(2023, 10, 1),
                date(2023, 11, 1),
                date(2023, 12, 1),
                date(2024, 1, 1),
                date(2024, 2, 1),
            ]
        );
    }

    #[test]
    fn buckets_cover_whole_months_with_labels() {
        let buckets = monthly_totals(std::iter::empty::<&Transaction>(), date(2024, 3, 31));
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].label, "Oct 2023");
        assert_eq!(buckets[4].start, date(2024, 2, 1));
        assert_eq!(buckets[4].end, date(2024, 2, 29));
        assert_eq!(buckets[5].label, "Mar 2024");
        assert_eq!(buckets[5].end, date(2024, 3, 31));
    }

    #[test]
    fn month_edges_are_inclusive() {
        let data = vec![
            txn(1, 10.0, Category::Food, TransactionKind::Expense, date(2024, 5, 1)),
            txn(2, 20.0, Category::Food, TransactionKind::Expense, date(2024, 5, 31)),
            txn(3, 40.0, Category::Salary, TransactionKind::Income, date(2024, 6, 1)),
        ];
        let buckets = monthly_totals(&data, date(2024, 6, 10));
        let may = &buckets[4];
        assert_eq!(may.label, "May 2024");
        assert_eq!(may.expense, 30.0);
        assert_eq!(may.income, 0.0);
        assert_eq!(buckets[5].income, 40.0);
        assert_eq!(buckets[5].net(), 40.0);
    }

    #[test]
    fn transactions_outside_window_are_ignored() {
        let data = vec![
            txn(1, 10.0, Category::Food, TransactionKind::Expense, date(2023, 12, 31)),
            txn(2, 20.0, Category::Food, TransactionKind::Expense, date(2024, 7, 1)),
        ];
        let buckets = monthly_totals(&data, date(2024, 6, 10));
        assert!(buckets
            .iter()
            .all(|bucket| bucket.income == 0.0 && bucket.expense == 0.0));
    }

    #[test]
    fn category_totals_keep_first_seen_order_and_skip_income() {
        let data = vec![
            txn(1, 5.0, Category::Transport, TransactionKind::Expense, date(2024, 1, 3)),
            txn(2, 900.0, Category::Salary, TransactionKind::Income, date(2024, 1, 2)),
            txn(3, 7.5, Category::Food, TransactionKind::Expense, date(2024, 1, 2)),
            txn(4, 2.5, Category::Transport, TransactionKind::Expense, date(2024, 1, 1)),
        ];
        let totals = category_totals(&data);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: Category::Transport,
                    total: 7.5
                },
                CategoryTotal {
                    category: Category::Food,
                    total: 7.5
                },
            ]
        );
    }

    #[test]
    fn summary_balance_can_go_negative() {
        let data = vec![
            txn(1, 50.0, Category::Bills, TransactionKind::Expense, date(2024, 1, 1)),
            txn(2, 20.0, Category::Freelance, TransactionKind::Income, date(2024, 1, 1)),
        ];
        let summary = Summary::from_transactions(&data);
        assert_eq!(summary.income, 20.0);
        assert_eq!(summary.expense, 50.0);
        assert_eq!(summary.balance, -30.0);
        assert!(summary.is_negative());
    }
}
