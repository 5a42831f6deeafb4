use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::transaction::{Category, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
}

/// Sums income and expense over `records`.
pub fn totals(records: &[Transaction]) -> Totals {
    let (total_income, total_expense) = records
        .iter()
        .fold((0.0_f64, 0.0_f64), |(income, expense), tx| match tx.category() {
            Category::Income => (income + tx.amount(), expense),
            Category::Expense => (income, expense + tx.amount()),
        });

    Totals {
        total_income,
        total_expense,
        net_savings: total_income - total_expense,
    }
}

/// Splits `records` into income and expense views, keeping their order.
pub fn partition(records: &[Transaction]) -> (Vec<&Transaction>, Vec<&Transaction>) {
    records.iter().partition(|tx| tx.is_income())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Per-day sums for both categories over the same gap-free range of days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub income: Vec<DailyPoint>,
    pub expense: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
    }

    /// Yields `(date, income, expense)` for each day.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, f64, f64)> + '_ {
        self.income
            .iter()
            .zip(self.expense.iter())
            .map(|(i, e)| (i.date, i.amount, e.amount))
    }
}

/// Buckets `records` by day for each category. Every day from the earliest
/// to the latest date in `records` appears once, with 0 where nothing
/// happened.
pub fn daily_series(records: &[Transaction]) -> DailySeries {
    let first = records.iter().map(|tx| tx.date()).min();
    let last = records.iter().map(|tx| tx.date()).max();
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return DailySeries::default(),
    };

    let mut income: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut expense: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for date in first.iter_days().take_while(|date| *date <= last) {
        income.insert(date, 0.0);
        expense.insert(date, 0.0);
    }

    for tx in records {
        let bucket = match tx.category() {
            Category::Income => &mut income,
            Category::Expense => &mut expense,
        };
        *bucket.entry(tx.date()).or_insert(0.0) += tx.amount();
    }

    DailySeries {
        income: to_points(income),
        expense: to_points(expense),
    }
}

fn to_points(buckets: BTreeMap<NaiveDate, f64>) -> Vec<DailyPoint> {
    buckets
        .into_iter()
        .map(|(date, amount)| DailyPoint { date, amount })
        .collect()
}
