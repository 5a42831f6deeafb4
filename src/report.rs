use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::io::Write;

use crate::error::Result;
use crate::summary::{DailySeries, Totals};
use crate::transaction::{format_date, Transaction, COLUMNS};

fn round(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}

struct TransactionRow<'a> {
    tx: &'a Transaction,
    date_format: &'a str,
}

impl Serialize for TransactionRow<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut row = serializer.serialize_struct("Transaction", 4)?;
        row.serialize_field(COLUMNS[0], &format_date(self.tx.date(), self.date_format))?;
        row.serialize_field(COLUMNS[1], &round(self.tx.amount()))?;
        row.serialize_field(COLUMNS[2], self.tx.category().as_str())?;
        row.serialize_field(COLUMNS[3], self.tx.description())?;
        row.end()
    }
}

struct DailyRow<'a> {
    date: NaiveDate,
    income: f64,
    expense: f64,
    date_format: &'a str,
}

impl Serialize for DailyRow<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut row = serializer.serialize_struct("DailyRow", 3)?;
        row.serialize_field("Date", &format_date(self.date, self.date_format))?;
        row.serialize_field("Income", &round(self.income))?;
        row.serialize_field("Expense", &round(self.expense))?;
        row.end()
    }
}

/// Writes `records` as a CSV table with the ledger header. Nothing is
/// written for an empty input.
pub fn write_transactions<'a, W, I>(w: W, records: I, date_format: &str) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut wtr = csv::Writer::from_writer(w);
    for tx in records {
        wtr.serialize(TransactionRow { tx, date_format })?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn write_totals<W: Write>(mut w: W, totals: &Totals) -> Result<()> {
    writeln!(w, "Total Income: {:.2}", totals.total_income)?;
    writeln!(w, "Total Expense: {:.2}", totals.total_expense)?;
    writeln!(w, "Net Savings: {:.2}", totals.net_savings)?;
    Ok(())
}

/// Writes one `Date,Income,Expense` row per day of `series`.
pub fn write_daily_series<W: Write>(w: W, series: &DailySeries, date_format: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    for (date, income, expense) in series.rows() {
        wtr.serialize(DailyRow {
            date,
            income,
            expense,
            date_format,
        })?;
    }
    wtr.flush()?;

    Ok(())
}
