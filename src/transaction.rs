use chrono::NaiveDate;
use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::error::{Error, ValidationError};

/// Header of the ledger file, in storage order.
pub const COLUMNS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

/// Canonical `DD-MM-YYYY` date format.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }

    /// Strict parsing for the ledger file: only the exact literals.
    pub fn from_stored(name: &str) -> Result<Category, ValidationError> {
        match name {
            "Income" => Ok(Category::Income),
            "Expense" => Ok(Category::Expense),
            _ => Err(ValidationError::UnknownCategory(name.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parsing for typed input: `I`/`E` or the full name, any case.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" | "income" => Ok(Category::Income),
            "e" | "expense" => Ok(Category::Expense),
            _ => Err(ValidationError::UnknownCategory(s.trim().to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    date: NaiveDate,
    amount: f64,
    category: Category,
    description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Transaction, ValidationError> {
        check_amount(amount)?;
        Ok(Transaction {
            date,
            amount,
            category,
            description: description.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    Ok(())
}

/// Parses a typed amount, e.g. `"12.50"`.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let amount = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount(input.trim().to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

pub fn parse_date(input: &str, format: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(input, format).map_err(|_| Error::DateFormat {
        input: input.to_string(),
        format: format.to_string(),
    })
}

pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}
