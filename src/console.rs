use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};

use crate::chart::render_daily_series;
use crate::error::Result;
use crate::query::RangeQuery;
use crate::report::{write_daily_series, write_totals, write_transactions};
use crate::store::LedgerStore;
use crate::summary::{daily_series, partition, totals};
use crate::transaction::{format_date, parse_amount, parse_date, Category, Transaction};

const MENU: &str = "1. Add new transaction\n\
                    2. View transactions and summary within a range\n\
                    3. Exit";

/// Text-menu front-end over a [`LedgerStore`].
///
/// Every prompt re-asks until the answer is valid; end of input stops the
/// menu.
pub struct Console<'a, R, W> {
    store: &'a LedgerStore,
    input: R,
    output: W,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(store: &'a LedgerStore, input: R, output: W) -> Console<'a, R, W> {
        Console {
            store,
            input,
            output,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date used when the user accepts the default.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        self.store.initialize()?;

        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.read_line("Enter the choice (1-3): ")? {
                Some(choice) => choice,
                None => break,
            };

            let outcome = match choice.as_str() {
                "1" => self.add(),
                "2" => self.view(),
                "3" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Enter 1, 2 or 3.")?;
                    continue;
                }
            };

            match outcome {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    log::error!("{}", err);
                    writeln!(self.output, "Error: {}", err)?;
                }
            }
        }

        Ok(())
    }

    /// Returns `Ok(false)` when input ran out mid-way.
    fn add(&mut self) -> Result<bool> {
        let date = match self.prompt_date(
            "Enter the date of the transaction (dd-mm-yyyy) or press enter for today: ",
            true,
        )? {
            Some(date) => date,
            None => return Ok(false),
        };
        let amount = match self.prompt("Enter the amount: ", |s| {
            parse_amount(s).map_err(|e| e.to_string())
        })? {
            Some(amount) => amount,
            None => return Ok(false),
        };
        let category = match self.prompt(
            "Enter the category ('I' for Income, 'E' for Expense): ",
            |s| s.parse::<Category>().map_err(|e| e.to_string()),
        )? {
            Some(category) => category,
            None => return Ok(false),
        };
        let description = match self.read_line("Enter the description (optional): ")? {
            Some(description) => description,
            None => return Ok(false),
        };

        let tx = Transaction::new(date, amount, category, description)?;
        self.store.append(&tx)?;
        writeln!(self.output, "Entry added successfully")?;

        Ok(true)
    }

    fn view(&mut self) -> Result<bool> {
        let start = match self.prompt_date("Enter the start date (dd-mm-yyyy): ", false)? {
            Some(date) => date,
            None => return Ok(false),
        };
        let end = match self.prompt_date("Enter the end date (dd-mm-yyyy): ", false)? {
            Some(date) => date,
            None => return Ok(false),
        };

        let store = self.store;
        let records = RangeQuery::new(store).between(start, end)?;
        if records.is_empty() {
            writeln!(self.output, "No transactions found in the given date range.")?;
            return Ok(true);
        }

        let date_format = store.config().date_format();
        writeln!(
            self.output,
            "Transactions from {} to {}",
            format_date(start, date_format),
            format_date(end, date_format)
        )?;
        write_transactions(&mut self.output, &records, date_format)?;
        writeln!(self.output, "\nSummary:")?;
        write_totals(&mut self.output, &totals(&records))?;

        let (income, expense) = partition(&records);
        for (title, view) in [("Income Data", income), ("Expense Data", expense)] {
            writeln!(self.output, "\n{}:", title)?;
            if view.is_empty() {
                writeln!(self.output, "none")?;
            } else {
                write_transactions(&mut self.output, view, date_format)?;
            }
        }

        let answer = match self.read_line("Do you want to see a plot (Y or N): ")? {
            Some(answer) => answer,
            None => return Ok(false),
        };
        if answer.eq_ignore_ascii_case("y") {
            let series = daily_series(&records);
            writeln!(self.output, "\nDaily income and expense:")?;
            write_daily_series(&mut self.output, &series, date_format)?;

            let chart_path = store.config().chart_path();
            render_daily_series(&series, &chart_path, date_format)?;
            writeln!(self.output, "Chart saved to {}", chart_path.display())?;
        }

        Ok(true)
    }

    fn prompt_date(&mut self, prompt: &str, allow_default: bool) -> Result<Option<NaiveDate>> {
        let today = self.today;
        let date_format = self.store.config().date_format().to_string();
        self.prompt(prompt, |s| {
            if allow_default && s.is_empty() {
                return Ok(today);
            }
            parse_date(s, &date_format).map_err(|e| e.to_string())
        })
    }

    fn prompt<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> std::result::Result<T, String>,
    {
        loop {
            let line = match self.read_line(prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
