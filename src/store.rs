use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::transaction::{format_date, parse_date, Category, Transaction, COLUMNS};

#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Description", default)]
    description: String,
}

#[derive(Serialize)]
struct CsvOutRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Category")]
    category: Category,
    #[serde(rename = "Description")]
    description: &'a str,
}

/// Append-only ledger backed by a single CSV file.
pub struct LedgerStore {
    config: LedgerConfig,
}

impl LedgerStore {
    pub fn new(config: LedgerConfig) -> LedgerStore {
        LedgerStore { config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Creates the ledger file with only the header row. Existing files are
    /// left untouched.
    pub fn initialize(&self) -> Result<()> {
        let path = self.config.path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(COLUMNS)?;
        wtr.flush()?;
        log::info!("created ledger file {}", path.display());

        Ok(())
    }

    /// Adds `tx` as the last row. The row is encoded before the file is
    /// touched, so an encoding failure writes nothing. An existing but empty
    /// file gets the header in the same write as the row.
    pub fn append(&self, tx: &Transaction) -> Result<()> {
        self.initialize()?;

        let row = encode(|wtr| {
            wtr.serialize(CsvOutRow {
                date: format_date(tx.date(), self.config.date_format()),
                amount: tx.amount(),
                category: tx.category(),
                description: tx.description(),
            })
        })?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(self.config.path())?;
        let mut bytes = match last_byte(&mut file)? {
            None => {
                log::warn!(
                    "{} is empty, writing header before the row",
                    self.config.path().display()
                );
                encode(|wtr| wtr.write_record(COLUMNS))?
            }
            Some(b'\n') => Vec::new(),
            Some(_) => vec![b'\n'],
        };
        bytes.extend_from_slice(&row);
        file.write_all(&bytes)?;
        file.flush()?;

        log::debug!(
            "appended {} {} on {} to {}",
            tx.category(),
            tx.amount(),
            tx.date(),
            self.config.path().display()
        );
        Ok(())
    }

    /// Reads every record in insertion order.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        let mut rdr = ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(self.config.path())?;
        self.check_headers(rdr.headers()?)?;

        let mut result = Vec::new();
        for row in rdr.deserialize::<CsvRow>() {
            let row = row?;
            let date = parse_date(&row.date, self.config.date_format())?;
            let category = Category::from_stored(&row.category)?;
            result.push(Transaction::new(
                date,
                row.amount,
                category,
                row.description,
            )?);
        }

        log::debug!(
            "loaded {} transactions from {}",
            result.len(),
            self.config.path().display()
        );
        Ok(result)
    }

    fn check_headers(&self, headers: &StringRecord) -> Result<()> {
        for column in COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::Schema(format!(
                    "{} does not contain the '{}' column",
                    self.config.path().display(),
                    column
                )));
            }
        }

        for extra in headers.iter().filter(|h| !COLUMNS.contains(h)) {
            log::warn!(
                "ignoring unknown column '{}' in {}",
                extra,
                self.config.path().display()
            );
        }

        Ok(())
    }
}

fn encode<F>(write: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    write(&mut wtr)?;
    wtr.into_inner().map_err(|err| Error::Io(err.into_error()))
}

/// Last byte of `file`, or `None` when it is empty.
fn last_byte(file: &mut File) -> io::Result<Option<u8>> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(None);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(Some(last[0]))
}
