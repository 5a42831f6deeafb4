use std::path::{Path, PathBuf};

use crate::transaction::DATE_FORMAT;

pub const DEFAULT_LEDGER_FILE: &str = "finance_data.csv";

/// Settings shared by every component that touches the ledger file.
///
/// Built once and handed to [`crate::LedgerStore::new`]; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    path: PathBuf,
    date_format: &'static str,
}

impl LedgerConfig {
    pub fn new(path: impl Into<PathBuf>) -> LedgerConfig {
        LedgerConfig {
            path: path.into(),
            date_format: DATE_FORMAT,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the income/expense chart is written: the ledger path with an
    /// `.svg` extension.
    pub fn chart_path(&self) -> PathBuf {
        self.path.with_extension("svg")
    }

    pub fn date_format(&self) -> &str {
        self.date_format
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}
