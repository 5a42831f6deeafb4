pub mod chart;
pub mod config;
pub mod console;
pub mod error;
pub mod query;
pub mod report;
pub mod store;
pub mod summary;
pub mod transaction;

pub use config::LedgerConfig;
pub use error::{Error, Result, ValidationError};
pub use query::RangeQuery;
pub use store::LedgerStore;
pub use summary::{daily_series, partition, totals, DailyPoint, DailySeries, Totals};
pub use transaction::{Category, Transaction};
