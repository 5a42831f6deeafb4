use chrono::NaiveDate;

use crate::error::Result;
use crate::store::LedgerStore;
use crate::transaction::{parse_date, Transaction};

/// Date-window lookups over a [`LedgerStore`].
pub struct RangeQuery<'a> {
    store: &'a LedgerStore,
}

impl RangeQuery<'_> {
    pub fn new<'a>(store: &'a LedgerStore) -> RangeQuery<'a> {
        RangeQuery { store }
    }

    /// Returns the transactions dated within `start..=end`, both given in the
    /// store's date format. A window with `start` after `end` matches nothing.
    pub fn query(&self, start: &str, end: &str) -> Result<Vec<Transaction>> {
        let date_format = self.store.config().date_format();
        let start = parse_date(start, date_format)?;
        let end = parse_date(end, date_format)?;
        self.between(start, end)
    }

    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let selected: Vec<Transaction> = self
            .store
            .load_all()?
            .into_iter()
            .filter(|tx| start <= tx.date() && tx.date() <= end)
            .collect();

        log::debug!(
            "{} transactions between {} and {}",
            selected.len(),
            start,
            end
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::Error;
    use crate::transaction::Category;
    use tempfile::TempDir;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store(dir: &TempDir) -> (LedgerStore, Vec<Transaction>) {
        let store = LedgerStore::new(LedgerConfig::new(dir.path().join("finance_data.csv")));
        store.initialize().unwrap();
        let records = vec![
            Transaction::new(day(1, 1, 2024), 100.0, Category::Income, "salary").unwrap(),
            Transaction::new(day(3, 1, 2024), 40.0, Category::Expense, "food").unwrap(),
            Transaction::new(day(31, 12, 2023), 15.0, Category::Expense, "party").unwrap(),
            Transaction::new(day(4, 1, 2024), 7.5, Category::Expense, "bus").unwrap(),
            Transaction::new(day(2, 1, 2024), 60.0, Category::Income, "refund").unwrap(),
        ];
        for tx in &records {
            store.append(tx).unwrap();
        }
        (store, records)
    }

    #[test]
    fn inclusive_window() {
        let dir = TempDir::new().unwrap();
        let (store, records) = seeded_store(&dir);
        let result = RangeQuery::new(&store).query("01-01-2024", "03-01-2024").unwrap();

        assert_eq!(
            result,
            vec![records[0].clone(), records[1].clone(), records[4].clone()]
        );
    }

    #[test]
    fn single_day_window() {
        let dir = TempDir::new().unwrap();
        let (store, records) = seeded_store(&dir);
        let result = RangeQuery::new(&store).query("31-12-2023", "31-12-2023").unwrap();

        assert_eq!(result, vec![records[2].clone()]);
    }

    #[test]
    fn matches_filtered_load_all() {
        let dir = TempDir::new().unwrap();
        let (store, _) = seeded_store(&dir);
        let (start, end) = (day(2, 1, 2024), day(10, 1, 2024));
        let expected: Vec<Transaction> = store
            .load_all()
            .unwrap()
            .into_iter()
            .filter(|tx| tx.date() >= start && tx.date() <= end)
            .collect();

        assert_eq!(RangeQuery::new(&store).between(start, end).unwrap(), expected);
    }

    #[test]
    fn reversed_window_is_empty() {
        let dir = TempDir::new().unwrap();
        let (store, _) = seeded_store(&dir);
        let result = RangeQuery::new(&store).query("03-01-2024", "01-01-2024").unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn empty_store() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::new(LedgerConfig::new(dir.path().join("finance_data.csv")));
        store.initialize().unwrap();
        let result = RangeQuery::new(&store).query("01-01-2024", "31-12-2024").unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn malformed_bounds() {
        let dir = TempDir::new().unwrap();
        let (store, _) = seeded_store(&dir);
        let query = RangeQuery::new(&store);

        assert!(matches!(
            query.query("2024-01-01", "03-01-2024"),
            Err(Error::DateFormat { .. })
        ));
        assert!(matches!(
            query.query("01-01-2024", "3/1/2024"),
            Err(Error::DateFormat { .. })
        ));
    }

    #[test]
    fn schema_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::new(LedgerConfig::new(dir.path().join("finance_data.csv")));
        std::fs::write(store.config().path(), "Amount,Category,Description\n").unwrap();

        assert!(matches!(
            RangeQuery::new(&store).query("01-01-2024", "03-01-2024"),
            Err(Error::Schema(_))
        ));
    }
}
