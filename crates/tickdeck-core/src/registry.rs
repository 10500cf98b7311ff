//! Ticker-keyed stock registry persisted as one map document.

use std::collections::BTreeMap;

use crate::store::KeyValueStore;
use crate::{CoreError, StockRecord, Ticker, ValidationError};

/// Storage key holding the whole ticker → record map.
pub const STOCKS_KEY: &str = "stocks";

/// CRUD-ish mapping of ticker to stock record, backed by the injected store.
///
/// Every mutation rewrites the whole map under [`STOCKS_KEY`]; there is no
/// per-record granularity. Acceptable because the execution model is
/// single-threaded with no overlapping mutations.
#[derive(Clone)]
pub struct StockRegistry {
    store: KeyValueStore,
}

impl StockRegistry {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Persist an empty map when no stocks document exists yet.
    pub fn seed(&self) -> Result<(), CoreError> {
        let stocks = self.stocks_map();
        if stocks.is_empty() {
            self.store.set(STOCKS_KEY, &stocks)?;
        }
        Ok(())
    }

    /// Create (or overwrite) a stock record under its normalized ticker.
    ///
    /// Volume and price are validated at this boundary; open/high/low are
    /// seeded from the initial price.
    pub fn create_stock(
        &self,
        company: &str,
        ticker: &str,
        volume: f64,
        price: f64,
    ) -> Result<StockRecord, CoreError> {
        let ticker = Ticker::parse(ticker)?;
        let record = StockRecord::new(company, ticker, volume, price)?;

        let mut stocks = self.stocks_map();
        stocks.insert(record.ticker.as_str().to_owned(), record.clone());
        self.store.set(STOCKS_KEY, &stocks)?;

        Ok(record)
    }

    /// Snapshot of all records, ordered by ticker.
    pub fn list_stocks(&self) -> Vec<StockRecord> {
        self.stocks_map().into_values().collect()
    }

    /// Case-insensitive lookup; `Ok(None)` when the ticker is not listed.
    pub fn get_stock(&self, ticker: &str) -> Result<Option<StockRecord>, ValidationError> {
        let ticker = Ticker::parse(ticker)?;
        Ok(self.stocks_map().remove(ticker.as_str()))
    }

    fn stocks_map(&self) -> BTreeMap<String, StockRecord> {
        self.store.get(STOCKS_KEY, BTreeMap::new())
    }
}
