//! Core contracts for tickdeck.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The JSON key/value store and its storage backends
//! - Stock registry and market schedule components
//! - Candlestick scene layout and the drawing-surface seam
//! - The aggregates (OHLC) data client and view router

pub mod chart;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod market_data;
pub mod registry;
pub mod router;
pub mod schedule;
pub mod store;

pub use chart::{
    draw_candles, layout_candles, CandleGlyph, ChartArea, ChartScene, Direction, DrawSurface,
    BEARISH_COLOR, BULLISH_COLOR,
};
pub use domain::{
    format_iso_date, parse_iso_date, HolidayDate, MarketHours, OhlcBar, StockRecord, Ticker,
    TimeOfDay, UtcTimestamp,
};
pub use envelope::{DataOrigin, Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use market_data::{
    parse_aggs_json, AggsWindow, MarketDataClient, MarketDataError, DEFAULT_BASE_URL,
};
pub use registry::{StockRegistry, STOCKS_KEY};
pub use router::{routes, AsyncOutcome, Mount, MountToken, Router, ViewContent};
pub use schedule::{MarketSchedule, MARKET_KEY};
pub use store::{
    default_data_dir, FileBackend, KeyValueStore, MemoryBackend, StorageBackend, StoreError,
};

/// Seed the `"stocks"` and `"market"` documents when absent.
///
/// Called once at startup so components never have to initialize state on
/// first use.
pub fn seed_defaults(store: &KeyValueStore) -> Result<(), CoreError> {
    StockRegistry::new(store.clone()).seed()?;
    MarketSchedule::new(store.clone()).seed()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_writes_both_documents() {
        let store = KeyValueStore::in_memory();
        seed_defaults(&store).expect("seed should succeed");

        let hours: MarketHours = store.get(MARKET_KEY, MarketHours::default());
        assert_eq!(hours, MarketHours::default());

        let stocks: std::collections::BTreeMap<String, StockRecord> =
            store.get(STOCKS_KEY, std::collections::BTreeMap::new());
        assert!(stocks.is_empty());
    }
}
