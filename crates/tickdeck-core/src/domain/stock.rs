use serde::{Deserialize, Serialize};

use super::bar::{validate_non_negative, validate_positive};
use crate::{Ticker, ValidationError};

/// A listed instrument in the dashboard's registry.
///
/// `open`/`high`/`low` are seeded from the initial price at creation and are
/// never auto-updated afterwards; the registry exposes no price-update
/// operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub company: String,
    pub ticker: Ticker,
    pub volume: f64,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
}

impl StockRecord {
    pub fn new(
        company: impl Into<String>,
        ticker: Ticker,
        volume: f64,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let company = company.into();
        if company.trim().is_empty() {
            return Err(ValidationError::EmptyCompany);
        }

        validate_non_negative("volume", volume)?;
        validate_positive("price", price)?;

        Ok(Self {
            company,
            ticker,
            volume,
            price,
            open: price,
            high: price,
            low: price,
        })
    }
}
