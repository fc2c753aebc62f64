//! Market data provider interface.

use crate::error::Result;
use crate::models::indicators::PriceBar;
use crate::models::profile::{Fundamentals, Ticker};
use async_trait::async_trait;

/// Fundamentals plus daily history for one ticker, as returned by a provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSnapshot {
    pub fundamentals: Fundamentals,
    /// Chronological, ascending by date
    pub history: Vec<PriceBar>,
}

#[async_trait]
pub trait MarketDataProvider {
    /// Fetch fundamentals and about one year of daily bars.
    ///
    /// `Ok(None)` means the provider does not know the ticker.
    async fn fetch_profile(&self, ticker: &Ticker) -> Result<Option<ProviderSnapshot>>;
}
