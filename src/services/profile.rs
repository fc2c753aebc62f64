//! Stock profile fetcher: provider snapshot + indicator engine -> StockProfile

use crate::indicators;
use crate::models::indicators::ChartHistory;
use crate::models::profile::{StockProfile, Ticker};
use crate::services::market_data::{MarketDataProvider, ProviderSnapshot};
use std::sync::Arc;
use tracing::{debug, warn};

/// Assemble a profile from a provider snapshot.
///
/// Returns `None` when the snapshot has no price history.
pub fn build_profile(
    ticker: &Ticker,
    snapshot: ProviderSnapshot,
    symbol_suffix: &str,
) -> Option<(StockProfile, ChartHistory)> {
    if snapshot.history.is_empty() {
        return None;
    }

    let history = indicators::annotate(ticker.clone(), snapshot.history);
    let profile = StockProfile::new(
        ticker.clone(),
        symbol_suffix,
        &snapshot.fundamentals,
        history.indicator_set(),
    );

    Some((profile, history))
}

#[derive(Clone)]
pub struct StockProfileFetcher {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    symbol_suffix: String,
}

impl StockProfileFetcher {
    pub fn new(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        symbol_suffix: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            symbol_suffix: symbol_suffix.into(),
        }
    }

    pub fn symbol_suffix(&self) -> &str {
        &self.symbol_suffix
    }

    /// Profile and annotated history for `ticker`.
    ///
    /// Unknown tickers, empty histories and provider failures all yield
    /// `None`; the ticker is simply left out of the run.
    pub async fn fetch(&self, ticker: &Ticker) -> Option<(StockProfile, ChartHistory)> {
        let snapshot = match self.provider.fetch_profile(ticker).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(ticker = %ticker, "No data reported for {}", ticker);
                return None;
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Failed to fetch data for {}", ticker);
                return None;
            }
        };

        let built = build_profile(ticker, snapshot, &self.symbol_suffix);
        if built.is_none() {
            debug!(ticker = %ticker, "Empty price history for {}", ticker);
        }
        built
    }
}
