//! Symbol source interface and universe resolution.

use crate::error::Result;
use crate::models::profile::Ticker;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{info, warn};

#[async_trait]
pub trait SymbolSource {
    /// Current stock universe, in source order
    async fn fetch_universe(&self) -> Result<Vec<Ticker>>;
}

/// Symbol source backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolSource {
    tickers: Vec<Ticker>,
}

impl StaticSymbolSource {
    pub fn new(tickers: Vec<Ticker>) -> Self {
        Self { tickers }
    }

    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Self {
        Self::new(symbols.iter().map(|s| Ticker::new(s.as_ref())).collect())
    }
}

#[async_trait]
impl SymbolSource for StaticSymbolSource {
    async fn fetch_universe(&self) -> Result<Vec<Ticker>> {
        Ok(self.tickers.clone())
    }
}

/// Universe for this run: the live list, or `fallback` when the live fetch fails.
///
/// Both outcomes are treated the same downstream. Blank and duplicate
/// tickers are dropped, keeping the first occurrence.
pub async fn resolve_universe(
    source: &(dyn SymbolSource + Send + Sync),
    fallback: &[Ticker],
) -> Vec<Ticker> {
    let tickers = match source.fetch_universe().await {
        Ok(tickers) => {
            info!(count = tickers.len(), "Fetched universe of {} tickers", tickers.len());
            tickers
        }
        Err(e) => {
            warn!(
                error = %e,
                fallback = fallback.len(),
                "Could not download the symbol list, using the default list"
            );
            fallback.to_vec()
        }
    };

    dedup_tickers(tickers)
}

fn dedup_tickers(tickers: Vec<Ticker>) -> Vec<Ticker> {
    let mut seen = HashSet::new();
    tickers
        .into_iter()
        .filter(|t| !t.as_str().trim().is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
