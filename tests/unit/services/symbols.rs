//! Unit tests for universe resolution

use async_trait::async_trait;
use equiscreen::error::{Result, ScreenerError};
use equiscreen::models::profile::Ticker;
use equiscreen::services::symbols::{resolve_universe, StaticSymbolSource, SymbolSource};

struct FailingSource;

#[async_trait]
impl SymbolSource for FailingSource {
    async fn fetch_universe(&self) -> Result<Vec<Ticker>> {
        Err(ScreenerError::Status {
            status: 503,
            url: "https://example.invalid/list.csv".to_string(),
        })
    }
}

fn tickers(symbols: &[&str]) -> Vec<Ticker> {
    symbols.iter().map(|s| Ticker::new(*s)).collect()
}

#[tokio::test]
async fn test_live_list_is_used_when_available() {
    let source = StaticSymbolSource::from_symbols(&["TCS.NS", "INFY.NS"]);
    let universe = resolve_universe(&source, &tickers(&["ITC.NS"])).await;
    assert_eq!(universe, tickers(&["TCS.NS", "INFY.NS"]));
}

#[tokio::test]
async fn test_fallback_used_on_failure() {
    let fallback = tickers(&["RELIANCE.NS", "TCS.NS"]);
    let universe = resolve_universe(&FailingSource, &fallback).await;
    assert_eq!(universe, fallback);
}

#[tokio::test]
async fn test_both_sources_empty() {
    let universe = resolve_universe(&FailingSource, &[]).await;
    assert!(universe.is_empty());
}

#[tokio::test]
async fn test_duplicates_and_blanks_are_dropped() {
    let source = StaticSymbolSource::from_symbols(&["TCS.NS", " ", "INFY.NS", "TCS.NS"]);
    let universe = resolve_universe(&source, &[]).await;
    assert_eq!(universe, tickers(&["TCS.NS", "INFY.NS"]));
}
