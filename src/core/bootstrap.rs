//! Wiring of the concrete collaborators from configuration

use crate::config::ScreenerConfig;
use crate::core::runtime::{RuntimeConfig, ScreeningRuntime};
use crate::error::Result;
use crate::services::nse::NseSymbolSource;
use crate::services::profile::StockProfileFetcher;
use crate::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;

/// Runtime backed by the NSE constituents list and Yahoo market data
pub fn build_runtime(config: &ScreenerConfig) -> Result<ScreeningRuntime> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .cookie_store(true)
        .build()?;

    let symbol_source = NseSymbolSource::with_client(
        client.clone(),
        config.universe_url.clone(),
        config.user_agent.clone(),
        config.symbol_suffix.clone(),
    );
    let mut provider = YahooMarketDataProvider::with_client(
        client,
        &config.market_data_url,
        config.history_range.clone(),
        config.user_agent.clone(),
    )?;
    if !config.market_data_cookie_url.is_empty() {
        provider = provider.with_crumb_from(&config.market_data_cookie_url)?;
    }
    let fetcher = StockProfileFetcher::new(Arc::new(provider), config.symbol_suffix.clone());

    Ok(ScreeningRuntime::new(
        RuntimeConfig::from(config),
        Arc::new(symbol_source),
        fetcher,
    ))
}
