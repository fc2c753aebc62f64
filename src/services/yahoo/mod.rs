//! Yahoo Finance integration

pub mod messages;
pub mod provider;

pub use provider::YahooMarketDataProvider;
