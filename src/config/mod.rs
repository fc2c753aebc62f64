//! Environment-driven configuration.

use crate::error::{Result, ScreenerError};
use std::env;
use std::str::FromStr;

pub const DEFAULT_UNIVERSE_URL: &str =
    "https://archives.nseindia.com/content/indices/ind_nifty50list.csv";
pub const DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com";
/// Host that hands out the session cookie the quoteSummary crumb is bound to
pub const DEFAULT_MARKET_DATA_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_SYMBOL_SUFFIX: &str = ".NS";
pub const DEFAULT_HISTORY_RANGE: &str = "1y";
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Large caps used when the live constituents list cannot be downloaded.
pub const FALLBACK_SYMBOLS: [&str; 15] = [
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "HINDUNILVR.NS",
    "BHARTIARTL.NS",
    "ITC.NS",
    "SBIN.NS",
    "LICI.NS",
    "BAJFINANCE.NS",
    "HCLTECH.NS",
    "KOTAKBANK.NS",
    "MARUTI.NS",
    "ASIANPAINT.NS",
];

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    pub universe_url: String,
    pub market_data_url: String,
    /// Empty disables crumb handling
    pub market_data_cookie_url: String,
    pub symbol_suffix: String,
    pub history_range: String,
    pub fetch_concurrency: usize,
    pub fallback_symbols: Vec<String>,
    pub user_agent: String,
    pub port: u16,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            universe_url: DEFAULT_UNIVERSE_URL.to_string(),
            market_data_url: DEFAULT_MARKET_DATA_URL.to_string(),
            market_data_cookie_url: DEFAULT_MARKET_DATA_COOKIE_URL.to_string(),
            symbol_suffix: DEFAULT_SYMBOL_SUFFIX.to_string(),
            history_range: DEFAULT_HISTORY_RANGE.to_string(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            fallback_symbols: FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ScreenerConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let fetch_concurrency = parse_var("FETCH_CONCURRENCY", defaults.fetch_concurrency)?;
        if fetch_concurrency == 0 {
            return Err(ScreenerError::Config(
                "FETCH_CONCURRENCY must be > 0".to_string(),
            ));
        }

        let fallback_symbols = match env::var("FALLBACK_SYMBOLS") {
            Ok(raw) => parse_symbol_list(&raw),
            Err(_) => defaults.fallback_symbols,
        };

        Ok(Self {
            universe_url: env::var("UNIVERSE_URL").unwrap_or(defaults.universe_url),
            market_data_url: env::var("MARKET_DATA_URL").unwrap_or(defaults.market_data_url),
            market_data_cookie_url: env::var("MARKET_DATA_COOKIE_URL")
                .map(|raw| raw.trim().to_string())
                .unwrap_or(defaults.market_data_cookie_url),
            symbol_suffix: env::var("SYMBOL_SUFFIX").unwrap_or(defaults.symbol_suffix),
            history_range: env::var("HISTORY_RANGE").unwrap_or(defaults.history_range),
            fetch_concurrency,
            fallback_symbols,
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            port: parse_var("PORT", defaults.port)?,
        })
    }
}

/// Split a comma-separated symbol list, dropping blanks
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScreenerError::Config(format!("{} has invalid value '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}
