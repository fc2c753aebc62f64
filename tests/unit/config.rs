//! Unit tests for environment configuration

use equiscreen::config::{parse_symbol_list, ScreenerConfig, DEFAULT_FETCH_CONCURRENCY, FALLBACK_SYMBOLS};
use std::env;

#[test]
fn test_parse_symbol_list() {
    assert_eq!(
        parse_symbol_list(" TCS.NS, ,INFY.NS,"),
        vec!["TCS.NS".to_string(), "INFY.NS".to_string()]
    );
    assert!(parse_symbol_list("").is_empty());
}

#[test]
fn test_defaults() {
    let config = ScreenerConfig::default();
    assert_eq!(config.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
    assert_eq!(config.symbol_suffix, ".NS");
    assert_eq!(config.fallback_symbols.len(), FALLBACK_SYMBOLS.len());
    assert_eq!(config.market_data_cookie_url, "https://fc.yahoo.com");
}

// Single test touching the process environment so parallel tests don't race
#[test]
fn test_from_env_overrides_and_validation() {
    env::set_var("FETCH_CONCURRENCY", "3");
    env::set_var("FALLBACK_SYMBOLS", "AAA.NS,BBB.NS");
    env::set_var("PORT", "9090");
    env::set_var("MARKET_DATA_COOKIE_URL", " ");
    let config = ScreenerConfig::from_env().unwrap();
    assert_eq!(config.fetch_concurrency, 3);
    assert!(config.market_data_cookie_url.is_empty());
    assert_eq!(config.fallback_symbols, vec!["AAA.NS", "BBB.NS"]);
    assert_eq!(config.port, 9090);

    env::set_var("FETCH_CONCURRENCY", "0");
    assert!(ScreenerConfig::from_env().is_err());

    env::set_var("FETCH_CONCURRENCY", "many");
    assert!(ScreenerConfig::from_env().is_err());

    env::remove_var("FETCH_CONCURRENCY");
    env::remove_var("FALLBACK_SYMBOLS");
    env::remove_var("PORT");
    env::remove_var("MARKET_DATA_COOKIE_URL");
    let config = ScreenerConfig::from_env().unwrap();
    assert_eq!(config.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
}
