//! Per-ticker snapshot data.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicators::IndicatorSet;

/// Exchange-qualified ticker, e.g. `RELIANCE.NS`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Qualify a bare exchange symbol with `suffix` unless it already carries it
    pub fn with_suffix(symbol: &str, suffix: &str) -> Self {
        let symbol = symbol.trim();
        if suffix.is_empty() || symbol.ends_with(suffix) {
            Self(symbol.to_string())
        } else {
            Self(format!("{}{}", symbol, suffix))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol without the exchange suffix
    pub fn display_symbol(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            return self.0.clone();
        }
        self.0.strip_suffix(suffix).unwrap_or(&self.0).to_string()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Fundamentals as reported by the market data provider.
///
/// Every field is optional; absence means the provider did not report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub long_name: Option<String>,
    pub current_price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub market_cap: Option<f64>,
}

/// One screened row: identity, fundamentals and the latest indicators.
///
/// Ratio fields are `None` when unknown. Price, market cap and the 52-week
/// bounds are display fields and read 0 when not reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockProfile {
    pub ticker: Ticker,
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub roe: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub week_52_high: f64,
    pub week_52_low: f64,
    pub market_cap: f64,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub rsi: Option<f64>,
}

impl StockProfile {
    pub fn new(
        ticker: Ticker,
        symbol_suffix: &str,
        fundamentals: &Fundamentals,
        indicators: IndicatorSet,
    ) -> Self {
        Self {
            symbol: ticker.display_symbol(symbol_suffix),
            ticker,
            company_name: fundamentals
                .long_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            current_price: finite(fundamentals.current_price).unwrap_or(0.0),
            pe_ratio: finite(fundamentals.trailing_pe),
            pb_ratio: finite(fundamentals.price_to_book),
            debt_to_equity: finite(fundamentals.debt_to_equity),
            roe: finite(fundamentals.return_on_equity),
            revenue_growth: finite(fundamentals.revenue_growth),
            week_52_high: finite(fundamentals.fifty_two_week_high).unwrap_or(0.0),
            week_52_low: finite(fundamentals.fifty_two_week_low).unwrap_or(0.0),
            market_cap: finite(fundamentals.market_cap).unwrap_or(0.0),
            sma_50: finite(indicators.sma_50),
            sma_200: finite(indicators.sma_200),
            rsi: finite(indicators.rsi_14),
        }
    }

    pub fn indicators(&self) -> IndicatorSet {
        IndicatorSet {
            sma_50: self.sma_50,
            sma_200: self.sma_200,
            rsi_14: self.rsi,
        }
    }
}

/// Numeric columns a strategy can filter or sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    CurrentPrice,
    PeRatio,
    PbRatio,
    DebtToEquity,
    Roe,
    RevenueGrowth,
    MarketCap,
    Sma50,
    Sma200,
    Rsi,
}

impl ProfileField {
    pub fn value(self, profile: &StockProfile) -> Option<f64> {
        match self {
            ProfileField::CurrentPrice => Some(profile.current_price),
            ProfileField::PeRatio => profile.pe_ratio,
            ProfileField::PbRatio => profile.pb_ratio,
            ProfileField::DebtToEquity => profile.debt_to_equity,
            ProfileField::Roe => profile.roe,
            ProfileField::RevenueGrowth => profile.revenue_growth,
            ProfileField::MarketCap => Some(profile.market_cap),
            ProfileField::Sma50 => profile.sma_50,
            ProfileField::Sma200 => profile.sma_200,
            ProfileField::Rsi => profile.rsi,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::CurrentPrice => "Current Price",
            ProfileField::PeRatio => "P/E Ratio",
            ProfileField::PbRatio => "P/B Ratio",
            ProfileField::DebtToEquity => "Debt to Equity",
            ProfileField::Roe => "ROE",
            ProfileField::RevenueGrowth => "Revenue Growth",
            ProfileField::MarketCap => "Market Cap",
            ProfileField::Sma50 => "SMA_50",
            ProfileField::Sma200 => "SMA_200",
            ProfileField::Rsi => "RSI",
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
