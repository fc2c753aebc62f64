use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::profile::Ticker;

/// One trading day of OHLCV data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Latest indicator values of a price history; `None` when history is too short
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub rsi_14: Option<f64>,
}

/// A price bar together with the indicator values computed up to that bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: PriceBar,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub rsi: Option<f64>,
}

/// Full price history with indicators, as needed for charting one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartHistory {
    pub ticker: Ticker,
    pub bars: Vec<AnnotatedBar>,
}

impl ChartHistory {
    pub fn latest(&self) -> Option<&AnnotatedBar> {
        self.bars.last()
    }

    pub fn indicator_set(&self) -> IndicatorSet {
        self.latest()
            .map(|bar| IndicatorSet {
                sma_50: bar.sma_50,
                sma_200: bar.sma_200,
                rsi_14: bar.rsi,
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
