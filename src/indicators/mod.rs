//! Indicator engine: moving averages and RSI over daily closes.

pub mod momentum;
pub mod trend;

use crate::models::indicators::{AnnotatedBar, ChartHistory, PriceBar};
use crate::models::profile::Ticker;

pub const SMA_FAST_PERIOD: usize = 50;
pub const SMA_SLOW_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;

/// Attach SMA_50, SMA_200 and RSI_14 to every bar of a chronological history
pub fn annotate(ticker: Ticker, bars: Vec<PriceBar>) -> ChartHistory {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let sma_fast = trend::sma_series(&closes, SMA_FAST_PERIOD);
    let sma_slow = trend::sma_series(&closes, SMA_SLOW_PERIOD);
    let rsi = momentum::rsi_series(&closes, RSI_PERIOD);

    let bars = bars
        .into_iter()
        .enumerate()
        .map(|(i, bar)| AnnotatedBar {
            bar,
            sma_50: sma_fast[i],
            sma_200: sma_slow[i],
            rsi: rsi[i],
        })
        .collect();

    ChartHistory { ticker, bars }
}
