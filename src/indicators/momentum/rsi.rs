//! RSI (Relative Strength Index) indicator

/// RSI at every position of `closes`.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss over the
/// last `period` day-over-day changes. The first close has no prior day and
/// counts as an unchanged day, so the first defined value is at
/// `i == period - 1`.
///
/// A window without losses reads 100. A flat window (no gains and no
/// losses) has no meaningful RSI and reads `None`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut series = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return series;
    }

    // changes[i] is the move into closes[i]
    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|w| w[1] - w[0]))
        .collect();

    for (i, slot) in series.iter_mut().enumerate().skip(period - 1) {
        let window = &changes[i + 1 - period..=i];
        let gain: f64 = window.iter().filter(|c| **c > 0.0).sum();
        let loss: f64 = window.iter().filter(|c| **c < 0.0).map(|c| c.abs()).sum();
        *slot = rsi_from_averages(gain / period as f64, loss / period as f64);
    }

    series
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
