//! SMA (Simple Moving Average) indicator

/// SMA at every position of `values`.
///
/// Position `i` holds the mean of `values[i + 1 - period..=i]`; positions
/// before the first full window are `None`.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            Some(window.iter().sum::<f64>() / period as f64)
        })
        .collect()
}
