//! Unit tests for history annotation

use crate::fixtures::{bars_from_closes, rising_closes};
use equiscreen::indicators::annotate;
use equiscreen::models::profile::Ticker;

#[test]
fn test_annotate_marks_warmup_bars_undefined() {
    let bars = bars_from_closes(&rising_closes(250, 100.0));
    let history = annotate(Ticker::new("TCS.NS"), bars);

    assert_eq!(history.bars.len(), 250);
    assert!(history.bars[48].sma_50.is_none());
    assert!(history.bars[49].sma_50.is_some());
    assert!(history.bars[198].sma_200.is_none());
    assert!(history.bars[199].sma_200.is_some());
    assert!(history.bars[12].rsi.is_none());
    assert_eq!(history.bars[13].rsi, Some(100.0));
}

#[test]
fn test_indicator_set_reads_latest_bar() {
    let history = annotate(
        Ticker::new("INFY.NS"),
        bars_from_closes(&rising_closes(210, 100.0)),
    );
    let set = history.indicator_set();

    // closes 260..=309 and 110..=309
    assert!((set.sma_50.unwrap() - 284.5).abs() < 1e-9);
    assert!((set.sma_200.unwrap() - 209.5).abs() < 1e-9);
    assert_eq!(set.rsi_14, Some(100.0));
}

#[test]
fn test_fourteen_bars_have_only_rsi() {
    let history = annotate(
        Ticker::new("ITC.NS"),
        bars_from_closes(&rising_closes(14, 100.0)),
    );
    let set = history.indicator_set();
    assert!(set.sma_50.is_none());
    assert!(set.sma_200.is_none());
    assert_eq!(set.rsi_14, Some(100.0));
}

#[test]
fn test_empty_history() {
    let history = annotate(Ticker::new("ITC.NS"), Vec::new());
    assert!(history.is_empty());
    assert!(history.latest().is_none());
    assert_eq!(history.indicator_set().sma_50, None);
}
