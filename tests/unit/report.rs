//! Unit tests for terminal report rendering

use crate::fixtures::{bars_from_closes, quality_profile, rising_closes};
use equiscreen::indicators::annotate;
use equiscreen::models::profile::Ticker;
use equiscreen::models::strategy::{ScreenOutcome, Strategy, StrategyKind, StrategyResult};
use equiscreen::report::{
    format_market_cap, format_number, format_percent, render_history_tail, render_outcome,
    render_raw_view,
};

#[test]
fn test_format_market_cap_in_crore() {
    assert_eq!(format_market_cap(1.5e12), "₹150,000.00 Cr");
    assert_eq!(format_market_cap(12_345_670_000.0), "₹1,234.57 Cr");
    assert_eq!(format_market_cap(0.0), "₹0.00 Cr");
}

#[test]
fn test_format_percent_and_number() {
    assert_eq!(format_percent(Some(0.1834)), "18.34%");
    assert_eq!(format_percent(None), "N/A");
    assert_eq!(format_number(Some(24.456)), "24.46");
    assert_eq!(format_number(None), "N/A");
}

fn quality() -> Strategy {
    Strategy::from_kind(StrategyKind::QualityInvesting)
}

#[test]
fn test_render_no_data_message() {
    let text = render_outcome(&quality(), &ScreenOutcome::NoData);
    assert!(text.starts_with("Top Stocks based on Quality Investing Strategy"));
    assert!(text.contains("Could not fetch data for any stocks"));
}

#[test]
fn test_render_ranked_table() {
    let survivors: Vec<_> = (0..17)
        .map(|i| quality_profile(&format!("S{:02}", i), 0.5, 0.40 - i as f64 * 0.01))
        .collect();
    let outcome = ScreenOutcome::Completed(StrategyResult {
        strategy: StrategyKind::QualityInvesting,
        sort_key: StrategyKind::QualityInvesting.sort_key(),
        candidates: 20,
        survivors,
        missing_fields: Vec::new(),
    });

    let text = render_outcome(&quality(), &outcome);
    assert!(text.contains("Criteria: Debt to Equity < 1.5 and Return on Equity > 12%"));
    assert!(text.contains("Sorted by: ROE (descending)"));
    assert!(text.contains("Symbol"));
    assert!(text.contains("40.00%"));
    assert!(text.contains("S14"));
    assert!(!text.contains("S15"));
    assert!(text.contains("showing 15 of 17 matches"));
}

#[test]
fn test_render_twenty_matches_shows_fifteen_rows() {
    let survivors: Vec<_> = (0..20)
        .map(|i| quality_profile(&format!("R{:02}", i), 0.5, 0.45 - i as f64 * 0.01))
        .collect();
    let outcome = ScreenOutcome::Completed(StrategyResult {
        strategy: StrategyKind::QualityInvesting,
        sort_key: StrategyKind::QualityInvesting.sort_key(),
        candidates: 20,
        survivors,
        missing_fields: Vec::new(),
    });

    let text = render_outcome(&quality(), &outcome);
    let rows = text.lines().filter(|line| line.trim_start().starts_with('R')).count();
    assert_eq!(rows, 15);
    assert!(text.contains("R14"));
    assert!(!text.contains("R15"));
    assert!(text.contains("showing 15 of 20 matches"));
}

#[test]
fn test_render_raw_view_columns() {
    let profiles = vec![quality_profile("TCS", 0.1, 0.47)];
    let text = render_raw_view(StrategyKind::QualityInvesting, &profiles);
    let header = text.lines().next().unwrap();
    assert_eq!(header.split_whitespace().collect::<Vec<_>>(), vec!["Symbol", "Debt", "to", "Equity", "ROE"]);
    assert!(text.contains("47.00%"));
}

#[test]
fn test_render_history_tail_rows() {
    let history = annotate(Ticker::new("TCS.NS"), bars_from_closes(&rising_closes(60, 100.0)));
    let text = render_history_tail(&history, 5);
    // header, separator and five bars
    assert_eq!(text.lines().count(), 7);
    assert!(text.contains("159.00"));
    assert!(!text.contains("154.00"));
}
