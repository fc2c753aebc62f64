//! Shared data models spanning the screening layers.

pub mod indicators;
pub mod profile;
pub mod strategy;

pub use indicators::{AnnotatedBar, ChartHistory, IndicatorSet, PriceBar};
pub use profile::{Fundamentals, ProfileField, StockProfile, Ticker};
pub use strategy::{
    DisplayColumn, QualityParams, ScreenOutcome, SortKey, SortOrder, Strategy, StrategyKind,
    StrategyResult, DISPLAY_LIMIT,
};
