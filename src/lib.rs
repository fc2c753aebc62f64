//! Equity screener: ranks a stock universe against named investment strategies.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;
pub mod strategies;

pub use error::{Result, ScreenerError};
