//! Strategy evaluation over the screened universe.

pub mod evaluator;

pub use evaluator::StrategyEvaluator;
