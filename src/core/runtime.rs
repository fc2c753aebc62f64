//! Screening runtime: universe -> per-ticker profiles -> strategy evaluation

use crate::config::{ScreenerConfig, DEFAULT_FETCH_CONCURRENCY, FALLBACK_SYMBOLS};
use crate::metrics::Metrics;
use crate::models::indicators::ChartHistory;
use crate::models::profile::{StockProfile, Ticker};
use crate::models::strategy::{ScreenOutcome, Strategy};
use crate::services::profile::StockProfileFetcher;
use crate::services::symbols::{resolve_universe, SymbolSource};
use crate::strategies::StrategyEvaluator;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Cooperative cancellation shared between a caller and a running screen
pub use tokio_util::sync::CancellationToken;

/// Configuration for the screening runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Maximum number of tickers fetched at the same time
    pub concurrency: usize,
    pub fallback_symbols: Vec<Ticker>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_FETCH_CONCURRENCY,
            fallback_symbols: FALLBACK_SYMBOLS.iter().map(|s| Ticker::new(*s)).collect(),
        }
    }
}

impl From<&ScreenerConfig> for RuntimeConfig {
    fn from(config: &ScreenerConfig) -> Self {
        Self {
            concurrency: config.fetch_concurrency.max(1),
            fallback_symbols: config
                .fallback_symbols
                .iter()
                .map(|s| Ticker::with_suffix(s, &config.symbol_suffix))
                .collect(),
        }
    }
}

/// Fetch progress, reported after each ticker completes
#[derive(Debug, Clone)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub ticker: Ticker,
}

/// Evaluate `strategy` over an already collected profile set.
///
/// An empty set means no data was available at all, which is reported
/// separately from a run where nothing passed the filter.
pub fn screen(profiles: &[StockProfile], strategy: &Strategy) -> ScreenOutcome {
    if profiles.is_empty() {
        return ScreenOutcome::NoData;
    }
    ScreenOutcome::Completed(StrategyEvaluator::evaluate(profiles, strategy))
}

pub struct ScreeningRuntime {
    config: RuntimeConfig,
    symbol_source: Arc<dyn SymbolSource + Send + Sync>,
    fetcher: StockProfileFetcher,
    metrics: Option<Arc<Metrics>>,
}

impl ScreeningRuntime {
    pub fn new(
        config: RuntimeConfig,
        symbol_source: Arc<dyn SymbolSource + Send + Sync>,
        fetcher: StockProfileFetcher,
    ) -> Self {
        Self {
            config,
            symbol_source,
            fetcher,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn symbol_suffix(&self) -> &str {
        self.fetcher.symbol_suffix()
    }

    /// Universe for this run (live list or fallback)
    pub async fn universe(&self) -> Vec<Ticker> {
        resolve_universe(self.symbol_source.as_ref(), &self.config.fallback_symbols).await
    }

    /// Build a profile for every ticker of `universe`, in universe order.
    ///
    /// Tickers without a profile are left out. Returns `None` when the run
    /// is cancelled; profiles gathered up to that point are discarded.
    pub async fn collect_profiles<F>(
        &self,
        universe: &[Ticker],
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Option<Vec<StockProfile>>
    where
        F: FnMut(&Progress),
    {
        if cancel.is_cancelled() {
            return None;
        }

        let total = universe.len();
        if let Some(metrics) = &self.metrics {
            metrics.tickers_requested_total.inc_by(total as u64);
        }

        let fetcher = &self.fetcher;
        let mut fetches = stream::iter(universe.iter().cloned())
            .map(|ticker| async move {
                let fetched = fetcher.fetch(&ticker).await;
                (ticker, fetched)
            })
            .buffered(self.config.concurrency.max(1));

        let mut profiles = Vec::with_capacity(total);
        let mut completed = 0;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(completed, total, "Screening cancelled after {} of {} tickers", completed, total);
                    return None;
                }
                next = fetches.next() => next,
            };
            let Some((ticker, fetched)) = next else {
                break;
            };

            completed += 1;
            match fetched {
                Some((profile, _)) => {
                    if let Some(metrics) = &self.metrics {
                        metrics.profiles_built_total.inc();
                    }
                    profiles.push(profile);
                }
                None => {
                    if let Some(metrics) = &self.metrics {
                        metrics.profile_fetch_failures_total.inc();
                    }
                }
            }

            debug!(ticker = %ticker, completed, total, "Analyzed {}", ticker);
            on_progress(&Progress {
                completed,
                total,
                ticker,
            });
        }

        Some(profiles)
    }

    /// Run a full screen for `strategy`
    pub async fn run(&self, strategy: &Strategy, cancel: &CancellationToken) -> ScreenOutcome {
        self.run_with_progress(strategy, cancel, |_| {}).await
    }

    pub async fn run_with_progress<F>(
        &self,
        strategy: &Strategy,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> ScreenOutcome
    where
        F: FnMut(&Progress),
    {
        let started = Instant::now();
        let universe = self.universe().await;
        info!(
            strategy = %strategy.kind(),
            universe = universe.len(),
            "Screening {} tickers for {}",
            universe.len(),
            strategy.kind()
        );

        let Some(profiles) = self.collect_profiles(&universe, cancel, on_progress).await else {
            return ScreenOutcome::Cancelled;
        };

        let outcome = screen(&profiles, strategy);

        if let Some(metrics) = &self.metrics {
            metrics.screening_runs_total.inc();
            metrics
                .screening_duration_seconds
                .observe(started.elapsed().as_secs_f64());
        }

        info!(
            strategy = %strategy.kind(),
            candidates = profiles.len(),
            status = outcome.status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Screening finished"
        );

        outcome
    }

    /// Full annotated history of one ticker, for charting
    pub async fn history(&self, ticker: &Ticker) -> Option<ChartHistory> {
        self.fetcher.fetch(ticker).await.map(|(_, history)| history)
    }
}
