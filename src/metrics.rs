//! Prometheus metrics for screening runs and the HTTP layer.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub screening_runs_total: IntCounter,
    pub tickers_requested_total: IntCounter,
    pub profiles_built_total: IntCounter,
    pub profile_fetch_failures_total: IntCounter,
    pub screening_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let screening_runs_total =
            IntCounter::new("screening_runs_total", "Completed screening runs")?;
        let tickers_requested_total =
            IntCounter::new("tickers_requested_total", "Tickers requested from the data provider")?;
        let profiles_built_total =
            IntCounter::new("profiles_built_total", "Stock profiles successfully assembled")?;
        let profile_fetch_failures_total = IntCounter::new(
            "profile_fetch_failures_total",
            "Tickers dropped because no profile could be built",
        )?;
        let screening_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("screening_duration_seconds", "Wall time of a screening run")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;
        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(screening_runs_total.clone()))?;
        registry.register(Box::new(tickers_requested_total.clone()))?;
        registry.register(Box::new(profiles_built_total.clone()))?;
        registry.register(Box::new(profile_fetch_failures_total.clone()))?;
        registry.register(Box::new(screening_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            screening_runs_total,
            tickers_requested_total,
            profiles_built_total,
            profile_fetch_failures_total,
            screening_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
