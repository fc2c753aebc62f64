//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::core::runtime::{CancellationToken, ScreeningRuntime};
use crate::error::ScreenerError;
use crate::metrics::Metrics;
use crate::models::indicators::ChartHistory;
use crate::models::profile::{StockProfile, Ticker};
use crate::models::strategy::{QualityParams, ScreenOutcome, Strategy, StrategyKind};
use crate::strategies::StrategyEvaluator;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub runtime: Arc<ScreeningRuntime>,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "equiscreen"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Serialize)]
struct StrategyInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    criteria: String,
    sort_by: String,
}

impl From<StrategyKind> for StrategyInfo {
    fn from(kind: StrategyKind) -> Self {
        Self {
            id: kind.id(),
            name: kind.name(),
            description: kind.description(),
            criteria: Strategy::from_kind(kind).criteria(),
            sort_by: kind.sort_key().to_string(),
        }
    }
}

/// List the available strategies
async fn list_strategies() -> Json<Vec<StrategyInfo>> {
    Json(StrategyKind::ALL.into_iter().map(StrategyInfo::from).collect())
}

#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    strategy: String,
    /// Quality only: maximum debt to equity
    max_de: Option<f64>,
    /// Quality only: minimum ROE as a whole percent
    min_roe: Option<f64>,
}

impl ScreenQuery {
    fn strategy(&self) -> Result<Strategy, ScreenerError> {
        let kind: StrategyKind = self.strategy.parse()?;
        match kind {
            StrategyKind::QualityInvesting => {
                let defaults = QualityParams::default();
                let params = QualityParams::from_percent(
                    self.max_de.unwrap_or(defaults.max_debt_to_equity),
                    self.min_roe.unwrap_or(defaults.min_roe * 100.0),
                )?;
                Ok(Strategy::QualityInvesting(params))
            }
            other => Ok(Strategy::from_kind(other)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScreenResponse {
    status: &'static str,
    strategy: &'static str,
    criteria: String,
    sort_by: String,
    candidates: usize,
    total_matches: usize,
    stocks: Vec<StockProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

fn bad_request(error: ScreenerError) -> (StatusCode, Json<Value>) {
    warn!(error = %error, "Rejected screen request");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": error.to_string() })),
    )
}

/// Run a screen and return the top-ranked survivors
async fn run_screen(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Json<ScreenResponse>, (StatusCode, Json<Value>)> {
    let strategy = query.strategy().map_err(bad_request)?;
    let kind = strategy.kind();

    let outcome = state
        .runtime
        .run(&strategy, &CancellationToken::new())
        .await;

    let (candidates, total_matches, stocks) = match &outcome {
        ScreenOutcome::Completed(result) => {
            (result.candidates, result.len(), result.top().to_vec())
        }
        _ => (0, 0, Vec::new()),
    };

    Ok(Json(ScreenResponse {
        status: outcome.status(),
        strategy: kind.id(),
        criteria: strategy.criteria(),
        sort_by: kind.sort_key().to_string(),
        candidates,
        total_matches,
        stocks,
        message: outcome.message(),
    }))
}

/// Every candidate ranked by the strategy's sort key, unfiltered
async fn raw_screen(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Json<Vec<StockProfile>>, (StatusCode, Json<Value>)> {
    let kind = query.strategy().map_err(bad_request)?.kind();

    let universe = state.runtime.universe().await;
    let profiles = state
        .runtime
        .collect_profiles(&universe, &CancellationToken::new(), |_| {})
        .await
        .unwrap_or_default();

    Ok(Json(StrategyEvaluator::rank_all(&profiles, kind)))
}

/// Full price history with indicators for one symbol
async fn stock_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ChartHistory>, StatusCode> {
    let ticker = Ticker::with_suffix(&symbol, state.runtime.symbol_suffix());
    state
        .runtime
        .history(&ticker)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/strategies", get(list_strategies))
        .route("/api/screen", get(run_screen))
        .route("/api/screen/raw", get(raw_screen))
        .route("/api/stocks/{symbol}/history", get(stock_history))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    runtime: Arc<ScreeningRuntime>,
    metrics: Arc<Metrics>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        runtime,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
