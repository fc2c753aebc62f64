//! Integration tests for the constituents list and Yahoo Finance clients

use crate::test_utils::{
    infy, mock_chart, mock_constituents, mock_constituents_unavailable,
    mock_summary, rising_closes, summary_payload, tcs, LIST_PATH,
};
use equiscreen::error::ScreenerError;
use equiscreen::models::profile::Ticker;
use equiscreen::services::market_data::MarketDataProvider;
use equiscreen::services::nse::NseSymbolSource;
use equiscreen::services::symbols::SymbolSource;
use equiscreen::services::yahoo::YahooMarketDataProvider;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "equiscreen-tests/1.0";

fn provider(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::new(&server.uri(), "1y", USER_AGENT).expect("valid base url")
}

#[tokio::test]
async fn constituents_are_qualified_with_suffix() {
    let server = MockServer::start().await;
    mock_constituents(&server, &["RELIANCE", "TCS"]).await;

    let source = NseSymbolSource::new(format!("{}{}", server.uri(), LIST_PATH), USER_AGENT, ".NS");
    let tickers = source.fetch_universe().await.expect("universe");

    assert_eq!(tickers, vec![Ticker::new("RELIANCE.NS"), Ticker::new("TCS.NS")]);
}

#[tokio::test]
async fn constituents_request_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("Symbol\nITC\n"))
        .expect(1)
        .mount(&server)
        .await;

    let source = NseSymbolSource::new(format!("{}{}", server.uri(), LIST_PATH), USER_AGENT, ".NS");
    let tickers = source.fetch_universe().await.expect("universe");
    assert_eq!(tickers, vec![Ticker::new("ITC.NS")]);
}

#[tokio::test]
async fn constituents_http_failure_is_an_error() {
    let server = MockServer::start().await;
    mock_constituents_unavailable(&server).await;

    let source = NseSymbolSource::new(format!("{}{}", server.uri(), LIST_PATH), USER_AGENT, ".NS");
    let err = source.fetch_universe().await.unwrap_err();
    assert!(matches!(err, ScreenerError::Status { status: 503, .. }));
}

#[tokio::test]
async fn history_is_decoded_in_date_order() {
    let server = MockServer::start().await;
    mock_chart(&server, "TCS.NS", &rising_closes(30, 100.0)).await;

    let bars = provider(&server)
        .fetch_history(&Ticker::new("TCS.NS"))
        .await
        .expect("request succeeds")
        .expect("ticker known");

    assert_eq!(bars.len(), 30);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(bars[29].close, 129.0);
}

#[tokio::test]
async fn profile_combines_history_and_fundamentals() {
    let server = MockServer::start().await;
    mock_chart(&server, "INFY.NS", &rising_closes(30, 100.0)).await;
    mock_summary(&server, "INFY.NS", &infy()).await;

    let snapshot = provider(&server)
        .fetch_profile(&Ticker::new("INFY.NS"))
        .await
        .expect("request succeeds")
        .expect("ticker known");

    assert_eq!(snapshot.history.len(), 30);
    assert_eq!(snapshot.fundamentals.long_name.as_deref(), Some("Infosys Limited"));
    assert_eq!(snapshot.fundamentals.return_on_equity, Some(0.32));
}

#[tokio::test]
async fn unknown_ticker_is_not_found() {
    let server = MockServer::start().await;
    mock_summary(&server, "TCS.NS", &tcs()).await;

    // chart endpoint is not mocked and answers 404
    let snapshot = provider(&server)
        .fetch_profile(&Ticker::new("TCS.NS"))
        .await
        .expect("404 is not an error");
    assert!(snapshot.is_none());
}

#[tokio::test]
async fn chart_error_body_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "chart": { "result": null, "error": { "code": "Not Found", "description": "delisted" } }
        })))
        .mount(&server)
        .await;

    let history = provider(&server)
        .fetch_history(&Ticker::new("GONE.NS"))
        .await
        .expect("request succeeds");
    assert!(history.is_none());
}

#[tokio::test]
async fn server_error_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mock_summary(&server, "TCS.NS", &tcs()).await;

    let err = provider(&server)
        .fetch_profile(&Ticker::new("TCS.NS"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenerError::Status { status: 500, .. }));
}

#[tokio::test]
async fn malformed_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_history(&Ticker::new("TCS.NS"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenerError::InvalidResponse(_)));
}

async fn mock_cookie_host(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/cookie"))
        .respond_with(ResponseTemplate::new(404).insert_header("set-cookie", "A3=session; Path=/"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn summary_requests_carry_the_crumb() {
    let server = MockServer::start().await;
    mock_cookie_host(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("abc"))
        .expect(1)
        .mount(&server)
        .await;
    for (ticker, fixture) in [("TCS.NS", tcs()), ("INFY.NS", infy())] {
        Mock::given(method("GET"))
            .and(path(format!("/v10/finance/quoteSummary/{}", ticker)))
            .and(query_param("crumb", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(summary_payload(&fixture)))
            .mount(&server)
            .await;
    }

    let provider = provider(&server)
        .with_crumb_from(&format!("{}/cookie", server.uri()))
        .expect("valid cookie url");

    // crumb is fetched once and reused
    for ticker in ["TCS.NS", "INFY.NS"] {
        let fundamentals = provider
            .fetch_fundamentals(&Ticker::new(ticker))
            .await
            .expect("request succeeds");
        assert!(fundamentals.is_some(), "{} should carry the crumb", ticker);
    }
}

#[tokio::test]
async fn missing_crumb_falls_back_to_plain_requests() {
    let server = MockServer::start().await;
    mock_cookie_host(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .and(query_param_is_missing("crumb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_payload(&tcs())))
        .mount(&server)
        .await;

    let fundamentals = provider(&server)
        .with_crumb_from(&format!("{}/cookie", server.uri()))
        .expect("valid cookie url")
        .fetch_fundamentals(&Ticker::new("TCS.NS"))
        .await
        .expect("request succeeds");
    assert!(fundamentals.is_some());
}
