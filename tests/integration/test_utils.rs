//! Wiremock stand-ins for the constituents list and Yahoo Finance

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LIST_PATH: &str = "/content/indices/list.csv";

/// 09:15 IST on 2024-01-02, in UTC seconds
const FIRST_SESSION: i64 = 1_704_167_100;
const DAY: i64 = 86_400;

pub fn rising_closes(count: usize, base: f64) -> Vec<f64> {
    (0..count).map(|i| base + i as f64).collect()
}

pub fn chart_payload(symbol: &str, closes: &[f64]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64).map(|i| FIRST_SESSION + i * DAY).collect();
    let volumes: Vec<f64> = closes.iter().map(|_| 100_000.0).collect();
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol, "gmtoffset": 19800 },
                "timestamp": timestamps,
                "indicators": { "quote": [{
                    "open": closes,
                    "high": closes,
                    "low": closes,
                    "close": closes,
                    "volume": volumes
                }]}
            }],
            "error": null
        }
    })
}

pub struct SummaryFixture {
    pub name: &'static str,
    pub price: f64,
    pub pe: f64,
    pub pb: f64,
    pub debt_to_equity: f64,
    pub roe: f64,
    pub revenue_growth: f64,
    pub market_cap: f64,
}

pub fn summary_payload(fixture: &SummaryFixture) -> Value {
    json!({
        "quoteSummary": {
            "result": [{
                "price": {
                    "longName": fixture.name,
                    "regularMarketPrice": { "raw": fixture.price },
                    "marketCap": { "raw": fixture.market_cap }
                },
                "summaryDetail": {
                    "trailingPE": { "raw": fixture.pe },
                    "fiftyTwoWeekHigh": { "raw": fixture.price * 1.1 },
                    "fiftyTwoWeekLow": { "raw": fixture.price * 0.8 }
                },
                "financialData": {
                    "currentPrice": { "raw": fixture.price },
                    "debtToEquity": { "raw": fixture.debt_to_equity },
                    "returnOnEquity": { "raw": fixture.roe },
                    "revenueGrowth": { "raw": fixture.revenue_growth }
                },
                "defaultKeyStatistics": {
                    "priceToBook": { "raw": fixture.pb }
                }
            }],
            "error": null
        }
    })
}

pub async fn mock_constituents(server: &MockServer, symbols: &[&str]) {
    let mut body = String::from("Company Name,Industry,Symbol,Series,ISIN Code\n");
    for symbol in symbols {
        body.push_str(&format!("{} Ltd.,Industry,{},EQ,INE000000000\n", symbol, symbol));
    }

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mock_constituents_unavailable(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}

pub async fn mock_chart(server: &MockServer, ticker: &str, closes: &[f64]) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", ticker)))
        .and(query_param("range", "1y"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_payload(ticker, closes)))
        .mount(server)
        .await;
}

pub async fn mock_summary(server: &MockServer, ticker: &str, fixture: &SummaryFixture) {
    Mock::given(method("GET"))
        .and(path(format!("/v10/finance/quoteSummary/{}", ticker)))
        .and(query_param(
            "modules",
            "price,summaryDetail,financialData,defaultKeyStatistics",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_payload(fixture)))
        .mount(server)
        .await;
}

pub fn tcs() -> SummaryFixture {
    SummaryFixture {
        name: "Tata Consultancy Services Limited",
        price: 319.0,
        pe: 29.4,
        pb: 14.2,
        debt_to_equity: 0.09,
        roe: 0.47,
        revenue_growth: 0.08,
        market_cap: 1.4e13,
    }
}

pub fn infy() -> SummaryFixture {
    SummaryFixture {
        name: "Infosys Limited",
        price: 319.0,
        pe: 24.1,
        pb: 7.6,
        debt_to_equity: 0.1,
        roe: 0.32,
        revenue_growth: 0.21,
        market_cap: 6.2e12,
    }
}
