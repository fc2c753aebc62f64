//! Yahoo Finance market data provider implementation

use crate::error::{Result, ScreenerError};
use crate::models::indicators::PriceBar;
use crate::models::profile::{Fundamentals, Ticker};
use crate::services::market_data::{MarketDataProvider, ProviderSnapshot};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use super::messages::{ChartEnvelope, QuoteSummaryEnvelope};

const SUMMARY_MODULES: &str = "price,summaryDetail,financialData,defaultKeyStatistics";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: Url,
    range: String,
    user_agent: String,
    cookie_url: Option<Url>,
    crumb: OnceCell<Option<String>>,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: &str, range: impl Into<String>, user_agent: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Self::with_client(client, base_url, range, user_agent)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        range: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ScreenerError::Config(format!(
                "market data URL '{}' cannot be used as a base",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            range: range.into(),
            user_agent: user_agent.into(),
            cookie_url: None,
            crumb: OnceCell::new(),
        })
    }

    /// Attach a crumb to quoteSummary requests, priming the session cookie from `cookie_url`.
    ///
    /// The client must keep cookies for the crumb to be honoured.
    pub fn with_crumb_from(mut self, cookie_url: &str) -> Result<Self> {
        self.cookie_url = Some(Url::parse(cookie_url)?);
        Ok(self)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and decode JSON; `Ok(None)` on 404
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        debug!(url = %url, "Requesting market data");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ScreenerError::InvalidResponse(format!("{}: {}", url, e)))
    }

    /// Crumb shared by every quoteSummary request; fetched once, `None` when unavailable
    async fn crumb(&self) -> Option<&str> {
        let cookie_url = self.cookie_url.as_ref()?;
        self.crumb
            .get_or_init(|| async {
                match self.request_crumb(cookie_url).await {
                    Ok(crumb) => {
                        info!("Obtained quoteSummary crumb");
                        Some(crumb)
                    }
                    Err(e) => {
                        warn!(error = %e, "No quoteSummary crumb, requesting without one");
                        None
                    }
                }
            })
            .await
            .as_deref()
    }

    async fn request_crumb(&self, cookie_url: &Url) -> Result<String> {
        // only the Set-Cookie matters here, the cookie host usually answers 404
        self.client
            .get(cookie_url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let url = self.endpoint(&["v1", "test", "getcrumb"]);
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains(char::is_whitespace) {
            return Err(ScreenerError::InvalidResponse(format!(
                "{}: unusable crumb",
                url
            )));
        }
        Ok(crumb)
    }

    /// Daily bars over the configured range
    pub async fn fetch_history(&self, ticker: &Ticker) -> Result<Option<Vec<PriceBar>>> {
        let mut url = self.endpoint(&["v8", "finance", "chart", ticker.as_str()]);
        url.query_pairs_mut()
            .append_pair("range", &self.range)
            .append_pair("interval", "1d");

        let Some(envelope) = self.get_json::<ChartEnvelope>(url).await? else {
            return Ok(None);
        };

        if let Some(error) = envelope.chart.error {
            debug!(
                ticker = %ticker,
                code = %error.code,
                description = error.description.as_deref().unwrap_or_default(),
                "Chart lookup returned an error"
            );
            return Ok(None);
        }

        Ok(envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_bars()))
    }

    pub async fn fetch_fundamentals(&self, ticker: &Ticker) -> Result<Option<Fundamentals>> {
        let mut url = self.endpoint(&["v10", "finance", "quoteSummary", ticker.as_str()]);
        url.query_pairs_mut().append_pair("modules", SUMMARY_MODULES);
        if let Some(crumb) = self.crumb().await {
            url.query_pairs_mut().append_pair("crumb", crumb);
        }

        let Some(envelope) = self.get_json::<QuoteSummaryEnvelope>(url).await? else {
            return Ok(None);
        };

        if let Some(error) = envelope.quote_summary.error {
            debug!(
                ticker = %ticker,
                code = %error.code,
                description = error.description.as_deref().unwrap_or_default(),
                "Summary lookup returned an error"
            );
            return Ok(None);
        }

        Ok(envelope
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .map(Fundamentals::from))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_profile(&self, ticker: &Ticker) -> Result<Option<ProviderSnapshot>> {
        let (history, fundamentals) =
            tokio::join!(self.fetch_history(ticker), self.fetch_fundamentals(ticker));

        match (history?, fundamentals?) {
            (Some(history), Some(fundamentals)) => Ok(Some(ProviderSnapshot {
                fundamentals,
                history,
            })),
            _ => Ok(None),
        }
    }
}
