//! NSE index constituents list (CSV) as a symbol source

use crate::error::{Result, ScreenerError};
use crate::models::profile::Ticker;
use crate::services::symbols::SymbolSource;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use tracing::debug;

const SYMBOL_COLUMN: &str = "Symbol";

pub struct NseSymbolSource {
    client: reqwest::Client,
    url: String,
    user_agent: String,
    suffix: String,
}

impl NseSymbolSource {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url, user_agent, suffix)
    }

    pub fn with_client(
        client: reqwest::Client,
        url: impl Into<String>,
        user_agent: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
            suffix: suffix.into(),
        }
    }
}

#[async_trait]
impl SymbolSource for NseSymbolSource {
    async fn fetch_universe(&self) -> Result<Vec<Ticker>> {
        debug!(url = %self.url, "Downloading constituents list");

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        parse_constituents(&body, &self.suffix)
    }
}

/// Read the `Symbol` column of a constituents CSV and qualify each symbol
pub fn parse_constituents(csv_text: &str, suffix: &str) -> Result<Vec<Ticker>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == SYMBOL_COLUMN)
        .ok_or_else(|| ScreenerError::MissingColumn(SYMBOL_COLUMN.to_string()))?;

    let mut tickers = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(symbol) if !symbol.is_empty() => tickers.push(Ticker::with_suffix(symbol, suffix)),
            _ => continue,
        }
    }

    Ok(tickers)
}
