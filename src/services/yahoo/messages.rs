//! Response payloads of the Yahoo Finance chart and quoteSummary endpoints

use chrono::DateTime;
use serde::Deserialize;

use crate::models::indicators::PriceBar;
use crate::models::profile::Fundamentals;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Daily bars in ascending date order; rows without a close are skipped
    pub fn into_bars(self) -> Vec<PriceBar> {
        let offset = self.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

        let mut bars: Vec<PriceBar> = Vec::with_capacity(self.timestamp.len());
        for (i, ts) in self.timestamp.iter().enumerate() {
            let Some(close) = at(&quote.close, i).filter(|c| c.is_finite()) else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|d| d.date_naive())
            else {
                continue;
            };

            let bar = PriceBar::new(
                date,
                at(&quote.open, i).unwrap_or(close),
                at(&quote.high, i).unwrap_or(close),
                at(&quote.low, i).unwrap_or(close),
                close,
                at(&quote.volume, i).unwrap_or(0.0),
            );

            // a trailing live bar can repeat the last session's date
            match bars.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => bars.push(bar),
            }
        }

        bars.sort_by_key(|b| b.date);
        bars
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryBody {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Formatted number; Yahoo sends `{}` when a value is not reported
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub summary_detail: Option<SummaryDetailModule>,
    #[serde(default)]
    pub financial_data: Option<FinancialDataModule>,
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatisticsModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<RawValue>,
    #[serde(default)]
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetailModule {
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
    #[serde(default)]
    pub fifty_two_week_high: Option<RawValue>,
    #[serde(default)]
    pub fifty_two_week_low: Option<RawValue>,
    #[serde(default)]
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataModule {
    #[serde(default)]
    pub current_price: Option<RawValue>,
    #[serde(default)]
    pub debt_to_equity: Option<RawValue>,
    #[serde(default)]
    pub return_on_equity: Option<RawValue>,
    #[serde(default)]
    pub revenue_growth: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatisticsModule {
    #[serde(default)]
    pub price_to_book: Option<RawValue>,
}

impl From<QuoteSummaryResult> for Fundamentals {
    fn from(result: QuoteSummaryResult) -> Self {
        let price = result.price.unwrap_or_default();
        let summary = result.summary_detail.unwrap_or_default();
        let financial = result.financial_data.unwrap_or_default();
        let stats = result.default_key_statistics.unwrap_or_default();

        Fundamentals {
            long_name: price.long_name.or(price.short_name),
            current_price: raw(financial.current_price).or(raw(price.regular_market_price)),
            trailing_pe: raw(summary.trailing_pe),
            price_to_book: raw(stats.price_to_book),
            debt_to_equity: raw(financial.debt_to_equity),
            return_on_equity: raw(financial.return_on_equity),
            revenue_growth: raw(financial.revenue_growth),
            fifty_two_week_high: raw(summary.fifty_two_week_high),
            fifty_two_week_low: raw(summary.fifty_two_week_low),
            market_cap: raw(price.market_cap).or(raw(summary.market_cap)),
        }
    }
}
