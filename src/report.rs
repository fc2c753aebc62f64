//! Plain-text rendering of screening results for the terminal.

use crate::models::indicators::ChartHistory;
use crate::models::profile::{ProfileField, StockProfile};
use crate::models::strategy::{DisplayColumn, ScreenOutcome, Strategy, StrategyKind};

const NOT_AVAILABLE: &str = "N/A";
const CRORE: f64 = 1e7;

/// Market cap in crore rupees, e.g. `₹1,234.56 Cr`
pub fn format_market_cap(value: f64) -> String {
    format!("₹{} Cr", group_thousands(value / CRORE))
}

/// Fraction rendered as a percentage with two decimals
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

pub fn format_cell(profile: &StockProfile, column: DisplayColumn) -> String {
    match column {
        DisplayColumn::Symbol => profile.symbol.clone(),
        DisplayColumn::CompanyName => profile.company_name.clone(),
        DisplayColumn::Field(field @ (ProfileField::Roe | ProfileField::RevenueGrowth)) => {
            format_percent(field.value(profile))
        }
        DisplayColumn::Field(ProfileField::MarketCap) => format_market_cap(profile.market_cap),
        DisplayColumn::Field(field) => format_number(field.value(profile)),
    }
}

/// Left-aligned text table
pub fn render_table(columns: &[DisplayColumn], rows: &[StockProfile]) -> String {
    let headers: Vec<String> = columns.iter().map(|c| c.label().to_string()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| format_cell(row, *c)).collect())
        .collect();

    render_grid(&headers, &cells)
}

fn render_grid(headers: &[String], cells: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&separator));
    out.push('\n');
    for row in cells {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

/// Strategy banner: name, description, criteria and sort key
pub fn render_criteria(strategy: &Strategy) -> String {
    let kind = strategy.kind();
    format!(
        "{}: {}\n- Criteria: {}\n- Sorted by: {}\n",
        kind.name(),
        kind.description(),
        strategy.criteria(),
        kind.sort_key()
    )
}

pub fn render_outcome(strategy: &Strategy, outcome: &ScreenOutcome) -> String {
    let mut out = format!("Top Stocks based on {} Strategy\n\n", strategy.kind().name());
    out.push_str(&render_criteria(strategy));
    out.push('\n');

    if let Some(message) = outcome.message() {
        out.push_str(message);
        out.push('\n');
        return out;
    }

    if let Some(result) = outcome.result() {
        out.push_str(&render_table(result.strategy.display_columns(), result.top()));
        if result.len() > result.top().len() {
            out.push_str(&format!(
                "... showing {} of {} matches\n",
                result.top().len(),
                result.len()
            ));
        }
    }
    out
}

/// Unfiltered ranking used to pick realistic thresholds
pub fn render_raw_view(kind: StrategyKind, ranked: &[StockProfile]) -> String {
    render_table(kind.raw_columns(), ranked)
}

/// Last `rows` bars with their indicator values
pub fn render_history_tail(history: &ChartHistory, rows: usize) -> String {
    let headers: Vec<String> = ["Date", "Close", "Volume", "SMA_50", "SMA_200", "RSI"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let start = history.bars.len().saturating_sub(rows);
    let cells: Vec<Vec<String>> = history.bars[start..]
        .iter()
        .map(|b| {
            vec![
                b.bar.date.to_string(),
                format!("{:.2}", b.bar.close),
                format!("{:.0}", b.bar.volume),
                format_number(b.sma_50),
                format_number(b.sma_200),
                format_number(b.rsi),
            ]
        })
        .collect();

    render_grid(&headers, &cells)
}
