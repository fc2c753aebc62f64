//! Equiscreen command line screener
//!
//! Runs one strategy over the index universe and prints the ranked table.

use clap::Parser;
use dotenvy::dotenv;
use equiscreen::config::ScreenerConfig;
use equiscreen::core::bootstrap::build_runtime;
use equiscreen::core::runtime::{screen, CancellationToken, Progress};
use equiscreen::logging;
use equiscreen::models::profile::Ticker;
use equiscreen::models::strategy::{QualityParams, ScreenOutcome, Strategy, StrategyKind};
use equiscreen::report;
use equiscreen::strategies::StrategyEvaluator;
use std::io::Write;
use tokio::signal;
use tracing::info;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Screen index constituents with an investment strategy", long_about = None)]
struct Cli {
    /// Strategy to run (quality, growth, value, momentum)
    #[arg(short, long, default_value = "quality")]
    strategy: String,
    /// Quality only: maximum debt to equity (0-5)
    #[arg(long, default_value_t = 1.5)]
    max_de: f64,
    /// Quality only: minimum return on equity in percent (0-50)
    #[arg(long, default_value_t = 12.0)]
    min_roe: f64,
    /// Also print every candidate ranked by the sort key, unfiltered
    #[arg(long)]
    raw: bool,
    /// Print the recent price history with indicators for one symbol
    #[arg(long, value_name = "SYMBOL")]
    detail: Option<String>,
    /// Number of history rows shown with --detail
    #[arg(long, default_value_t = 10)]
    rows: usize,
}

impl Cli {
    fn strategy(&self) -> equiscreen::Result<Strategy> {
        let kind: StrategyKind = self.strategy.parse()?;
        match kind {
            StrategyKind::QualityInvesting => Ok(Strategy::QualityInvesting(
                QualityParams::from_percent(self.max_de, self.min_roe)?,
            )),
            other => Ok(Strategy::from_kind(other)),
        }
    }
}

fn print_progress(progress: &Progress) {
    eprint!(
        "\rAnalyzing {} ({}/{})...          ",
        progress.ticker, progress.completed, progress.total
    );
    let _ = std::io::stderr().flush();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let strategy = cli.strategy()?;
    let config = ScreenerConfig::from_env()?;
    let runtime = build_runtime(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let universe = runtime.universe().await;
    info!(
        strategy = %strategy.kind(),
        universe = universe.len(),
        "Fetching data for {} stocks",
        universe.len()
    );

    let profiles = runtime
        .collect_profiles(&universe, &cancel, print_progress)
        .await;
    eprintln!();

    let outcome = match &profiles {
        Some(profiles) => screen(profiles, &strategy),
        None => ScreenOutcome::Cancelled,
    };
    print!("{}", report::render_outcome(&strategy, &outcome));

    if cli.raw {
        if let Some(profiles) = &profiles {
            let kind = strategy.kind();
            println!();
            println!("Raw data sorted by {}", kind.sort_key());
            print!(
                "{}",
                report::render_raw_view(kind, &StrategyEvaluator::rank_all(profiles, kind))
            );
        }
    }

    if let Some(symbol) = &cli.detail {
        let ticker = Ticker::with_suffix(symbol, runtime.symbol_suffix());
        println!();
        match runtime.history(&ticker).await {
            Some(history) => {
                println!("Price history for {}", ticker);
                print!("{}", report::render_history_tail(&history, cli.rows));
            }
            None => eprintln!("No price history available for {}", ticker),
        }
    }

    Ok(())
}
