//! Collaborators the screening core talks to, and the profile fetcher built on them.

pub mod market_data;
pub mod nse;
pub mod profile;
pub mod symbols;
pub mod yahoo;

pub use market_data::{MarketDataProvider, ProviderSnapshot};
pub use nse::NseSymbolSource;
pub use profile::{build_profile, StockProfileFetcher};
pub use symbols::{resolve_universe, StaticSymbolSource, SymbolSource};
pub use yahoo::YahooMarketDataProvider;
