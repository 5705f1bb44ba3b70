//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod currency;
pub mod debounce;
pub mod locale;
pub mod log;
pub mod rates;
pub mod refresh;
pub mod trend;

// Re-export main types for cleaner imports
pub use converter::{Converter, RefreshRequest, Side};
pub use rates::{HistoryPoint, HistoryProvider, LatestRateProvider, LatestRates, MarketSummary};
pub use refresh::{CONNECTIVITY_ERROR, RefreshEngine, RefreshOutcome};
