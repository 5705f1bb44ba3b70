pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::currency::{self, Currency};
use crate::core::refresh::RefreshEngine;
use crate::providers::frankfurter::FrankfurterProvider;
use crate::providers::open_er::OpenErApiProvider;
use crate::store::FavoritesStore;
use anyhow::{Result, anyhow};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands the application can run, decoupled from the clap surface.
pub enum AppCommand {
    Convert {
        amount: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
    Live {
        from: Option<String>,
        to: Option<String>,
    },
    Currencies {
        query: Option<String>,
    },
    Favorite {
        code: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let engine = Arc::new(RefreshEngine::new(
        Arc::new(OpenErApiProvider::new(config.rates_base_url())),
        Arc::new(FrankfurterProvider::new(config.history_base_url())),
    ));

    match command {
        AppCommand::Convert { amount, from, to } => {
            let (from, to) = resolve_pair(&config, from.as_deref(), to.as_deref())?;
            cli::convert::run(&engine, amount.as_deref().unwrap_or("1"), from, to).await
        }
        AppCommand::Live { from, to } => {
            let (from, to) = resolve_pair(&config, from.as_deref(), to.as_deref())?;
            let store = FavoritesStore::open_default(&config)?;
            cli::live::run(engine, &store, "1", from, to).await
        }
        AppCommand::Currencies { query } => {
            let store = FavoritesStore::open_default(&config)?;
            cli::currencies::run(query.as_deref(), &store.load())
        }
        AppCommand::Favorite { code } => {
            let store = FavoritesStore::open_default(&config)?;
            cli::favorite::run(&store, &code)
        }
    }
}

/// Resolves the working pair: explicit arguments win, then the configured
/// pair, then timezone detection.
fn resolve_pair(
    config: &AppConfig,
    from_arg: Option<&str>,
    to_arg: Option<&str>,
) -> Result<(&'static Currency, &'static Currency)> {
    let (default_from, default_to) = match &config.pair {
        Some(pair) => (lookup(&pair.from)?, lookup(&pair.to)?),
        None => crate::core::locale::default_pair(),
    };
    let from = match from_arg {
        Some(code) => lookup(code)?,
        None => default_from,
    };
    let to = match to_arg {
        Some(code) => lookup(code)?,
        None => default_to,
    };
    Ok((from, to))
}

fn lookup(code: &str) -> Result<&'static Currency> {
    currency::find(code).ok_or_else(|| anyhow!("Unknown currency code: {}", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PairConfig;

    #[test]
    fn test_resolve_pair_prefers_arguments() {
        let config = AppConfig {
            pair: Some(PairConfig {
                from: "USD".to_string(),
                to: "IDR".to_string(),
            }),
            ..Default::default()
        };

        let (from, to) = resolve_pair(&config, Some("eur"), Some("jpy")).unwrap();
        assert_eq!(from.code, "EUR");
        assert_eq!(to.code, "JPY");
    }

    #[test]
    fn test_resolve_pair_uses_configured_pair() {
        let config = AppConfig {
            pair: Some(PairConfig {
                from: "GBP".to_string(),
                to: "SGD".to_string(),
            }),
            ..Default::default()
        };

        let (from, to) = resolve_pair(&config, None, None).unwrap();
        assert_eq!(from.code, "GBP");
        assert_eq!(to.code, "SGD");

        // partial override keeps the configured other side
        let (from, to) = resolve_pair(&config, None, Some("CHF")).unwrap();
        assert_eq!(from.code, "GBP");
        assert_eq!(to.code, "CHF");
    }

    #[test]
    fn test_resolve_pair_rejects_unknown_codes() {
        let config = AppConfig::default();
        assert!(resolve_pair(&config, Some("ZZZ"), None).is_err());

        let config = AppConfig {
            pair: Some(PairConfig {
                from: "NOPE".to_string(),
                to: "IDR".to_string(),
            }),
            ..Default::default()
        };
        assert!(resolve_pair(&config, None, None).is_err());
    }
}
