//! Configuration

use std::path::PathBuf;

use clap::Parser;
use rusty_money::iso::Currency;

use crate::{
    pricing::{PriceError, parse_currency},
    session::SessionPaths,
};

/// Trolley shopping cart configuration
#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Interactive shopping cart", long_about = None)]
pub struct Config {
    /// Catalog file (`.json`, `.yml` or `.yaml`)
    #[arg(long, env = "TROLLEY_CATALOG", default_value = "products.json")]
    pub catalog: PathBuf,

    /// Cart file (`.json`, `.yml` or `.yaml`)
    #[arg(long, env = "TROLLEY_CART", default_value = "cart.json")]
    pub cart: PathBuf,

    /// Currency catalog prices are expressed in (INR, GBP, USD or EUR)
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "INR")]
    pub currency: String,

    /// Save catalog stock after every cart change
    #[arg(long, env = "TROLLEY_PERSIST_CATALOG")]
    pub persist_catalog: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] if the code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, PriceError> {
        parse_currency(&self.currency)
    }

    /// File locations for a session.
    pub fn session_paths(&self) -> SessionPaths {
        SessionPaths {
            catalog: self.catalog.clone(),
            cart: self.cart.clone(),
            persist_catalog: self.persist_catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_use_json_files_in_working_directory() -> TestResult {
        let config = Config::try_parse_from(["trolley"])?;

        assert_eq!(config.catalog, PathBuf::from("products.json"));
        assert_eq!(config.cart, PathBuf::from("cart.json"));
        assert!(!config.persist_catalog, "catalog persistence is opt-in");

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = Config::try_parse_from([
            "trolley",
            "--catalog",
            "shop/products.yml",
            "--cart",
            "shop/cart.yml",
            "--currency",
            "gbp",
            "--persist-catalog",
        ])?;

        let paths = config.session_paths();

        assert_eq!(paths.catalog, PathBuf::from("shop/products.yml"));
        assert_eq!(paths.cart, PathBuf::from("shop/cart.yml"));
        assert!(paths.persist_catalog, "flag should enable persistence");
        assert_eq!(config.currency()?, GBP);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() -> TestResult {
        let config = Config::try_parse_from(["trolley", "--currency", "XYZ"])?;

        assert!(matches!(
            config.currency(),
            Err(PriceError::UnknownCurrency(_))
        ));

        Ok(())
    }
}
