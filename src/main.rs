//! Trolley interactive shopping cart

use std::{io, process::ExitCode};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trolley::{config::Config, menu::Menu, session::Session};

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            // Help and version requests also arrive here.
            let _printed = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let currency = match config.currency() {
        Ok(currency) => currency,
        Err(err) => {
            error!(%err, "invalid configuration");

            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::open(config.session_paths(), currency);

    info!(
        products = session.catalog().len(),
        cart_items = session.cart().len(),
        "session ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();

    match Menu::new(&mut session, stdin.lock(), stdout.lock()).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "menu stopped");

            ExitCode::FAILURE
        }
    }
}
