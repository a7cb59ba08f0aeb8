// Entrypoint for the CLI application.
// - Keeps `main` small: load config, open an authenticated client and hand
//   it to the menu loop.
// - Startup failures are printed to stderr and exit with status 1.

use okta_groups::api::OktaClient;
use okta_groups::config::Config;
use okta_groups::session_rng;
use okta_groups::ui::{main_menu, Console, LoopOptions};
use std::io::{self, IsTerminal};
use std::process;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    info!(org = %config.org_url, client_id = %config.client_id, "starting session");

    let mut api = OktaClient::connect(&config)?;
    let mut rng = session_rng(config.rng_seed);
    let options = LoopOptions {
        show_progress: io::stderr().is_terminal(),
        ..LoopOptions::default()
    };

    // Blocks until the operator types `exit`.
    main_menu(&mut api, &mut Console::stdio(), &mut rng, &options)?;
    Ok(())
}
