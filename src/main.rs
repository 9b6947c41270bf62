use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use locale_sync::cli::{self, Cli};
use locale_sync::services::http::ReqwestTransport;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = cli.settings();
    let result = ReqwestTransport::new(settings.timeout)
        .and_then(|transport| cli::handle(&cli.command, &settings, &transport));

    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("!!! {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
