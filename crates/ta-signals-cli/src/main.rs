//! ta-signals CLI entry point.

use std::process::ExitCode;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ta_signals_cli::args::Args;
use ta_signals_cli::commands;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match commands::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
