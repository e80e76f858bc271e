use std::process::ExitCode;

use clap::Parser;
use l10n_tools::cli::{Arguments, ExitStatus, GlobalArgs};

fn init_tracing(global: &GlobalArgs) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if global.verbose {
        "debug"
    } else if global.quiet {
        "warn"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output (counts, entries); logs go to stderr
    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(&args.global);

    match l10n_tools::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
