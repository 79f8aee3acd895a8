use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tutorweave::{cli, ui::output};

fn main() -> ExitCode {
    let debug = std::env::args().any(|arg| arg == "--debug");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
