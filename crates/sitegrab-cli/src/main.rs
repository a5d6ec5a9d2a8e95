use sitegrab_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stdout();
        tracing::warn!("file logging unavailable ({:#}); logging to stdout only", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("sitegrab error: {:#}", err);
        std::process::exit(1);
    }
}
