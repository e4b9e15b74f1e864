use nasafetch_core::logging;

mod cli;

use crate::cli::{error_message, exit_code, Cli};

fn main() {
    // Initialize logging as early as possible; never let it stop the fetch.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("{}", error_message(&err));
        std::process::exit(exit_code(&err));
    }
}
