use urlgrep_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init_logging();

    // Parse CLI and run the pipeline.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("urlgrep error: {:#}", err);
        std::process::exit(1);
    }
}
