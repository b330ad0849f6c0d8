use clap::Parser;
use plsync_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("plsync: {:#}", err);
    }

    if let Err(err) = cli.run() {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}
