//! The heliumt command-line interface.
//!
//! Parses arguments, runs the suite, and maps the outcome onto the process
//! exit contract: 0 when every discovered test passed (including the empty
//! suite), 1 when at least one test failed, 2 when the run itself could not
//! start (missing compiler, unreadable test directory).

use clap::Parser;
use std::process;

pub mod args;
pub mod output;

use crate::cli::args::HeliumtArgs;
use crate::cli::output::Reporter;
use crate::suite;

/// The main entry point for the CLI. Never returns.
pub fn run() -> ! {
    let config = HeliumtArgs::parse().into_config();
    let mut reporter = Reporter::new(config.use_colors);

    match suite::run_suite(&config, &mut reporter) {
        Ok(tally) if tally.all_passed() => process::exit(0),
        Ok(_) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    }
}
