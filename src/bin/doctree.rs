//! Doctree CLI Binary
//!
//! Command-line interface for browsing document exports as trees.

use clap::Parser;
use doctree::logging::{init_logging, LogOverrides};
use doctree::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let overrides = LogOverrides {
        level: cli.log_level.clone(),
        format: cli.log_format.clone(),
        output: cli.log_output.clone(),
        file: cli.log_file.clone(),
    };
    if let Err(e) = init_logging(Some(&context.config().logging), &overrides) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            print!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
