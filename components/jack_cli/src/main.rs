//! Jack Compiler CLI
//!
//! Entry point for the compiler. Parses CLI arguments and delegates to the
//! Driver, which compiles each discovered input file to VM commands.

use clap::Parser as ClapParser;
use jack_cli::{Cli, CliError, Driver};

fn main() {
    let cli = Cli::parse();

    let driver = Driver::new()
        .with_verbose(cli.verbose)
        .with_xml(cli.xml)
        .with_stdout(cli.stdout);

    match driver.run(&cli.inputs) {
        Ok(()) => {}
        Err(CliError::UsageError(message)) => {
            eprintln!("{message}");
            eprintln!();
            eprintln!("Usage: jackc <FILE.jack>... [options]");
            eprintln!("       jackc <DIRECTORY> [options]");
            eprintln!();
            eprintln!("Run 'jackc --help' for all options.");
            std::process::exit(1);
        }
        Err(CliError::IoError(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(CliError::CompileError(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
