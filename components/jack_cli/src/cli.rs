//! Command-line argument definitions.

use clap::Parser;

/// Jack-to-VM compiler command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "jackc",
    version,
    about = "Compiles Jack source files to VM commands"
)]
pub struct Cli {
    /// Jack source files, or a single directory containing .jack files
    pub inputs: Vec<String>,

    /// Print progress and symbol tables while compiling
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write a .xml syntax dump next to each input file
    #[arg(long)]
    pub xml: bool,

    /// Print VM commands to stdout instead of writing .vm files
    #[arg(long)]
    pub stdout: bool,
}
