//! The alps compiler CLI.
//!
//! This binary provides the `alps build`, `alps ast`, and `alps tokens`
//! commands and delegates the compilation pipeline to the driver module.

use clap::{Parser, Subcommand};

mod diagnostics;
mod driver;
mod dump;

/// Command-line interface for the alps compiler.
#[derive(Parser)]
#[command(name = "alps")]
#[command(about = "The alps language compiler", long_about = None)]
struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Translate an alps source file into AArch64 assembly text.
    Build {
        /// The source file to compile (e.g., `hello.alps`).
        file: String,

        /// Output path for the assembly file (e.g., `-o hello.s`).
        /// If not specified, uses the input filename with a `.s` extension.
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// Parse a source file and print its parse tree.
    Ast {
        /// The source file to parse.
        file: String,
    },
    /// Lex a source file and print its token stream.
    Tokens {
        /// The source file to lex.
        file: String,
    },
}

/// Entry point for the alps compiler.
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { file, output } => driver::build(&file, output.as_deref()),
        Commands::Ast { file } => driver::dump_ast(&file),
        Commands::Tokens { file } => driver::dump_tokens(&file),
    };

    if let Err(error) = result {
        report_and_exit(*error);
    }
}

fn report_and_exit(error: driver::CompileErrorWithSources) -> ! {
    diagnostics::report_error(&error);
    std::process::exit(1);
}
