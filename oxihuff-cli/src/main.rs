//! OxiHuff CLI - The Oxidized Huffman Coder
//!
//! A Pure Rust Huffman compressor with embedded (`.huff`) and textual
//! (`.code` + `.short`) output formats.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{OutputFormat, cmd_codes, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "The Oxidized Huffman Coder - Pure Rust Huffman compression")]
#[command(long_about = "
OxiHuff compresses files with static Huffman coding.

Formats:
  embedded  one .huff file: 32-bit symbol count, tree, payload
  textual   a .code file of symbol/code line pairs plus a .short payload

Examples:
  oxihuff compress notes.txt
  oxihuff compress --format textual notes.txt
  oxihuff decompress notes.huff
  oxihuff decompress notes.code
  oxihuff codes notes.txt
  oxihuff info notes.huff --json
  oxihuff test notes.huff notes.code
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "embedded")]
        format: OutputFormat,

        /// Output directory (next to each input if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress .huff files or .code/.short pairs
    #[command(alias = "d")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (next to each input if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Print the code table for a file
    Codes {
        /// File to analyze
        file: PathBuf,

        /// Code table variant
        #[arg(short, long, value_enum, default_value = "embedded")]
        format: OutputFormat,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show information about a .huff file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Test that compressed files decode
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Log level for a `-v` count.
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let verbose = cli.verbose > 0;
    let result = match cli.command {
        Commands::Compress {
            files,
            format,
            output,
            progress,
        } => cmd_compress(&files, format, output.as_deref(), verbose, progress),
        Commands::Decompress {
            files,
            output,
            progress,
        } => cmd_decompress(&files, output.as_deref(), verbose, progress),
        Commands::Codes { file, format, json } => cmd_codes(&file, format, json),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { files } => cmd_test(&files, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
