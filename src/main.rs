//! jsonpp CLI.
//!
//! Thin front end over the library: prints a demo document, canonicalizes
//! documents, and checks documents for well-formedness.

use clap::{Parser, Subcommand};
use jsonpp::{parse_slice, Json, Limits, ParseError, MAX_NESTING_DEPTH};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "jsonpp")]
#[command(about = "Parse, check and canonicalize JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Print a small document built from literals
    Demo,

    /// Print the canonical single-line form of a document
    Canon {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,

        /// Maximum array/object nesting depth
        #[arg(
            long,
            default_value_t = Limits::default().max_nesting_depth,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NESTING_DEPTH))
        )]
        max_depth: u32,
    },

    /// Check that a document is well-formed
    Check {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,

        /// Maximum array/object nesting depth
        #[arg(
            long,
            default_value_t = Limits::default().max_nesting_depth,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_NESTING_DEPTH))
        )]
        max_depth: u32,
    },
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut input = Vec::new();
            std::io::stdin().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

fn load(path: Option<&PathBuf>, max_depth: u32) -> Result<Json, ExitCode> {
    let input = read_input(path).map_err(|e| {
        eprintln!("error: {}", e);
        ExitCode::from(2)
    })?;
    parse_slice(&input, Limits::new(max_depth)).map_err(|e| {
        eprintln!("{}", report(&e));
        ExitCode::from(1)
    })
}

fn report(error: &ParseError) -> String {
    format!("{} at offset {}: {}", error.name(), error.offset(), error)
}

fn demo() -> Json {
    Json::object([
        ("key1", Json::from("value1")),
        ("key2", Json::from(false)),
        ("key3", Json::array([1, 2, 3])),
    ])
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo) => {
            println!("{}", demo().dump());
            ExitCode::SUCCESS
        }
        Some(Commands::Canon { path, max_depth }) => match load(path.as_ref(), max_depth) {
            Ok(value) => {
                println!("{}", value.dump());
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Some(Commands::Check { path, max_depth }) => match load(path.as_ref(), max_depth) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Some(Commands::Version) | None => {
            println!("jsonpp v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}
