mod commands;
mod reader;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::build::{run_build, BuildArgs};
use commands::validate::{run_validate, ValidateArgs};

#[derive(Parser)]
#[command(
    name = "lexicon",
    version,
    about = "Lexicon builder — aggregate POS-tagged corpora into frequency lexicons"
)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a lexicon from corpus JSON files
    Build {
        /// Input path (corpus file or directory of .json files)
        path: PathBuf,

        /// Write the lexicon to this file instead of stdout (.json is appended if missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Aggregation mode: compat (default) or homographs
        #[arg(long)]
        mode: Option<String>,

        /// Coarse POS tag to leave out (repeatable, defaults to NUM and PUNCT)
        #[arg(long = "exclude-pos")]
        exclude_pos: Vec<String>,

        /// Project config file (defaults to lexicon.config.yaml in the input directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate corpus files against the input schema
    Validate {
        /// Input path (corpus file or directory of .json files)
        path: PathBuf,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,

        /// Coarse POS tag whose feature strings are not checked (repeatable)
        #[arg(long = "exclude-pos")]
        exclude_pos: Vec<String>,

        /// Project config file (defaults to lexicon.config.yaml in the input directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize a previously built lexicon
    Stats {
        /// Lexicon JSON file
        path: PathBuf,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,

        /// Number of most frequent entries to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Build {
            path,
            output,
            mode,
            exclude_pos,
            config,
        } => {
            let args = BuildArgs {
                path: &path,
                output: output.as_deref(),
                mode: mode.as_deref(),
                exclude_pos: &exclude_pos,
                config: config.as_deref(),
            };
            match run_build(&args) {
                Ok(output) => {
                    println!("{output}");
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Validate {
            path,
            format,
            exclude_pos,
            config,
        } => {
            let args = ValidateArgs {
                path: &path,
                format: &format,
                exclude_pos: &exclude_pos,
                config: config.as_deref(),
            };
            match run_validate(&args) {
                Ok((output, error_count)) => {
                    println!("{output}");
                    if error_count > 0 {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Stats { path, format, top } => {
            match commands::stats::run_stats(&path, &format, top) {
                Ok(output) => {
                    println!("{output}");
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
