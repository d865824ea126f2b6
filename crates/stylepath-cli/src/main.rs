#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use stylepath_core::config::load_include_paths;
use stylepath_core::Config;

#[derive(Parser, Debug)]
#[command(name = "stylepath")]
#[command(author, version, about = "Resolve stylesheet imports against include paths", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve an @use/@import specifier to a file URL
    Resolve {
        /// The specifier, e.g. "pkg/config" or "@scope/pkg/mixins"
        specifier: String,

        /// Include path to search (repeatable, searched in order)
        #[arg(
            short = 'I',
            long = "include-path",
            value_name = "DIR",
            env = "STYLEPATH_INCLUDE_PATHS",
            value_delimiter = ','
        )]
        include_paths: Vec<PathBuf>,

        /// Config file with "includePaths" (default: nearest stylepath.json)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Show how each include path was searched
        #[arg(long)]
        explain: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(cli.json),
        Some(Commands::Resolve {
            specifier,
            include_paths,
            config: config_file,
            explain,
        }) => {
            let include_paths = load_include_paths(include_paths, config_file.as_deref(), &cwd)
                .into_diagnostic()?;
            let config = config.with_include_paths(include_paths);
            commands::resolve::run(&config, &specifier, explain, cli.json)
        }
    }
}
