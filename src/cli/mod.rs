use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod parse;
mod verify;

/// Environment variable holding an `EnvFilter` directive for log output.
const LOG_ENV: &str = "PLUGDEPS_LOG";

#[derive(Parser)]
#[command(
    name = "plugdeps",
    version,
    about = "Plugin identity validator and dependency conflict checker"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Validate `name:version` plugin strings
    Parse {
        /// Plugins in `name:version` form
        #[arg(required = true)]
        plugins: Vec<String>,
        /// Download URL to attach to every plugin
        #[arg(long)]
        url: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check dependency manifests for conflicting plugin versions
    Verify {
        /// Manifest files (YAML or JSON), each one dependency declaration
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

pub fn run(cli: Cli) {
    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Parse {
            plugins,
            url,
            format,
        }) => parse::run(plugins, url, format),
        Some(Commands::Verify { manifests, format }) => verify::run(manifests, format),
        None => {
            eprintln!("Usage: plugdeps <command> [args]");
            eprintln!("Run `plugdeps --help` for details.");
            std::process::exit(1);
        }
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `PLUGDEPS_LOG` wins over `-v` when set to a valid filter.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_about() {
    println!(
        "plugdeps: Plugin Dependency Checker\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}

/// Print a value as pretty JSON on stdout, exiting on serialization failure.
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("plugdeps: cannot serialize output: {e}");
            std::process::exit(1);
        }
    }
}
