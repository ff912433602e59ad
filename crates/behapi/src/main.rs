//! behapi - Entry Point
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `behapi check` | validate the configuration and list the composed services |

use std::path::PathBuf;
use std::process::ExitCode;

use behapi::infrastructure::config::LoggingConfig;
use behapi::infrastructure::logging::init_logging;
use clap::{Parser, Subcommand};

/// Command line interface for behapi
#[derive(Parser, Debug)]
#[command(name = "behapi")]
#[command(about = "behapi - service composition for BDD API suites")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration and print the composed services
    Check {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not wire the templating services even when available
        #[arg(long)]
        without_templating: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: cli.log_level,
        ..LoggingConfig::default()
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Check {
            config,
            without_templating,
        } => match behapi::check(config.as_deref(), !without_templating) {
            Ok(summary) => {
                println!("Services:");
                for id in &summary.services {
                    println!("  {id}");
                }
                println!("Context initializers:");
                for (position, id) in summary.initializers.iter().enumerate() {
                    println!("  {}. {id}", position + 1);
                }
                println!(
                    "Templating: {}",
                    if summary.templating { "wired" } else { "not wired" }
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                for violation in e.violations() {
                    eprintln!("  - {violation}");
                }
                ExitCode::FAILURE
            }
        },
    }
}
