//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Desktop alerts when a notebook cell finishes or fails
#[derive(Parser, Debug)]
#[command(name = "notebook-alert")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/notebook-alert/config.toml)
    #[arg(short, long, env = "NOTEBOOK_ALERT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a success alert
    Done {
        /// Alert text (default: "Notebook completed successfully!")
        message: Option<String>,

        /// Label shown above the message (default: detected notebook name)
        #[arg(long)]
        label: Option<String>,
    },

    /// Show an error alert
    Error {
        /// Alert text (default: "Notebook encountered an error!")
        message: Option<String>,

        /// Label shown above the message (default: detected notebook name)
        #[arg(long)]
        label: Option<String>,
    },

    /// Fire a success alert, pause, then fire an error alert
    Test {
        /// Seconds between the two alerts
        #[arg(long, default_value_t = 3)]
        pause: u64,
    },

    /// Show the config file location, or an example config
    Config {
        /// Print a commented example config
        #[arg(long, default_value_t = false)]
        example: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "notebook-alert", &mut io::stdout());
}
