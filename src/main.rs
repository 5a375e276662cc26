//! notebook-alert - fire notebook alerts from a shell
//!
//! Usage:
//!   notebook-alert done "Processed 1000 rows"
//!   notebook-alert error --label nightly
//!   notebook-alert test            # success alert, pause, error alert

mod cli;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::Result;
use notebook_alert::session::{DEFAULT_DONE_MESSAGE, DEFAULT_ERROR_MESSAGE};
use notebook_alert::{AlertConfig, AlertStatus, Session};
use tracing_appender::non_blocking::WorkerGuard;

/// Everything a subcommand needs once logging and config are up
struct Runtime {
    config_path: PathBuf,
    config: AlertConfig,
    session: Session,
    _guard: WorkerGuard,
}

impl Runtime {
    fn start(config_path: Option<PathBuf>, log_level: &str) -> Result<Self> {
        color_eyre::install()?;
        let guard = notebook_alert::logging::init(log_level, "notebook-alert.log")?;
        tracing::info!("Starting notebook-alert v{}", env!("CARGO_PKG_VERSION"));

        let config_path = config_path.unwrap_or_else(AlertConfig::default_path);
        let config = AlertConfig::load_from_path(config_path.clone());
        let session = Session::from_config(&config);
        Ok(Self {
            config_path,
            config,
            session,
            _guard: guard,
        })
    }

    /// Alert with an optional explicit label, then confirm on stdout
    fn send(&self, status: AlertStatus, message: &str, label: Option<&str>) {
        self.session.dispatcher().notify(status, message, label);
        let mark = if status.is_success() { "✓" } else { "✗" };
        println!("{mark} {message}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = || Runtime::start(cli.config.clone(), &cli.log_level);

    match cli.command {
        Commands::Completions { shell } => {
            cli::print_completions(shell);
            return Ok(());
        }
        Commands::Done { message, label } => {
            let message = message.as_deref().unwrap_or(DEFAULT_DONE_MESSAGE);
            start()?.send(AlertStatus::Success, message, label.as_deref());
        }
        Commands::Error { message, label } => {
            let message = message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE);
            start()?.send(AlertStatus::Error, message, label.as_deref());
        }
        Commands::Test { pause } => {
            let runtime = start()?;
            println!("Testing notebook alert system...");
            println!("\n1. Testing success alert...");
            runtime.session.done("Test success alert!");

            println!("\n2. Testing error alert in {pause} seconds...");
            std::thread::sleep(Duration::from_secs(pause));
            runtime.session.error("Test error alert!");

            println!("\nDone! Check for desktop alerts.");
        }
        Commands::Config { example } => {
            let runtime = start()?;
            if example {
                print!("{}", AlertConfig::example());
            } else {
                let state = if runtime.config_path.exists() { "found" } else { "not found, using defaults" };
                println!("Config: {} ({state})", runtime.config_path.display());
                println!("Truncate length: {}", runtime.config.truncate_len);
                println!("Popup timeout:   {} ms", runtime.config.notifier.timeout_ms);
            }
        }
    }

    Ok(())
}
