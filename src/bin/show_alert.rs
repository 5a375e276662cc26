//! notebook-alert-show - the alert popup process
//!
//! Launched detached by the dispatcher; not meant to be run by hand.
//!
//! Usage:
//!   notebook-alert-show <success|error> -- [message] [label]
//!
//! Exits once the popup is dismissed or times out.

use clap::Parser;
use color_eyre::Result;
use notebook_alert::notifier::{AlertView, NotifierArgs};
use notebook_alert::AlertConfig;

fn main() -> Result<()> {
    let request = NotifierArgs::parse().into_request();

    color_eyre::install()?;
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _guard = notebook_alert::logging::init(&log_level, "notebook-alert-show.log")?;

    let config = AlertConfig::load();
    let view = AlertView::build(&request, &config.notifier, chrono::Local::now());

    tracing::info!(status = %request.status, "Showing alert");
    if let Err(e) = view.show() {
        tracing::error!("Failed to show alert: {}", e);
        return Err(e.into());
    }
    Ok(())
}
