//! Structured error types for notebook-alert
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations. None of these ever reach notebook code:
//! the dispatcher and error hook downgrade them to console lines or logs.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors in notebook-alert
#[derive(Error, Debug)]
pub enum AlertError {
    /// Status token on the notifier command line was not recognised
    #[error("Invalid status '{0}'. Expected: success, error")]
    InvalidStatus(String),

    /// Notifier executable was not found in any search location
    #[error("{name} not found (searched {} locations)", .searched.len())]
    NotifierNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    /// OS refused to create the notifier process
    #[error("Could not launch alert: {0}")]
    Spawn(#[source] std::io::Error),

    /// Host has no interactive shell whose error display can be wrapped
    #[error("No interactive shell context")]
    NoInteractiveShell,

    /// Desktop notification backend failed
    #[error("Notification error: {0}")]
    Notification(String),
}

/// Convenience Result type using AlertError
pub type Result<T> = std::result::Result<T, AlertError>;
