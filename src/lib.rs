// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::missing_panics_doc)] // Internal functions don't need # Panics docs
#![allow(clippy::must_use_candidate)] // Not all getters need #[must_use]
#![allow(clippy::module_name_repetitions)] // e.g., AlertError in errors module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around macOS, Jupyter, etc.
#![allow(clippy::option_if_let_else)] // if-let is more readable for Option handling

//! notebook-alert - desktop alerts for long-running notebook cells
//!
//! Call [`done`] in the last cell for a green success popup. Inside a
//! notebook kernel the first use of the library also wraps the panic hook,
//! so the first failing cell of a session raises a red error popup without
//! any extra setup.
//!
//! ```ignore
//! notebook_alert::done("Processed 1000 rows");
//! notebook_alert::error(None);          // "Notebook encountered an error!"
//! notebook_alert::enable_alerts();      // idempotent, prints a banner
//! ```
//!
//! The popup itself is drawn by the separate `notebook-alert-show` binary,
//! launched detached so the kernel never waits on it.

pub mod alert;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod hook;
pub mod locate;
pub mod logging;
pub mod notifier;
pub mod probe;
pub mod session;

#[cfg(test)]
mod testing;

pub use alert::{AlertRequest, AlertStatus};
pub use config::AlertConfig;
pub use dispatch::Dispatcher;
pub use errors::{AlertError, Result};
pub use hook::{ErrorHook, SessionState};
pub use session::{done, enable_alerts, error, global, init, Session};
