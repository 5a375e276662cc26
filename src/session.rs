//! User-facing alert calls
//!
//! `done` and `error` are unlimited manual triggers; they never look at or
//! touch the automatic hook's once-per-session flag. The process-wide
//! session installs the error hook on first use.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::alert::AlertStatus;
use crate::config::AlertConfig;
use crate::dispatch::Dispatcher;
use crate::hook::{detect_host, ErrorHook, TracebackHost};

/// Message used by `done(None)`
pub const DEFAULT_DONE_MESSAGE: &str = "Notebook completed successfully!";

/// Message used by `error(None)`
pub const DEFAULT_ERROR_MESSAGE: &str = "Notebook encountered an error!";

/// One host session: a dispatcher, its error hook, and the host to hook into
pub struct Session {
    dispatcher: Arc<Dispatcher>,
    hook: ErrorHook,
    host: Box<dyn TracebackHost>,
}

impl Session {
    pub fn new(dispatcher: Arc<Dispatcher>, host: Box<dyn TracebackHost>, config: &AlertConfig) -> Self {
        let hook = ErrorHook::new(Arc::clone(&dispatcher), config.truncate_len);
        Self {
            dispatcher,
            hook,
            host,
        }
    }

    /// Session for this process, built from the on-disk config
    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(
            Arc::new(Dispatcher::from_config(config)),
            detect_host(config.hook.always),
            config,
        )
    }

    pub fn hook(&self) -> &ErrorHook {
        &self.hook
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Success alert plus a confirmation line
    pub fn done<'a>(&self, message: impl Into<Option<&'a str>>) {
        let message = message.into().unwrap_or(DEFAULT_DONE_MESSAGE);
        self.dispatcher.notify(AlertStatus::Success, message, None);
        self.dispatcher.console().line(&format!("✓ {message}"));
    }

    /// Manual error alert plus a confirmation line
    pub fn error<'a>(&self, message: impl Into<Option<&'a str>>) {
        let message = message.into().unwrap_or(DEFAULT_ERROR_MESSAGE);
        self.dispatcher.notify(AlertStatus::Error, message, None);
        self.dispatcher.console().line(&format!("✗ {message}"));
    }

    /// Install the error hook quietly; returns whether it is installed
    pub fn install_hook(&self) -> bool {
        self.hook.install(self.host.as_ref())
    }

    /// Install the error hook (idempotent) and print the banner
    pub fn enable_alerts(&self) {
        self.install_hook();
        let console = self.dispatcher.console();
        console.line("✓ Notebook alerts enabled!");
        console.line("  - Errors will trigger automatic red alerts");
        console.line("  - Call done() in last cell for success alert");
    }
}

static SESSION: Lazy<Session> = Lazy::new(|| {
    let session = Session::from_config(&AlertConfig::load());
    session.install_hook();
    session
});

/// The process-wide session; first access installs the error hook
pub fn global() -> &'static Session {
    &SESSION
}

/// Set up the process-wide session without sending an alert
pub fn init() {
    Lazy::force(&SESSION);
}

/// Show a success alert, e.g. `done("Processed 1000 rows")` or `done(None)`
pub fn done<'a>(message: impl Into<Option<&'a str>>) {
    global().done(message);
}

/// Show an error alert, e.g. `error("Processing failed!")` or `error(None)`
pub fn error<'a>(message: impl Into<Option<&'a str>>) {
    global().error(message);
}

/// Make sure automatic error alerts are on
pub fn enable_alerts() {
    global().enable_alerts();
}
