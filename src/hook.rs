//! Automatic error alerts
//!
//! [`ErrorHook`] wraps the host's error-display routine. The wrapper always
//! runs the original routine first, then fires at most one error alert per
//! session. Installation is idempotent and never fails loudly: a host with
//! no interactive shell simply gets no automatic alerts.

use std::panic::PanicHookInfo;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::alert::{truncate_chars, AlertStatus};
use crate::dispatch::Dispatcher;
use crate::errors::{AlertError, Result};

/// Alert text when the failing error cannot be described
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during execution";

/// Variables a notebook kernel sets in its own environment
pub const KERNEL_MARKERS: &[&str] = &[
    "JPY_PARENT_PID",
    "JPY_SESSION_NAME",
    "EVCXR_IS_RUNTIME",
];

/// The error currently being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub kind: String,
    pub message: String,
}

impl ErrorContext {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Called after the host's original error display has run
pub type ErrorCallback = Arc<dyn Fn(Option<&ErrorContext>) + Send + Sync>;

/// A host whose error display routine can be wrapped
pub trait TracebackHost: Send + Sync {
    /// Replace the display routine with one that chains to the original and then calls `after`
    fn wrap_traceback(&self, after: ErrorCallback) -> Result<()>;
}

/// The process panic hook
pub struct PanicHost;

impl TracebackHost for PanicHost {
    fn wrap_traceback(&self, after: ErrorCallback) -> Result<()> {
        // set_hook panics when called while panicking
        if std::thread::panicking() {
            return Err(AlertError::NoInteractiveShell);
        }

        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            original(info);
            after(panic_context(info).as_ref());
        }));
        Ok(())
    }
}

/// Describe a panic; `None` for payloads that are not text
pub fn panic_context(info: &PanicHookInfo<'_>) -> Option<ErrorContext> {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())?;
    Some(ErrorContext::new("panic", message))
}

/// A plain script: nothing to wrap
pub struct NoShell;

impl TracebackHost for NoShell {
    fn wrap_traceback(&self, _after: ErrorCallback) -> Result<()> {
        Err(AlertError::NoInteractiveShell)
    }
}

/// True when any kernel marker is set
pub fn in_kernel(lookup: impl Fn(&str) -> Option<String>) -> bool {
    KERNEL_MARKERS.iter().any(|&key| lookup(key).is_some())
}

/// Which host a process gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Panic,
    Script,
}

/// Panic host inside a notebook kernel (or when forced), otherwise none
pub fn host_kind(always: bool, lookup: impl Fn(&str) -> Option<String>) -> HostKind {
    if always || in_kernel(lookup) {
        HostKind::Panic
    } else {
        HostKind::Script
    }
}

pub fn detect_host(always: bool) -> Box<dyn TracebackHost> {
    match host_kind(always, |key| std::env::var(key).ok()) {
        HostKind::Panic => Box::new(PanicHost),
        HostKind::Script => {
            tracing::debug!("No notebook kernel detected, automatic error alerts disabled");
            Box::new(NoShell)
        }
    }
}

/// Alert text for an error, capped at `max_chars` of message
pub fn describe_error(context: Option<&ErrorContext>, max_chars: usize) -> String {
    match context {
        Some(ctx) => format!("{}: {}", ctx.kind, truncate_chars(&ctx.message, max_chars)),
        None => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}

/// Session-scoped flags, alive until the process exits
///
/// Mutated from the kernel's execution thread only; atomics because the
/// panic hook closure must be `Send + Sync`.
#[derive(Debug, Default)]
pub struct SessionState {
    hook_installed: AtomicBool,
    error_alerted: AtomicBool,
}

impl SessionState {
    pub fn hook_installed(&self) -> bool {
        self.hook_installed.load(Ordering::Acquire)
    }

    pub fn error_alerted(&self) -> bool {
        self.error_alerted.load(Ordering::Acquire)
    }
}

/// Uninstalled until the first successful [`ErrorHook::install`]; never uninstalled
pub struct ErrorHook {
    state: Arc<SessionState>,
    dispatcher: Arc<Dispatcher>,
    truncate_len: usize,
}

impl ErrorHook {
    pub fn new(dispatcher: Arc<Dispatcher>, truncate_len: usize) -> Self {
        Self {
            state: Arc::new(SessionState::default()),
            dispatcher,
            truncate_len,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Wrap the host's error display once. Returns whether the hook is installed.
    pub fn install(&self, host: &dyn TracebackHost) -> bool {
        if self
            .state
            .hook_installed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return true;
        }

        match host.wrap_traceback(self.on_error()) {
            Ok(()) => {
                tracing::info!("Automatic error alerts installed");
                self.dispatcher
                    .console()
                    .line("✓ Auto-error detection enabled - will alert if any cell fails!");
                true
            }
            Err(e) => {
                self.state.hook_installed.store(false, Ordering::Release);
                tracing::debug!("Error hook not installed: {}", e);
                false
            }
        }
    }

    fn on_error(&self) -> ErrorCallback {
        let state = Arc::clone(&self.state);
        let dispatcher = Arc::clone(&self.dispatcher);
        let max_chars = self.truncate_len;

        Arc::new(move |context: Option<&ErrorContext>| {
            if state.error_alerted.swap(true, Ordering::AcqRel) {
                return;
            }
            let message = describe_error(context, max_chars);
            dispatcher.notify(AlertStatus::Error, &message, None);
        })
    }
}
