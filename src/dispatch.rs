//! Fire-and-forget alert dispatch
//!
//! The dispatcher resolves a label, finds the notifier, and launches it as a
//! detached process. It never returns an error to the caller: a missing or
//! unlaunchable notifier degrades to console lines carrying the message.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::alert::{AlertRequest, AlertStatus};
use crate::config::AlertConfig;
use crate::errors::{AlertError, Result};
use crate::locate::NotifierLocator;
use crate::probe::{default_probes, resolve_label, LabelProbe};

/// Starts the notifier process
pub trait Launcher: Send + Sync {
    fn launch(&self, program: &Path, args: &[String]) -> std::io::Result<()>;
}

/// Spawns the notifier in its own session with stdio discarded
///
/// The child is reaped on a background thread so the caller returns as soon
/// as the spawn syscall does.
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> std::io::Result<()> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // SAFETY: setsid is async-signal-safe and only affects the child.
            unsafe {
                command.pre_exec(|| {
                    if libc::setsid() == -1 {
                        return Err(std::io::Error::last_os_error());
                    }
                    Ok(())
                });
            }
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        let mut child = command.spawn()?;
        let pid = child.id();
        tracing::debug!(pid, program = %program.display(), "Spawned notifier");

        if let Err(e) = std::thread::Builder::new()
            .name("notifier-reaper".to_string())
            .spawn(move || {
                let _ = child.wait();
            })
        {
            tracing::debug!(pid, "Could not start reaper thread: {}", e);
        }
        Ok(())
    }
}

/// User-visible output lines (confirmations and degraded-mode fallbacks)
pub trait Console: Send + Sync {
    fn line(&self, text: &str);
}

/// Prints to standard output, where notebook frontends show cell output
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&self, text: &str) {
        println!("{text}");
    }
}

/// Locates and launches the notifier without blocking
pub struct Dispatcher {
    locator: NotifierLocator,
    probes: Vec<Box<dyn LabelProbe>>,
    launcher: Box<dyn Launcher>,
    console: Arc<dyn Console>,
}

impl Dispatcher {
    pub fn new(
        locator: NotifierLocator,
        probes: Vec<Box<dyn LabelProbe>>,
        launcher: Box<dyn Launcher>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            locator,
            probes,
            launcher,
            console,
        }
    }

    /// Production dispatcher: standard search path, default probes, stdout
    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(
            NotifierLocator::new(config.notifier.path.clone()),
            default_probes(&config.probe.env_vars),
            Box::new(DetachedLauncher),
            Arc::new(StdoutConsole),
        )
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    /// Show an alert. Failures are reported on the console, never returned.
    pub fn notify(&self, status: AlertStatus, message: &str, label: Option<&str>) {
        let label = match label {
            Some(label) => Some(label.to_string()),
            None => resolve_label(&self.probes),
        };
        let request = AlertRequest::new(status, message, label);

        if let Err(e) = self.dispatch(&request) {
            self.degrade(&request, &e);
        }
    }

    /// Locate and launch the notifier for one request
    pub fn dispatch(&self, request: &AlertRequest) -> Result<()> {
        let program = self.locator.locate()?;
        self.launcher
            .launch(&program, &request.argv())
            .map_err(AlertError::Spawn)?;

        tracing::info!(
            status = %request.status,
            label = request.label.as_deref().unwrap_or(""),
            "Alert dispatched"
        );
        Ok(())
    }

    fn degrade(&self, request: &AlertRequest, err: &AlertError) {
        tracing::warn!(error = %err, status = %request.status, "Desktop alert unavailable");

        match err {
            AlertError::NotifierNotFound { .. } => {
                self.console
                    .line(&format!("⚠ Warning: {err}. Cannot show desktop alert."));
            }
            _ => self.console.line(&format!("⚠ Warning: {err}")),
        }

        if !request.message.is_empty() {
            let outcome = if request.status.is_success() {
                "SUCCESS"
            } else {
                "ERROR"
            };
            self.console
                .line(&format!("✓ {outcome}: {}", request.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::notifier_file_name;
    use crate::testing::{FailingLauncher, FixedProbe, MemoryConsole, RecordingLauncher};

    fn installed_locator(dir: &Path) -> NotifierLocator {
        std::fs::write(dir.join(notifier_file_name()), b"").unwrap();
        NotifierLocator::with_dirs(None, vec![dir.to_path_buf()])
    }

    #[test]
    fn test_notify_launches_with_positional_args() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let console = Arc::new(MemoryConsole::default());
        let dispatcher = Dispatcher::new(
            installed_locator(dir.path()),
            vec![Box::new(FixedProbe(Some("train")))],
            Box::new(launcher.clone()),
            console.clone(),
        );

        dispatcher.notify(AlertStatus::Success, "Processed 1000 rows", None);

        let calls = launcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, dir.path().join(notifier_file_name()));
        assert_eq!(calls[0].1, vec!["success", "--", "Processed 1000 rows", "train"]);
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_supplied_label_skips_probes() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let dispatcher = Dispatcher::new(
            installed_locator(dir.path()),
            vec![Box::new(FixedProbe(Some("probed")))],
            Box::new(launcher.clone()),
            Arc::new(MemoryConsole::default()),
        );

        dispatcher.notify(AlertStatus::Error, "boom", Some("given"));
        assert_eq!(launcher.calls()[0].1, vec!["error", "--", "boom", "given"]);
    }

    #[test]
    fn test_failed_probes_give_empty_label() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let dispatcher = Dispatcher::new(
            installed_locator(dir.path()),
            vec![Box::new(FixedProbe(None)), Box::new(FixedProbe(None))],
            Box::new(launcher.clone()),
            Arc::new(MemoryConsole::default()),
        );

        dispatcher.notify(AlertStatus::Success, "ok", None);
        assert_eq!(launcher.calls()[0].1, vec!["success", "--", "ok", ""]);
    }

    #[test]
    fn test_missing_notifier_prints_message() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let console = Arc::new(MemoryConsole::default());
        let dispatcher = Dispatcher::new(
            NotifierLocator::with_dirs(None, vec![dir.path().to_path_buf()]),
            Vec::new(),
            Box::new(launcher.clone()),
            console.clone(),
        );

        dispatcher.notify(AlertStatus::Success, "Processed 1000 rows", None);

        assert!(launcher.calls().is_empty());
        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("⚠ Warning: notebook-alert-show"));
        assert_eq!(lines[1], "✓ SUCCESS: Processed 1000 rows");
    }

    #[test]
    fn test_missing_notifier_empty_message_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let console = Arc::new(MemoryConsole::default());
        let dispatcher = Dispatcher::new(
            NotifierLocator::with_dirs(None, vec![dir.path().to_path_buf()]),
            Vec::new(),
            Box::new(RecordingLauncher::default()),
            console.clone(),
        );

        dispatcher.notify(AlertStatus::Error, "", None);
        assert_eq!(console.lines().len(), 1);
    }

    #[test]
    fn test_spawn_failure_prints_message() {
        let dir = tempfile::tempdir().unwrap();
        let console = Arc::new(MemoryConsole::default());
        let dispatcher = Dispatcher::new(
            installed_locator(dir.path()),
            Vec::new(),
            Box::new(FailingLauncher),
            console.clone(),
        );

        dispatcher.notify(AlertStatus::Error, "disk full", None);

        let lines = console.lines();
        assert!(lines[0].starts_with("⚠ Warning: Could not launch alert"));
        assert_eq!(lines[1], "✓ ERROR: disk full");
    }

    #[cfg(unix)]
    #[test]
    fn test_detached_launcher_returns_without_waiting() {
        let start = std::time::Instant::now();
        DetachedLauncher
            .launch(Path::new("/bin/sh"), &["-c".to_string(), "sleep 2".to_string()])
            .unwrap();
        assert!(start.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_detached_launcher_reports_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let result = DetachedLauncher.launch(&dir.path().join("absent"), &[]);
        assert!(result.is_err());
    }
}
