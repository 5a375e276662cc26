//! Outside a notebook kernel the hook stays off and panics never alert.
//!
//! Separate binary from panic_hook.rs so no other test installs a panic hook.

use std::path::Path;
use std::sync::{Arc, Mutex};

use notebook_alert::dispatch::{Console, Launcher};
use notebook_alert::hook::{ErrorHook, NoShell};
use notebook_alert::locate::{notifier_file_name, NotifierLocator};
use notebook_alert::Dispatcher;

#[derive(Clone, Default)]
struct Recorder {
    args: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Launcher for Recorder {
    fn launch(&self, _program: &Path, args: &[String]) -> std::io::Result<()> {
        self.args.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Lines(Arc<Mutex<Vec<String>>>);

impl Console for Lines {
    fn line(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

#[test]
fn panics_without_shell_do_not_alert() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(notifier_file_name()), b"").unwrap();

    let recorder = Recorder::default();
    let lines = Lines::default();
    let dispatcher = Dispatcher::new(
        NotifierLocator::with_dirs(None, vec![dir.path().to_path_buf()]),
        Vec::new(),
        Box::new(recorder.clone()),
        Arc::new(lines.clone()),
    );
    let hook = ErrorHook::new(Arc::new(dispatcher), 100);
    assert!(!hook.install(&NoShell));

    let result = std::panic::catch_unwind(|| panic!("unhandled in a script"));
    assert!(result.is_err());

    assert!(recorder.args.lock().unwrap().is_empty());
    assert!(lines.0.lock().unwrap().is_empty());
    assert!(!hook.state().hook_installed());
    assert!(!hook.state().error_alerted());
}
