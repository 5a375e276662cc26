//! Recording fakes shared by the unit tests

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::dispatch::{Console, Dispatcher, Launcher};
use crate::errors::Result;
use crate::hook::{ErrorCallback, ErrorContext, TracebackHost};
use crate::locate::{notifier_file_name, NotifierLocator};
use crate::probe::LabelProbe;

type Call = (PathBuf, Vec<String>);

/// Records every launch instead of spawning
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingLauncher {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Status tokens of every launch, in order
    pub fn statuses(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, args)| args[0].clone()).collect()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> std::io::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(())
    }
}

/// Launcher the OS always refuses
pub struct FailingLauncher;

impl Launcher for FailingLauncher {
    fn launch(&self, _program: &Path, _args: &[String]) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

#[derive(Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<String>>,
}

impl MemoryConsole {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Console for MemoryConsole {
    fn line(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

pub struct FixedProbe(pub Option<&'static str>);

impl LabelProbe for FixedProbe {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn probe(&self) -> Option<String> {
        self.0.map(String::from)
    }
}

/// Dispatcher over a temp dir holding a notifier, with no label probes
pub fn test_dispatcher() -> (
    Dispatcher,
    RecordingLauncher,
    Arc<MemoryConsole>,
    tempfile::TempDir,
) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(notifier_file_name()), b"").unwrap();
    let launcher = RecordingLauncher::default();
    let console = Arc::new(MemoryConsole::default());
    let dispatcher = Dispatcher::new(
        NotifierLocator::with_dirs(None, vec![dir.path().to_path_buf()]),
        Vec::new(),
        Box::new(launcher.clone()),
        console.clone(),
    );
    (dispatcher, launcher, console, dir)
}

type Display = Arc<dyn Fn(Option<&ErrorContext>) + Send + Sync>;

/// Interactive shell stand-in with a replaceable error display
pub struct FakeShell {
    display: Mutex<Display>,
    shown: Arc<AtomicUsize>,
    layers: AtomicUsize,
}

impl FakeShell {
    pub fn new() -> Self {
        let shown = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&shown);
        let original: Display = Arc::new(move |_: Option<&ErrorContext>| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Self {
            display: Mutex::new(original),
            shown,
            layers: AtomicUsize::new(0),
        }
    }

    /// Display an error the way the shell would after a failed cell
    pub fn raise(&self, context: Option<&ErrorContext>) {
        let display = Arc::clone(&*self.display.lock().unwrap());
        display(context);
    }

    /// Times the original display routine ran
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    /// Wrappers stacked over the original routine
    pub fn layers(&self) -> usize {
        self.layers.load(Ordering::SeqCst)
    }
}

impl TracebackHost for FakeShell {
    fn wrap_traceback(&self, after: ErrorCallback) -> Result<()> {
        let mut slot = self.display.lock().unwrap();
        let original = Arc::clone(&*slot);
        *slot = Arc::new(move |context: Option<&ErrorContext>| {
            original(context);
            after(context);
        });
        self.layers.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
