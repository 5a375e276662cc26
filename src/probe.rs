//! Best-effort notebook label detection
//!
//! Each probe is one possible source of a human-readable session name.
//! Probes return `None` on any failure; nothing crosses the probe boundary.
//! [`resolve_label`] tries them in order and takes the first hit.

use std::ffi::OsStr;
use std::path::Path;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

/// Notebook file extension looked for in paths and command lines
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// One strategy for naming the current session
pub trait LabelProbe: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Label for the session, or `None` when this strategy cannot tell
    fn probe(&self) -> Option<String>;
}

/// Try each probe in order and return the first non-empty label
pub fn resolve_label(probes: &[Box<dyn LabelProbe>]) -> Option<String> {
    for probe in probes {
        match probe.probe().filter(|label| !label.trim().is_empty()) {
            Some(label) => {
                tracing::debug!(probe = probe.name(), label = %label, "Resolved notebook label");
                return Some(label);
            }
            None => tracing::trace!(probe = probe.name(), "Probe found no label"),
        }
    }
    None
}

/// Probes in their standard order: injected variables, then parent process
pub fn default_probes(env_vars: &[String]) -> Vec<Box<dyn LabelProbe>> {
    vec![
        Box::new(NotebookFileVar::from_env(env_vars.to_vec())),
        Box::new(ParentCmdline),
    ]
}

/// Display name for a notebook path: file name without the notebook extension
pub fn notebook_stem(path: &str) -> Option<String> {
    let name = Path::new(path.trim()).file_name().and_then(OsStr::to_str)?;
    let stem = name.strip_suffix(NOTEBOOK_EXTENSION).unwrap_or(name);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Variables injected by the kernel or editor naming the active notebook
pub struct NotebookFileVar {
    vars: Vec<String>,
    lookup: Lookup,
}

impl NotebookFileVar {
    /// Read the variables from the process environment
    pub fn from_env(vars: Vec<String>) -> Self {
        Self::with_lookup(vars, |key| std::env::var(key).ok())
    }

    pub fn with_lookup(
        vars: Vec<String>,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            vars,
            lookup: Box::new(lookup),
        }
    }
}

impl LabelProbe for NotebookFileVar {
    fn name(&self) -> &'static str {
        "notebook-file-var"
    }

    fn probe(&self) -> Option<String> {
        self.vars
            .iter()
            .filter_map(|key| (self.lookup)(key.as_str()))
            .find_map(|value| notebook_stem(&value))
    }
}

/// Parent process command line, e.g. `jupyter nbconvert --execute run.ipynb`
pub struct ParentCmdline;

impl ParentCmdline {
    fn parent_args() -> Option<Vec<String>> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );
        let parent = sys.process(pid)?.parent()?;
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[parent]),
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
        );
        let process = sys.process(parent)?;
        Some(
            process
                .cmd()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        )
    }
}

/// First argument naming a notebook file, as a display label
pub fn label_from_args<S: AsRef<str>>(args: &[S]) -> Option<String> {
    args.iter()
        .map(AsRef::<str>::as_ref)
        .find(|arg| arg.ends_with(NOTEBOOK_EXTENSION))
        .and_then(notebook_stem)
}

impl LabelProbe for ParentCmdline {
    fn name(&self) -> &'static str {
        "parent-cmdline"
    }

    fn probe(&self) -> Option<String> {
        label_from_args(Self::parent_args()?.as_slice())
    }
}
