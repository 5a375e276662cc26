//! Notifier executable lookup
//!
//! The notifier ships as a separate binary that may or may not sit next to
//! the caller. Search order: configured override, the running executable's
//! directory, the current directory, the home directory.

use std::path::{Path, PathBuf};

use crate::errors::{AlertError, Result};

/// Base name of the notifier binary
pub const NOTIFIER_NAME: &str = "notebook-alert-show";

/// File name of the notifier on this platform
pub fn notifier_file_name() -> String {
    format!("{NOTIFIER_NAME}{}", std::env::consts::EXE_SUFFIX)
}

/// Ordered search for the notifier executable
#[derive(Debug, Clone)]
pub struct NotifierLocator {
    file_name: String,
    override_path: Option<PathBuf>,
    /// Fixed directories; `None` reads the standard ones on every lookup
    search_dirs: Option<Vec<PathBuf>>,
}

impl NotifierLocator {
    /// Locator over the standard directories, resolved at lookup time
    pub fn new(override_path: Option<PathBuf>) -> Self {
        Self {
            file_name: notifier_file_name(),
            override_path,
            search_dirs: None,
        }
    }

    pub fn with_dirs(override_path: Option<PathBuf>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs: Some(search_dirs),
            ..Self::new(override_path)
        }
    }

    /// Executable dir, current dir, home dir; unavailable entries are skipped
    pub fn default_dirs() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().ok();
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

        [exe_dir, cwd, home].into_iter().flatten().collect()
    }

    /// Candidate paths in search order
    pub fn candidates(&self) -> Vec<PathBuf> {
        let dirs = match &self.search_dirs {
            Some(dirs) => dirs.clone(),
            None => Self::default_dirs(),
        };
        self.override_path
            .iter()
            .cloned()
            .chain(dirs.iter().map(|dir| dir.join(&self.file_name)))
            .collect()
    }

    /// First existing candidate
    pub fn locate(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            tracing::trace!(path = %found.display(), "Found notifier");
            return Ok(found.clone());
        }

        Err(AlertError::NotifierNotFound {
            name: self.file_name.clone(),
            searched: candidates,
        })
    }
}
