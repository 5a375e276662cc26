//! Alert payload passed from the dispatcher to the notifier process

use std::fmt;
use std::str::FromStr;

use crate::errors::AlertError;

/// Marks the end of flags on the notifier command line
pub const END_OF_OPTIONS: &str = "--";

/// Outcome an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Success,
    Error,
}

impl AlertStatus {
    /// Token used on the notifier command line
    pub fn token(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<bool> for AlertStatus {
    fn from(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AlertStatus {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(AlertError::InvalidStatus(other.to_string())),
        }
    }
}

/// One alert, built fresh per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub status: AlertStatus,
    pub message: String,
    pub label: Option<String>,
}

impl AlertRequest {
    pub fn new(status: AlertStatus, message: impl Into<String>, label: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            label,
        }
    }

    /// Arguments for the notifier: `[status, "--", message, label]`
    ///
    /// Message and label follow the end-of-options marker so text such as
    /// `-5 rows dropped` is never read as a flag.
    pub fn argv(&self) -> [String; 4] {
        [
            self.status.token().to_string(),
            END_OF_OPTIONS.to_string(),
            self.message.clone(),
            self.label.clone().unwrap_or_default(),
        ]
    }
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
