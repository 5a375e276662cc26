//! Popup presentation for the notifier process
//!
//! Uses notify-rust for native notifications on macOS, Linux, and BSD.
//! On freedesktop desktops the process stays alive until the popup is
//! dismissed, either by its timeout or by the user.

use chrono::{DateTime, Local};
use clap::Parser;
use notify_rust::{Notification, Timeout};

use crate::alert::{AlertRequest, AlertStatus};
use crate::config::NotifierConfig;
use crate::errors::{AlertError, Result};

pub const SUCCESS_TITLE: &str = "✓ NOTEBOOK COMPLETE ✓";
pub const ERROR_TITLE: &str = "✗ NOTEBOOK ERROR ✗";

/// Command line of the notifier process, as written by [`AlertRequest::argv`]
#[derive(Parser, Debug)]
#[command(name = "notebook-alert-show", version, about = "Show one notebook alert popup")]
pub struct NotifierArgs {
    /// Alert kind: success or error
    pub status: AlertStatus,

    /// Alert text; empty shows the completion time
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub message: String,

    /// Notebook label shown above the message
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub label: String,
}

impl NotifierArgs {
    /// Empty label means no label
    pub fn into_request(self) -> AlertRequest {
        let label = Some(self.label).filter(|label| !label.is_empty());
        AlertRequest::new(self.status, self.message, label)
    }
}

/// Everything the popup shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub title: &'static str,
    pub body: String,
    pub sound: String,
    pub timeout_ms: u32,
}

impl AlertView {
    pub fn build(request: &AlertRequest, config: &NotifierConfig, now: DateTime<Local>) -> Self {
        let success = request.status.is_success();

        let mut body = match request.label.as_deref() {
            Some(label) if !label.is_empty() => format!("{label}\n\n"),
            _ => String::new(),
        };
        if request.message.is_empty() {
            body.push_str(&format!("Completed at {}", now.format("%I:%M:%S %p")));
        } else {
            body.push_str(&request.message);
        }

        Self {
            title: if success { SUCCESS_TITLE } else { ERROR_TITLE },
            body,
            sound: if success {
                config.success_sound.clone()
            } else {
                config.error_sound.clone()
            },
            timeout_ms: config.timeout_ms,
        }
    }

    /// Show the popup and play its sound
    pub fn show(&self) -> Result<()> {
        let mut notification = Notification::new();
        notification
            .appname("notebook-alert")
            .summary(self.title)
            .body(&self.body)
            .timeout(Timeout::Milliseconds(self.timeout_ms));

        present(notification, &self.sound)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn present(mut notification: Notification, sound: &str) -> Result<()> {
    notification
        .hint(notify_rust::Hint::SoundName(sound.to_string()))
        .action("default", "OK");

    let handle = notification
        .show()
        .map_err(|e| AlertError::Notification(e.to_string()))?;
    handle.wait_for_action(|action| {
        tracing::debug!(action, "Alert dismissed");
    });
    Ok(())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn present(mut notification: Notification, sound: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    notification.sound_name(sound);
    #[cfg(not(target_os = "macos"))]
    let _ = sound;

    notification
        .show()
        .map(|_| ())
        .map_err(|e| AlertError::Notification(e.to_string()))
}
