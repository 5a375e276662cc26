use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default cap on the error text carried by an automatic alert
pub const DEFAULT_TRUNCATE_LEN: usize = 100;

/// Default on-screen duration of the notifier popup
pub const DEFAULT_TIMEOUT_MS: u32 = 12_000;

/// Application configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Maximum characters of exception text in automatic error alerts
    #[serde(default = "default_truncate_len")]
    pub truncate_len: usize,

    /// Notifier process configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Automatic error hook configuration
    #[serde(default)]
    pub hook: HookConfig,

    /// Label probing configuration
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            truncate_len: default_truncate_len(),
            notifier: NotifierConfig::default(),
            hook: HookConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

fn default_truncate_len() -> usize {
    DEFAULT_TRUNCATE_LEN
}

/// Notifier-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Explicit notifier executable, searched before the standard locations
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// How long the popup stays up before dismissing itself
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Sound played for success alerts
    #[serde(default = "default_success_sound")]
    pub success_sound: String,

    /// Sound played for error alerts
    #[serde(default = "default_error_sound")]
    pub error_sound: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            path: None,
            timeout_ms: default_timeout_ms(),
            success_sound: default_success_sound(),
            error_sound: default_error_sound(),
        }
    }
}

fn default_timeout_ms() -> u32 {
    DEFAULT_TIMEOUT_MS
}

fn default_success_sound() -> String {
    "Glass".to_string()
}

fn default_error_sound() -> String {
    "Basso".to_string()
}

/// Error hook configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HookConfig {
    /// Install the panic hook even outside a notebook kernel
    #[serde(default)]
    pub always: bool,
}

/// Label probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Environment variables naming the active notebook, tried in order
    #[serde(default = "default_env_vars")]
    pub env_vars: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            env_vars: default_env_vars(),
        }
    }
}

fn default_env_vars() -> Vec<String> {
    vec![
        "NOTEBOOK_ALERT_LABEL".to_string(),
        "JPY_SESSION_NAME".to_string(),
        "__vsc_ipynb_file__".to_string(),
    ]
}

impl AlertConfig {
    /// Load configuration from default path (~/.config/notebook-alert/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/notebook-alert/config.toml"),
            |dirs| dirs.config_dir().join("notebook-alert").join("config.toml"),
        )
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r#"# notebook-alert configuration
# Place this file at ~/.config/notebook-alert/config.toml

# Maximum characters of exception text in automatic error alerts
truncate_len = 100

[notifier]
# Explicit path to notebook-alert-show (searched before the exe dir, cwd and home)
# path = "/opt/bin/notebook-alert-show"

# Popup duration in milliseconds
timeout_ms = 12000

# Sounds for success and error alerts
success_sound = "Glass"
error_sound = "Basso"

[hook]
# Alert on panics even when not running inside a notebook kernel
always = false

[probe]
# Variables naming the active notebook, tried in order
env_vars = ["NOTEBOOK_ALERT_LABEL", "JPY_SESSION_NAME", "__vsc_ipynb_file__"]
"#
        .to_string()
    }
}
