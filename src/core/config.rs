//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.kiosk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tabs: Vec<TabEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub welcome_message: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub haptics: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabEntry {
    pub label: String,
    pub url: String,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// `\n` breaks lines, `*…*` marks an emphasis span.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hey there!\nWelcome to *Kiosk*";

/// The hub's fixed navigation row when no `[[tabs]]` are configured.
/// The first two entries are the fast tabs.
fn default_tabs() -> Vec<TabEntry> {
    [
        ("Home", "/home.html"),
        ("About", "/about.html"),
        ("Games", "/games.html"),
        ("News", "/news.html"),
        ("Contact", "/contact.html"),
    ]
    .into_iter()
    .map(|(label, url)| TabEntry {
        label: label.to_string(),
        url: url.to_string(),
    })
    .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base that relative tab urls resolve against. None means tabs must be
    /// absolute urls.
    pub base_url: Option<String>,
    pub welcome_message: String,
    pub request_timeout_secs: u64,
    pub haptics: bool,
    pub tabs: Vec<TabEntry>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.kiosk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kiosk").join("config.toml"))
}

/// Load config from `override_path`, or `~/.kiosk/config.toml` when none is
/// given.
///
/// If the default file doesn't exist, generates a commented-out template and
/// returns `KioskConfig::default()`. If a file exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(override_path: Option<&Path>) -> Result<KioskConfig, ConfigError> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(KioskConfig::default());
            }
        },
    };

    if !path.exists() {
        if override_path.is_some() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no config file at {}", path.display()),
            )));
        }
        info!(
            "No config file found, generating default at {}",
            path.display()
        );
        generate_default_config(&path);
        return Ok(KioskConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: KioskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Kiosk Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "http://localhost:8000"   # Relative tab urls resolve against this
# welcome_message = "Hey there!\nWelcome to *Kiosk*"
# request_timeout_secs = 30
# haptics = true                       # Terminal bell pulse on navigation

# The navigation row, in order. The first two tabs are treated as fast
# (no loading indicator). Alt+1..5 jumps to the matching tab.

# [[tabs]]
# label = "Home"
# url = "/home.html"

# [[tabs]]
# label = "Games"
# url = "/games.html"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI.
///
/// `cli_base_url` is from the `--base-url` flag (None = not specified).
pub fn resolve(config: &KioskConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Base url: CLI → env → config → none
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("KIOSK_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone());

    let tabs = if config.tabs.is_empty() {
        default_tabs()
    } else {
        config.tabs.clone()
    };

    ResolvedConfig {
        base_url,
        welcome_message: config
            .general
            .welcome_message
            .clone()
            .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
        request_timeout_secs: config
            .general
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        haptics: config.general.haptics.unwrap_or(true),
        tabs,
    }
}
