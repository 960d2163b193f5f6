//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::{ResolvedConfig, TabEntry};
use crate::core::state::App;

/// A resolved config with the default five-tab hub and a short welcome
/// message ("Hi there": 7 animated units).
pub fn test_config() -> ResolvedConfig {
    let tabs = [
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
    .collect();

    ResolvedConfig {
        base_url: Some("http://localhost:8000".to_string()),
        welcome_message: "Hi there".to_string(),
        request_timeout_secs: 1,
        haptics: false,
        tabs,
    }
}

/// Creates a test App from `test_config()`.
pub fn test_app() -> App {
    App::from_config(&test_config())
}
