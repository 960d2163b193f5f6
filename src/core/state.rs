//! # Application State
//!
//! Core business state for Kiosk. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tabs: Vec<NavTab>            // fixed navigation row
//! ├── nav: NavigationState         // which tab is active
//! ├── is_loading: bool             // page transition in flight
//! ├── generation: u64              // tag for the newest load request
//! ├── welcome: WelcomeState        // typewriter animation schedule
//! ├── welcome_dismissed: bool      // first navigation hides the welcome
//! ├── content: Option<PageContent> // last successfully loaded page
//! ├── overlays: Vec<ErrorOverlay>  // transient failure messages
//! ├── status_message: String       // status bar text
//! └── clock_ms: u64                // app clock, fed by Tick actions
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use log::debug;

use crate::core::config::ResolvedConfig;
use crate::core::welcome::WelcomeState;

/// Tabs below this index skip the loading indicator; their targets render
/// near-instantly.
pub const FAST_TAB_COUNT: usize = 2;

/// How long a failure overlay stays on screen.
pub const OVERLAY_LIFETIME_MS: u64 = 3000;

/// One button of the navigation row. Index and url never change; only the
/// active flag does.
#[derive(Debug, Clone)]
pub struct NavTab {
    pub index: usize,
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// The single currently-active tab/url pair.
///
/// Invariant: at most one `NavTab` has its active flag set, and it is exactly
/// the one at `active_index` when set. `current_url` equals the active tab's
/// url once any navigation has happened.
#[derive(Debug, Default)]
pub struct NavigationState {
    pub active_index: Option<usize>,
    pub current_url: Option<String>,
}

/// A fetched page body shown in the content pane.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub url: String,
    pub body: String,
}

/// A transient failure message. Auto-removed once the clock passes
/// `expires_at_ms`; no interaction required.
#[derive(Debug, Clone)]
pub struct ErrorOverlay {
    pub message: String,
    pub expires_at_ms: u64,
}

pub struct App {
    pub tabs: Vec<NavTab>,
    pub nav: NavigationState,
    pub is_loading: bool,
    /// Incremented per load request; completion signals carrying an older
    /// value are stale and ignored.
    pub generation: u64,
    pub welcome: WelcomeState,
    pub welcome_dismissed: bool,
    pub content: Option<PageContent>,
    pub overlays: Vec<ErrorOverlay>,
    pub status_message: String,
    pub clock_ms: u64,
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let tabs = config
            .tabs
            .iter()
            .enumerate()
            .map(|(index, entry)| NavTab {
                index,
                label: entry.label.clone(),
                url: entry.url.clone(),
                active: false,
            })
            .collect::<Vec<_>>();
        let welcome = WelcomeState::new(&config.welcome_message, !tabs.is_empty());
        Self {
            tabs,
            nav: NavigationState::default(),
            is_loading: false,
            generation: 0,
            welcome,
            welcome_dismissed: false,
            content: None,
            overlays: Vec::new(),
            status_message: String::from("Welcome to Kiosk!"),
            clock_ms: 0,
        }
    }

    /// Move the active designation to `index`, clearing the previous holder.
    pub fn activate(&mut self, index: usize) {
        if let Some(previous) = self.nav.active_index
            && let Some(tab) = self.tabs.get_mut(previous)
        {
            tab.active = false;
        }
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.active = true;
            self.nav.active_index = Some(index);
            self.nav.current_url = Some(tab.url.clone());
            debug!("Tab {} ({}) is now active", index, tab.label);
        }
    }

    pub fn active_tab(&self) -> Option<&NavTab> {
        self.nav.active_index.and_then(|index| self.tabs.get(index))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_from_config_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Kiosk!");
        assert!(!app.is_loading);
        assert!(!app.welcome_dismissed);
        assert_eq!(app.tabs.len(), 5);
        assert!(app.nav.active_index.is_none());
        assert!(app.tabs.iter().all(|tab| !tab.active));
    }

    #[test]
    fn test_activate_moves_the_flag() {
        let mut app = test_app();
        app.activate(2);
        app.activate(4);
        let active: Vec<usize> = app
            .tabs
            .iter()
            .filter(|tab| tab.active)
            .map(|tab| tab.index)
            .collect();
        assert_eq!(active, vec![4]);
        assert_eq!(app.nav.active_index, Some(4));
        assert_eq!(
            app.nav.current_url.as_deref(),
            Some(app.tabs[4].url.as_str())
        );
    }
}
