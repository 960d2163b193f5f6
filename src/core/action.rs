//! # Actions
//!
//! Everything that can happen in Kiosk becomes an `Action`.
//! User hits Alt+3? That's `Action::ActivateTab(2)`.
//! A fetch finishes? That's `Action::PageLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state, returning an `Effect` for the I/O the caller must perform.
//! No I/O happens here, which is what makes the navigation semantics
//! testable without a terminal or a network.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Per navigation the state machine is `Idle → Loading → {Loaded, Failed}`
//! and back to `Idle` readiness on the next request. Every load request gets
//! a fresh generation number; completion and error signals carrying an older
//! generation are stale leftovers of a superseded navigation and are dropped
//! so they can never clear a younger request's loading flag.

use log::{debug, info, warn};

use crate::core::state::{App, ErrorOverlay, FAST_TAB_COUNT, OVERLAY_LIFETIME_MS, PageContent};

/// Static overlay text; the underlying error goes to the log instead.
pub const LOAD_FAILURE_TEXT: &str = "Couldn't load this page.";

#[derive(Debug, Clone)]
pub enum Action {
    /// A tab was activated by pointer click or keyboard shortcut.
    ActivateTab(usize),
    /// The fetch tagged with `generation` delivered a page body.
    PageLoaded { generation: u64, body: String },
    /// The fetch tagged with `generation` failed.
    PageFailed { generation: u64, message: String },
    /// App clock advance; drives overlay expiry and the welcome schedule.
    Tick { now_ms: u64 },
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Start fetching `url`, reporting back with this generation tag.
    Load { url: String, generation: u64 },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ActivateTab(index) => activate_tab(app, index),
        Action::PageLoaded { generation, body } => page_loaded(app, generation, body),
        Action::PageFailed {
            generation,
            message,
        } => page_failed(app, generation, message),
        Action::Tick { now_ms } => {
            app.clock_ms = now_ms;
            app.welcome.tick(now_ms);
            app.overlays
                .retain(|overlay| now_ms < overlay.expires_at_ms);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn activate_tab(app: &mut App, index: usize) -> Effect {
    let Some(tab) = app.tabs.get(index) else {
        debug!("Activation of missing tab {} ignored", index);
        return Effect::None;
    };
    let url = tab.url.clone();
    let label = tab.label.clone();

    if url.is_empty() {
        debug!("Tab {} has no target url, ignoring", index);
        return Effect::None;
    }
    // Re-selecting the current target changes nothing and avoids a
    // redundant reload.
    if app.nav.current_url.as_deref() == Some(url.as_str()) {
        debug!("Tab {} already shows {}, ignoring", index, url);
        return Effect::None;
    }

    // The first navigation dismisses the welcome screen for good.
    app.welcome_dismissed = true;

    app.activate(index);
    app.is_loading = index >= FAST_TAB_COUNT;
    app.generation += 1;
    app.status_message = format!("Loading {label}");
    info!(
        "Navigating to {} (tab {}, generation {}, loading indicator {})",
        url, index, app.generation, app.is_loading
    );

    Effect::Load {
        url,
        generation: app.generation,
    }
}

fn page_loaded(app: &mut App, generation: u64, body: String) -> Effect {
    if generation != app.generation {
        debug!(
            "Dropping stale completion (generation {}, current {})",
            generation, app.generation
        );
        return Effect::None;
    }
    // Unconditional and idempotent: fast tabs never set the flag.
    app.is_loading = false;
    let url = app.nav.current_url.clone().unwrap_or_default();
    info!("Loaded {} ({} bytes)", url, body.len());
    app.content = Some(PageContent { url, body });
    app.status_message = app
        .active_tab()
        .map(|tab| tab.label.clone())
        .unwrap_or_default();
    Effect::None
}

fn page_failed(app: &mut App, generation: u64, message: String) -> Effect {
    if generation != app.generation {
        debug!(
            "Dropping stale failure (generation {}, current {})",
            generation, app.generation
        );
        return Effect::None;
    }
    warn!("Load failed (generation {}): {}", generation, message);
    app.is_loading = false;
    app.status_message = String::from("Load failed");
    // Rapid failures may stack; each overlay times out on its own.
    app.overlays.push(ErrorOverlay {
        message: String::from(LOAD_FAILURE_TEXT),
        expires_at_ms: app.clock_ms + OVERLAY_LIFETIME_MS,
    });
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn activate(app: &mut App, index: usize) -> Effect {
        update(app, Action::ActivateTab(index))
    }

    fn finish_load(app: &mut App) {
        let generation = app.generation;
        update(
            app,
            Action::PageLoaded {
                generation,
                body: "<h1>ok</h1>".to_string(),
            },
        );
    }

    #[test]
    fn test_first_activation_starts_a_load() {
        let mut app = test_app();
        let effect = activate(&mut app, 2);
        assert_eq!(
            effect,
            Effect::Load {
                url: "/games.html".to_string(),
                generation: 1
            }
        );
        assert!(app.is_loading);
        assert_eq!(app.nav.current_url.as_deref(), Some("/games.html"));
        assert!(app.welcome_dismissed);
    }

    #[test]
    fn test_reselecting_active_tab_is_noop() {
        let mut app = test_app();
        activate(&mut app, 2);
        finish_load(&mut app);

        let effect = activate(&mut app, 2);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.nav.current_url.as_deref(), Some("/games.html"));
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn test_empty_url_is_noop() {
        let mut app = test_app();
        app.tabs[3].url = String::new();
        let effect = activate(&mut app, 3);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert!(app.nav.current_url.is_none());
    }

    #[test]
    fn test_out_of_range_tab_is_noop() {
        let mut app = test_app();
        let effect = activate(&mut app, 9);
        assert_eq!(effect, Effect::None);
        assert!(app.nav.active_index.is_none());
    }

    #[test]
    fn test_fast_tab_never_shows_loading() {
        let mut app = test_app();
        for index in [0, 1] {
            let effect = activate(&mut app, index);
            assert!(matches!(effect, Effect::Load { .. }));
            assert!(!app.is_loading, "tab {index} must not set the indicator");
            finish_load(&mut app);
            assert!(!app.is_loading);
        }
    }

    #[test]
    fn test_slow_tab_shows_loading_until_completion() {
        let mut app = test_app();
        activate(&mut app, 3);
        assert!(app.is_loading);
        finish_load(&mut app);
        assert!(!app.is_loading);
        assert_eq!(app.content.as_ref().unwrap().url, "/news.html");
    }

    #[test]
    fn test_exactly_one_active_after_any_sequence() {
        let mut app = test_app();
        for index in [2, 0, 4, 1, 3] {
            activate(&mut app, index);
            finish_load(&mut app);
            let active = app.tabs.iter().filter(|tab| tab.active).count();
            assert_eq!(active, 1);
        }
        assert_eq!(app.nav.active_index, Some(3));
    }

    #[test]
    fn test_stale_completion_cannot_clear_younger_loading_flag() {
        let mut app = test_app();
        activate(&mut app, 2); // generation 1
        activate(&mut app, 3); // generation 2, still loading
        assert!(app.is_loading);

        update(
            &mut app,
            Action::PageLoaded {
                generation: 1,
                body: "old".to_string(),
            },
        );
        assert!(app.is_loading, "stale completion must be ignored");
        assert!(app.content.is_none());

        update(
            &mut app,
            Action::PageLoaded {
                generation: 2,
                body: "new".to_string(),
            },
        );
        assert!(!app.is_loading);
        assert_eq!(app.content.as_ref().unwrap().body, "new");
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut app = test_app();
        activate(&mut app, 2);
        activate(&mut app, 3);
        update(
            &mut app,
            Action::PageFailed {
                generation: 1,
                message: "timeout".to_string(),
            },
        );
        assert!(app.is_loading);
        assert!(app.overlays.is_empty());
    }

    #[test]
    fn test_failure_spawns_overlay_that_expires_after_3000ms() {
        let mut app = test_app();
        update(&mut app, Action::Tick { now_ms: 500 });
        activate(&mut app, 2);
        let generation = app.generation;
        update(
            &mut app,
            Action::PageFailed {
                generation,
                message: "connection refused".to_string(),
            },
        );
        assert!(!app.is_loading);
        assert_eq!(app.overlays.len(), 1);
        assert_eq!(app.overlays[0].message, LOAD_FAILURE_TEXT);
        assert_eq!(app.overlays[0].expires_at_ms, 3500);

        update(&mut app, Action::Tick { now_ms: 3499 });
        assert_eq!(app.overlays.len(), 1);
        update(&mut app, Action::Tick { now_ms: 3500 });
        assert!(app.overlays.is_empty());
    }

    #[test]
    fn test_rapid_failures_stack_overlays() {
        let mut app = test_app();
        activate(&mut app, 2);
        let generation = app.generation;
        update(
            &mut app,
            Action::PageFailed {
                generation,
                message: "one".to_string(),
            },
        );
        activate(&mut app, 3);
        let generation = app.generation;
        update(
            &mut app,
            Action::PageFailed {
                generation,
                message: "two".to_string(),
            },
        );
        assert_eq!(app.overlays.len(), 2);
    }

    #[test]
    fn test_welcome_stays_dismissed() {
        let mut app = test_app();
        assert!(!app.welcome_dismissed);
        activate(&mut app, 0);
        assert!(app.welcome_dismissed);
        finish_load(&mut app);
        activate(&mut app, 1);
        assert!(app.welcome_dismissed);
    }

    #[test]
    fn test_failed_then_idle_accepts_next_navigation() {
        let mut app = test_app();
        activate(&mut app, 2);
        let generation = app.generation;
        update(
            &mut app,
            Action::PageFailed {
                generation,
                message: "boom".to_string(),
            },
        );
        // No memory of the failure beyond the overlay itself.
        let effect = activate(&mut app, 3);
        assert!(matches!(effect, Effect::Load { generation: 2, .. }));
        assert!(app.is_loading);
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
