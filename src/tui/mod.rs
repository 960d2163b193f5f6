//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (welcome reveal, loading spinner, live overlays): draws
//!   every ~80ms for smooth animation.
//! - **Idle** (page shown, nothing in flight): sleeps up to 500ms, only
//!   redraws on events or terminal resize.
//!
//! Core timers (welcome schedule, overlay expiry) are driven by a `Tick`
//! action carrying the elapsed milliseconds since startup, sent once per
//! loop iteration. Fetches run on tokio tasks and report back through a
//! `std::sync::mpsc` channel as generation-tagged actions.

pub mod component;
pub mod components;
pub mod event;
pub mod haptics;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::tui::component::EventHandler;
use crate::tui::components::ContentPaneState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::haptics::Haptics;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub content_pane: ContentPaneState,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            content_pane: ContentPaneState::new(),
            pulse_value: 0.0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Build the production fetcher from a resolved config.
pub fn build_fetcher(config: &ResolvedConfig) -> Arc<dyn PageFetcher> {
    Arc::new(HttpFetcher::new(
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fetcher = build_fetcher(&config);
    let haptics = haptics::from_config(config.haptics);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background fetch tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let elapsed = start_time.elapsed();
        let now_ms = elapsed.as_millis() as u64;

        // Advance core timers (welcome schedule, overlay expiry)
        update(&mut app, Action::Tick { now_ms });

        // Determine if animations are running (welcome reveal, spinner,
        // attention glow, overlays counting down)
        let animating = app.is_loading
            || !app.welcome_dismissed
            || !app.overlays.is_empty()
            || app.welcome.attention_active();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed_secs = elapsed.as_secs_f32();
            tui.pulse_value = (elapsed_secs * 5.0).sin() * 0.5 + 0.5;
            let spinner_frame = (elapsed_secs * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Quit keys always quit
            if matches!(tui_event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Scroll events go to the content pane
            if tui.content_pane.handle_event(&tui_event).is_some() {
                continue;
            }

            let action = match tui_event {
                TuiEvent::SelectTab(index) => Some(Action::ActivateTab(index)),
                TuiEvent::MouseClick(col, row) => {
                    let frame_area = terminal.get_frame().area();
                    ui::hit_test_tab(col, row, frame_area, app.tabs.len())
                        .map(Action::ActivateTab)
                }
                _ => None,
            };

            if let Some(action) = action {
                let effect = update(&mut app, action);
                run_effect(effect, &fetcher, haptics.as_deref(), &tx);
            }
        }

        if should_quit {
            break;
        }

        // Handle background fetch results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::PageLoaded { generation, .. } if generation == app.generation)
            {
                // New page starts at the top
                tui.content_pane.reset();
            }
            let effect = update(&mut app, action);
            run_effect(effect, &fetcher, haptics.as_deref(), &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

fn run_effect(
    effect: Effect,
    fetcher: &Arc<dyn PageFetcher>,
    haptics: Option<&dyn Haptics>,
    tx: &mpsc::Sender<Action>,
) {
    match effect {
        Effect::Load { url, generation } => {
            // Best-effort pulse; absence of the capability is fine
            if let Some(haptics) = haptics {
                haptics.pulse();
            }
            spawn_fetch(fetcher.clone(), url, generation, tx.clone());
        }
        Effect::Quit | Effect::None => {}
    }
}

fn spawn_fetch(
    fetcher: Arc<dyn PageFetcher>,
    url: String,
    generation: u64,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning fetch for {} (generation {}, via {})",
        url,
        generation,
        fetcher.name()
    );
    tokio::spawn(async move {
        let action = match fetcher.fetch(&url).await {
            Ok(body) => Action::PageLoaded { generation, body },
            Err(e) => {
                warn!("Fetch of {} failed: {}", url, e);
                Action::PageFailed {
                    generation,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!(
                "Failed to report fetch result for generation {}: receiver dropped",
                generation
            );
        }
    });
}
