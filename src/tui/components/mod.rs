//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Stateless components receive their data as props each frame:
//! - `StatusBar`: top line with status text and loading spinner
//! - `NavBar`: bottom row of navigation tabs
//! - `WelcomeScreen`: the one-time typewriter reveal
//! - `error_overlay`: transient failure boxes
//!
//! `ContentPane` is stateful (scroll offset) and follows the persistent
//! state + transient wrapper pattern: `ContentPaneState` lives in `TuiState`
//! and a borrowing `ContentPane` is created each frame.
//!
//! Each component file contains its state types, rendering logic, and tests,
//! so one file tells the whole story of one piece of the screen.

pub mod content_pane;
pub mod error_overlay;
pub mod nav_bar;
pub mod status_bar;
pub mod welcome_screen;

pub use content_pane::{ContentPane, ContentPaneState};
pub use nav_bar::NavBar;
pub use status_bar::StatusBar;
pub use welcome_screen::WelcomeScreen;
