//! # Haptic Feedback
//!
//! Navigation emits a lightweight pulse when the host can provide one. The
//! capability is injected as a trait object rather than probed at call time,
//! so tests run with `None` and stay deterministic. Absence is never an
//! error.

use std::io::{Write, stdout};

pub trait Haptics: Send {
    /// Emit one short pulse. Best-effort; failures are swallowed.
    fn pulse(&self);
}

/// Pulse via the terminal bell (BEL). Terminals without an audible or visual
/// bell simply ignore it.
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&self) {
        let mut out = stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Build the capability from config: enabled → terminal bell, disabled →
/// none.
pub fn from_config(enabled: bool) -> Option<Box<dyn Haptics>> {
    enabled.then(|| Box::new(TerminalBell) as Box<dyn Haptics>)
}
