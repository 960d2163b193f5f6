//! # StatusBar Component
//!
//! Top line showing the app name, the status message, and a spinner while a
//! page transition is in flight. Stateless; all props come from core state
//! plus the frame counter maintained by the event loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusBar {
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = if self.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            format!("Kiosk | {} {}", self.status_message, spinner)
        } else if self.status_message.is_empty() {
            String::from("Kiosk")
        } else {
            format!("Kiosk | {}", self.status_message)
        };
        frame.render_widget(Span::raw(text), area);
    }
}
