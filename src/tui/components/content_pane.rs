//! # Content Pane Component
//!
//! The single embedded display region. Shows the most recently fetched page
//! body as wrapped text inside a scroll view.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContentPaneState` lives in `TuiState`
//! - `ContentPane` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::PageContent;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent scroll state for the content pane.
#[derive(Default)]
pub struct ContentPaneState {
    pub scroll_state: ScrollViewState,
}

impl ContentPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top; a new page starts at its beginning.
    pub fn reset(&mut self) {
        self.scroll_state
            .set_offset(ratatui::layout::Position { x: 0, y: 0 });
    }
}

impl EventHandler for ContentPaneState {
    type Event = ();

    /// Route scroll events into the scroll view. `Some(())` when handled.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper for the content pane.
pub struct ContentPane<'a> {
    pub content: Option<&'a PageContent>,
    pub state: &'a mut ContentPaneState,
}

impl Component for ContentPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(content) = self.content else {
            let placeholder = Paragraph::new("Pick a tab below to get started.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        };

        let content_width = area.width.saturating_sub(1);
        let wrap_width = content_width.max(1) as usize;

        let lines: Vec<Line> = content
            .body
            .lines()
            .flat_map(|raw| {
                if raw.is_empty() {
                    vec![Line::raw("")]
                } else {
                    textwrap::wrap(raw, wrap_width)
                        .into_iter()
                        .map(|cow| Line::raw(cow.into_owned()))
                        .collect()
                }
            })
            .collect();

        let total_height = (lines.len() as u16).max(1);
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let paragraph = Paragraph::new(lines);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, total_height),
        );

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_placeholder_without_content() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ContentPaneState::new();
        let mut pane = ContentPane {
            content: None,
            state: &mut state,
        };
        terminal.draw(|f| pane.render(f, f.area())).unwrap();
        assert!(buffer_text(&terminal).contains("Pick a tab"));
    }

    #[test]
    fn test_renders_page_body() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let content = PageContent {
            url: "/news.html".to_string(),
            body: "Latest news\n\nNothing happened today.".to_string(),
        };
        let mut state = ContentPaneState::new();
        let mut pane = ContentPane {
            content: Some(&content),
            state: &mut state,
        };
        terminal.draw(|f| pane.render(f, f.area())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Latest news"));
        assert!(text.contains("Nothing happened today."));
    }

    #[test]
    fn test_scroll_events_are_handled() {
        let mut state = ContentPaneState::new();
        assert!(state.handle_event(&TuiEvent::ScrollDown).is_some());
        assert!(state.handle_event(&TuiEvent::ScrollUp).is_some());
        assert!(state.handle_event(&TuiEvent::Resize).is_none());
    }
}
