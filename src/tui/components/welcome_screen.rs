//! # Welcome Screen Component
//!
//! Renders the sequenced welcome message, revealing one character at a time.
//! Purely a view: which characters are visible falls out of comparing each
//! cell's delay against the app clock, so the component itself keeps no
//! timing state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::welcome::{MessageNode, REVEAL_ANIM_MS};
use crate::tui::component::Component;

pub struct WelcomeScreen<'a> {
    pub cells: &'a [MessageNode],
    pub now_ms: u64,
}

impl WelcomeScreen<'_> {
    /// Build one styled line per message row. Hidden characters render as
    /// spaces so the layout doesn't shift while the text reveals.
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Vec::new()];
        for cell in self.cells {
            match cell {
                MessageNode::LineBreak => lines.push(Vec::new()),
                MessageNode::Space => {
                    if let Some(line) = lines.last_mut() {
                        line.push(Span::raw(" "));
                    }
                }
                MessageNode::Unit(unit) => {
                    let span = if self.now_ms < unit.delay_ms {
                        Span::raw(" ")
                    } else {
                        let revealing = self.now_ms < unit.delay_ms + REVEAL_ANIM_MS;
                        let mut style = if unit.emphasized {
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        if revealing {
                            style = style.add_modifier(Modifier::DIM);
                        }
                        Span::styled(unit.ch.to_string(), style)
                    };
                    if let Some(line) = lines.last_mut() {
                        line.push(span);
                    }
                }
                // Text/Emphasis never survive sequencing.
                _ => {}
            }
        }
        lines.into_iter().map(Line::from).collect()
    }
}

impl Component for WelcomeScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let text_height = lines.len() as u16;

        let [center] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::welcome::{parse_message, sequence};
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
    fn test_everything_visible_after_reveal() {
        let cells = sequence(parse_message("Hi there"));
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = WelcomeScreen {
            cells: &cells,
            now_ms: 10_000,
        };
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        assert!(buffer_text(&terminal).contains("Hi there"));
    }

    #[test]
    fn test_unrevealed_characters_hidden_at_start() {
        let cells = sequence(parse_message("Hi there"));
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        // At t=0 only the first unit (delay 0) is visible.
        let mut screen = WelcomeScreen {
            cells: &cells,
            now_ms: 0,
        };
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains('H'));
        assert!(!text.contains("Hi there"));
    }

    #[test]
    fn test_line_breaks_produce_multiple_lines() {
        let cells = sequence(parse_message("ab\ncd"));
        let screen = WelcomeScreen {
            cells: &cells,
            now_ms: 10_000,
        };
        assert_eq!(screen.lines().len(), 2);
    }
}
