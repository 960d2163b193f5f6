//! # Error Overlay Component
//!
//! Transient failure boxes floated over the content region. Each overlay
//! removes itself when its deadline passes (handled in the core reducer);
//! this component only draws whatever is currently alive. Several overlays
//! may be on screen at once and stack downwards.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::state::ErrorOverlay;

const OVERLAY_HEIGHT: u16 = 3;

/// Draw all live overlays over `area`, newest below older ones.
pub fn render_overlays(frame: &mut Frame, area: Rect, overlays: &[ErrorOverlay]) {
    for (stack_index, overlay) in overlays.iter().enumerate() {
        let rect = overlay_rect(area, stack_index as u16);
        if rect.height == 0 {
            break;
        }
        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(overlay.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(paragraph, rect);
    }
}

/// A centered box, shifted down by `stack_index` slots.
fn overlay_rect(outer: Rect, stack_index: u16) -> Rect {
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .areas(outer);

    let y = outer.y + outer.height / 3 + stack_index * OVERLAY_HEIGHT;
    if y + OVERLAY_HEIGHT > outer.y + outer.height {
        return Rect::new(center.x, y, center.width, 0);
    }
    Rect::new(center.x, y, center.width, OVERLAY_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn overlay(message: &str) -> ErrorOverlay {
        ErrorOverlay {
            message: message.to_string(),
            expires_at_ms: 3000,
        }
    }

    #[test]
    fn test_overlay_is_drawn() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let overlays = vec![overlay("Couldn't load this page.")];
        terminal
            .draw(|f| render_overlays(f, f.area(), &overlays))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Couldn't load this page."));
    }

    #[test]
    fn test_stacked_overlays_occupy_distinct_rows() {
        let area = Rect::new(0, 0, 60, 20);
        let first = overlay_rect(area, 0);
        let second = overlay_rect(area, 1);
        assert_eq!(second.y, first.y + OVERLAY_HEIGHT);
        assert_eq!(first.width, second.width);
    }

    #[test]
    fn test_overflowing_stack_is_clipped() {
        let area = Rect::new(0, 0, 60, 8);
        let rect = overlay_rect(area, 5);
        assert_eq!(rect.height, 0);
    }
}
