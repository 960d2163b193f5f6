//! # NavBar Component
//!
//! Bottom row of navigation tabs. Stateless: receives the tab list, the
//! attention flag, and a pulse value as props and renders one bordered cell
//! per tab. The active tab is highlighted; while the welcome animation's
//! attention window is open the whole row glows in sync with the pulse.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::NavTab;
use crate::tui::component::Component;

pub struct NavBar<'a> {
    pub tabs: &'a [NavTab],
    /// True while the welcome animation's attention window is open.
    pub attention: bool,
    /// 0.0..=1.0, drives the attention glow blink.
    pub pulse_value: f32,
}

/// Split the nav area into one equal-width cell per tab.
///
/// Shared with mouse hit testing in `ui.rs` so clicks land on exactly the
/// cell that was drawn.
pub fn tab_areas(area: Rect, tab_count: usize) -> Vec<Rect> {
    if tab_count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, tab_count as u32); tab_count];
    Layout::horizontal(constraints).split(area).to_vec()
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let glow = self.attention && self.pulse_value > 0.5;

        for (tab, cell) in self.tabs.iter().zip(tab_areas(area, self.tabs.len())) {
            let border_style = if glow {
                Style::default().fg(Color::Yellow)
            } else if tab.active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let label_style = if tab.active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let inner_width = cell.width.saturating_sub(2) as usize;
            let label = truncate_label(&tab.label, inner_width);

            let paragraph = Paragraph::new(label)
                .style(label_style)
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(border_style));
            frame.render_widget(paragraph, cell);
        }
    }
}

/// Truncate a label to fit `max_width` display columns, adding "…" if needed.
fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    let mut out = String::new();
    for ch in label.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
