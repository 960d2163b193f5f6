use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::nav_bar::tab_areas;
use crate::tui::components::{ContentPane, NavBar, StatusBar, WelcomeScreen, error_overlay};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

const NAV_BAR_HEIGHT: u16 = 3;

/// Screen regions: status line on top, content in the middle, navigation
/// row at the bottom.
fn layout_areas(frame_area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(NAV_BAR_HEIGHT)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [status_area, main_area, nav_area] = layout_areas(frame.area());

    let mut status_bar = StatusBar {
        status_message: app.status_message.clone(),
        is_loading: app.is_loading,
        spinner_frame,
    };
    status_bar.render(frame, status_area);

    // Main area: the welcome screen until the first navigation, the content
    // pane afterwards.
    if app.welcome_dismissed {
        let mut pane = ContentPane {
            content: app.content.as_ref(),
            state: &mut tui.content_pane,
        };
        pane.render(frame, main_area);
    } else {
        let mut welcome = WelcomeScreen {
            cells: &app.welcome.cells,
            now_ms: app.clock_ms,
        };
        welcome.render(frame, main_area);
    }

    error_overlay::render_overlays(frame, main_area, &app.overlays);

    if !app.tabs.is_empty() {
        let mut nav_bar = NavBar {
            tabs: &app.tabs,
            attention: app.welcome.attention_active(),
            pulse_value: tui.pulse_value,
        };
        nav_bar.render(frame, nav_area);
    }
}

/// Hit test: given a click position, find which tab (if any) is under it.
pub fn hit_test_tab(col: u16, row: u16, frame_area: Rect, tab_count: usize) -> Option<usize> {
    let [_, _, nav_area] = layout_areas(frame_area);
    if row < nav_area.y || row >= nav_area.y + nav_area.height {
        return None;
    }
    tab_areas(nav_area, tab_count)
        .iter()
        .position(|cell| col >= cell.x && col < cell.x + cell.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use crate::tui::TuiState;
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
    fn test_draw_ui_welcome_phase() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        update(&mut app, Action::Tick { now_ms: 60_000 });
        let mut tui = TuiState::new();
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();
        let text = buffer_text(&terminal);
        // Welcome text fully revealed, all tabs visible.
        assert!(text.contains("Hi there"));
        assert!(text.contains("Home"));
        assert!(text.contains("Contact"));
    }

    #[test]
    fn test_draw_ui_after_navigation() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        update(&mut app, Action::ActivateTab(2));
        let generation = app.generation;
        update(
            &mut app,
            Action::PageLoaded {
                generation,
                body: "All the games".to_string(),
            },
        );
        let mut tui = TuiState::new();
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("All the games"));
        assert!(!text.contains("Hi there"));
    }

    #[test]
    fn test_hit_test_tab_in_nav_row() {
        let frame_area = Rect::new(0, 0, 80, 24);
        // Nav bar occupies the bottom three rows; five tabs of 16 columns.
        assert_eq!(hit_test_tab(0, 22, frame_area, 5), Some(0));
        assert_eq!(hit_test_tab(40, 21, frame_area, 5), Some(2));
        assert_eq!(hit_test_tab(79, 23, frame_area, 5), Some(4));
    }

    #[test]
    fn test_hit_test_outside_nav_row() {
        let frame_area = Rect::new(0, 0, 80, 24);
        assert_eq!(hit_test_tab(40, 10, frame_area, 5), None);
        assert_eq!(hit_test_tab(40, 22, frame_area, 0), None);
    }
}
