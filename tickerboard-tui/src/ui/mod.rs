//! Top-level UI layout: summary header, active panel, status bar.

pub mod grid_panel;
pub mod header;
pub mod heatmap_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
///
/// Takes the state mutably only so the grid can record how many rows fit.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Split: 1-line header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header_area = chunks[0];
    let main_area = chunks[1];
    let status_area = chunks[2];

    header::render(f, header_area, app);
    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Search => overlays::render_search(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &mut AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Grid => grid_panel::render(f, inner, app),
        Panel::Heatmap => heatmap_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tickerboard_core::{Board, BoardConfig};

    fn render_to_string(app: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> AppState {
        let mut config = BoardConfig::default();
        config.board.seed = Some(7);
        AppState::new(
            Board::new(&config),
            Duration::from_secs(60),
            PathBuf::from("."),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }

    #[test]
    fn every_panel_renders() {
        let mut app = app();
        for i in 0..Panel::COUNT {
            app.active_panel = Panel::from_index(i).unwrap();
            let screen = render_to_string(&mut app, 140, 30);
            assert!(screen.contains(app.active_panel.label()));
        }
    }

    #[test]
    fn grid_records_its_height() {
        let mut app = app();
        render_to_string(&mut app, 140, 20);
        // 20 rows minus header, status bar, borders and the column header.
        assert_eq!(app.grid_height, 15);
    }

    #[test]
    fn overlays_render_on_tiny_terminals() {
        let mut app = app();
        for overlay in [Overlay::Welcome, Overlay::ErrorHistory, Overlay::Search] {
            app.overlay = overlay;
            render_to_string(&mut app, 20, 6);
        }
    }
}
