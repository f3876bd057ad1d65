//! Panel 3: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "/", "Search by name or symbol (live)");
    key(&mut lines, "f", "Cycle sector filter");
    key(&mut lines, "c", "Clear search and sector filter");
    key(&mut lines, "p", "Pause / resume live updates");
    key(&mut lines, "r", "Regenerate the board");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Watchlist");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "h / l", "Move cursor left / right");
    key(&mut lines, "g / G", "Jump to first / last row");
    key(&mut lines, "Space", "Toggle row selection");
    key(&mut lines, "a", "Select / deselect all visible rows");
    key(&mut lines, "x / Del", "Remove selected rows");
    key(&mut lines, "s", "Sort by column (asc, desc, off)");
    key(&mut lines, "Enter", "Edit cell; Enter commits, Esc cancels");
    key(&mut lines, "n", "Add the next catalog security");
    key(&mut lines, "w", "Export selected rows to CSV");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Heatmap");
    key(&mut lines, "j / k", "Move highlight");
    lines.push(Line::from(""));

    section(&mut lines, "Session");
    key(&mut lines, "Tick interval", &format!("{} ms", app.tick_interval.as_millis()));
    key(&mut lines, "Ticks applied", &app.ticks_applied.to_string());
    key(&mut lines, "Export folder", &app.export_dir.display().to_string());

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
