//! Bottom status bar: panel hints, edit prompt or last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Panel hints
    spans.push(Span::styled(" 1:Watchlist 2:Heatmap 3:Help", theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some(session) = app.board.edit_session() {
        spans.push(Span::styled(
            format!("Editing {} {}: ", session.symbol, session.field),
            theme::warning(),
        ));
        spans.push(Span::styled(session.draft.as_str(), theme::editing_cell()));
        spans.push(Span::styled("  [Enter]save [Esc]cancel", theme::muted()));
    } else if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
