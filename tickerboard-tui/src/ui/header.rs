//! One-line summary header: gainer/loser badges, traded value, active filters
//! and the live/paused indicator.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tickerboard_core::format::format_compact_currency;
use tickerboard_core::SectorFilter;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let para = Paragraph::new(Line::from(spans(app)));
    f.render_widget(para, area);
}

fn spans(app: &AppState) -> Vec<Span<'static>> {
    let summary = app.board.summary();
    let mut spans = vec![
        Span::styled(" TICKERBOARD ", theme::accent_bold()),
        Span::styled(format!("▲ {} ", summary.gainers), theme::positive()),
        Span::styled(format!("▼ {} ", summary.losers), theme::negative()),
        Span::styled(format!("= {} ", summary.unchanged), theme::muted()),
        Span::styled(" Value ", theme::muted()),
        Span::styled(format_compact_currency(summary.traded_value), theme::text()),
        Span::styled(
            format!("  Showing {}/{}", summary.visible, summary.total),
            theme::muted(),
        ),
    ];

    if let SectorFilter::Only(sector) = app.board.sector() {
        spans.push(Span::styled("  Sector: ", theme::muted()));
        spans.push(Span::styled(sector.to_string(), theme::neutral()));
    }
    if !app.board.search().is_empty() {
        spans.push(Span::styled("  Search: ", theme::muted()));
        spans.push(Span::styled(format!("\"{}\"", app.board.search()), theme::neutral()));
    }
    let selected = app.board.selected_count();
    if selected > 0 {
        spans.push(Span::styled(format!("  {selected} selected"), theme::accent()));
    }

    if app.is_ticking() {
        spans.push(Span::styled("  ● LIVE", theme::positive()));
    } else {
        spans.push(Span::styled("  ❚❚ PAUSED", theme::warning()));
    }
    if let Some(tick) = &app.last_tick {
        spans.push(Span::styled(
            format!(" #{} {}", tick.seq, tick.at.format("%H:%M:%S")),
            theme::muted(),
        ));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use tickerboard_core::domain::{Sector, Security};
    use tickerboard_core::{Board, StockRecord};

    fn text(app: &AppState) -> String {
        spans(app).iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn shows_badges_and_filters() {
        let mut up = StockRecord::flat(&Security::new("UP", "Up Co", Sector::Energy), 10.0, 2);
        up.change = 1.0;
        up.volume = 1_000_000;
        let down = StockRecord {
            change: -1.0,
            ..StockRecord::flat(&Security::new("DN", "Down Co", Sector::Finance), 5.0, 2)
        };
        let mut app = AppState::new(
            Board::with_records(vec![up, down]),
            Duration::from_secs(60),
            PathBuf::from("."),
            std::env::temp_dir(),
        );
        let line = text(&app);
        assert!(line.contains("▲ 1"));
        assert!(line.contains("▼ 1"));
        assert!(line.contains("$10.0M"));
        assert!(line.contains("PAUSED"));

        app.board.set_search("co");
        app.board.set_sector(SectorFilter::Only(Sector::Energy));
        let line = text(&app);
        assert!(line.contains("Sector: Energy"));
        assert!(line.contains("Search: \"co\""));
        assert!(line.contains("Showing 1/2"));
    }
}
