//! Panel 2: heatmap. One tile per visible record in view order, coloured by
//! percent change.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tickerboard_core::format::{format_currency, format_signed_percentage};

use crate::app::AppState;
use crate::theme;

const TILE_WIDTH: u16 = 14;
const TILE_HEIGHT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.board.view();
    if view.is_empty() {
        let para = Paragraph::new(Span::styled("Nothing to show.", theme::muted()));
        f.render_widget(para, area);
        return;
    }

    let cursor_symbol = app.cursor_symbol();
    let first = first_visible(area, app.cursor.row);
    for (i, record) in view.iter().enumerate().skip(first) {
        let Some(tile) = tile_rect(area, i - first) else {
            break;
        };
        let mut style = Style::default()
            .bg(theme::heat_color(record.percent_change))
            .fg(theme::TEXT_PRIMARY);
        if cursor_symbol.as_deref() == Some(record.symbol.as_str()) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let lines = vec![
            Line::from(Span::styled(record.symbol.clone(), style.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(format_signed_percentage(record.percent_change), style)),
            Line::from(Span::styled(format_currency(record.price), style)),
        ];
        let para = Paragraph::new(lines)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(para, tile);
    }
}

fn tiles_per_row(area: Rect) -> usize {
    (area.width / (TILE_WIDTH + 1)).max(1) as usize
}

/// Index of the first drawn tile: whole tile rows scroll so the cursor's
/// tile is always on screen.
fn first_visible(area: Rect, cursor: usize) -> usize {
    let per_row = tiles_per_row(area);
    let rows_fit = ((area.height + 1) / (TILE_HEIGHT + 1)).max(1) as usize;
    let cursor_row = cursor / per_row;
    cursor_row.saturating_sub(rows_fit - 1) * per_row
}

/// Rect of the `index`th drawn tile, or `None` once tiles no longer fit.
fn tile_rect(area: Rect, index: usize) -> Option<Rect> {
    let per_row = tiles_per_row(area);
    let row = (index / per_row) as u16;
    let col = (index % per_row) as u16;
    let y = area.y + row * (TILE_HEIGHT + 1);
    if y + TILE_HEIGHT > area.y + area.height {
        return None;
    }
    let x = area.x + col * (TILE_WIDTH + 1);
    let width = TILE_WIDTH.min(area.x + area.width - x);
    Some(Rect::new(x, y, width, TILE_HEIGHT))
}
