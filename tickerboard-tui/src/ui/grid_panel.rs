//! Panel 1: the watchlist grid. Checkbox column, sortable headers, inline
//! edit cell and a sparkline per row.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use tickerboard_core::format::{
    format_currency, format_market_cap, format_pe_ratio, format_signed_percentage, format_volume,
};
use tickerboard_core::{SelectAllState, StockRecord};

use crate::app::{AppState, Column};
use crate::theme;
use crate::ui::widgets::sparkline::sparkline;

const SPARK_WIDTH: usize = 12;

pub fn render(f: &mut Frame, area: Rect, app: &mut AppState) {
    // Everything below the column header is data rows.
    app.grid_height = area.height.saturating_sub(1) as usize;
    app.clamp_cursor();

    let app = &*app;
    let view = app.board.view();
    if view.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let header = header_row(app);
    let editing = app.board.edit_session();
    let rows: Vec<Row> = view
        .iter()
        .enumerate()
        .skip(app.cursor.scroll_offset)
        .take(app.grid_height)
        .map(|(i, record)| {
            let is_cursor_row = i == app.cursor.row;
            let checkbox = if app.board.is_selected(&record.symbol) { "[x]" } else { "[ ]" };
            let mut cells = vec![Cell::from(Span::styled(checkbox, theme::accent()))];

            for (col_idx, column) in Column::ALL.iter().enumerate() {
                let is_edit_cell = editing.is_some_and(|s| {
                    column.edit_field().is_some_and(|field| s.targets(&record.symbol, field))
                });
                let cell = if is_edit_cell {
                    let draft = editing.map(|s| s.draft.as_str()).unwrap_or_default();
                    Cell::from(Line::from(vec![
                        Span::styled(draft.to_string(), theme::editing_cell()),
                        Span::styled("▏", theme::warning()),
                    ]))
                } else {
                    let (text, mut style) = cell_text(*column, record);
                    if is_cursor_row && col_idx == app.cursor.column {
                        style = theme::cursor_cell();
                    }
                    Cell::from(Line::from(Span::styled(text, style)).alignment(alignment(*column)))
                };
                cells.push(cell);
            }

            let row = Row::new(cells);
            if is_cursor_row {
                row.style(theme::cursor_row())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(rows, widths()).header(header).column_spacing(1);
    f.render_widget(table, area);
}

fn header_row(app: &AppState) -> Row<'static> {
    let checkbox = match app.board.selection_state() {
        SelectAllState::None => "[ ]",
        SelectAllState::Some => "[-]",
        SelectAllState::All => "[x]",
    };
    let spec = app.board.sort_spec();

    let mut cells = vec![Cell::from(Span::styled(checkbox, theme::accent_bold()))];
    for column in Column::ALL {
        let sorted_here = spec.is_active() && column.sort_field() == Some(spec.field);
        let label = if sorted_here {
            format!("{}{}", column.header(), spec.direction.indicator())
        } else {
            column.header().to_string()
        };
        let style = if sorted_here { theme::accent_bold() } else { theme::neutral() };
        cells.push(Cell::from(Line::from(Span::styled(label, style)).alignment(alignment(column))));
    }
    Row::new(cells)
}

/// Display text and style for one cell.
fn cell_text(column: Column, record: &StockRecord) -> (String, Style) {
    match column {
        Column::Symbol => (record.symbol.clone(), theme::accent_bold()),
        Column::Name => (record.name.clone(), theme::text()),
        Column::Price => (format_currency(record.price), theme::text()),
        Column::Change => {
            let text = if record.change > 0.0 {
                format!("+{}", format_currency(record.change))
            } else {
                format_currency(record.change)
            };
            (text, theme::change_style(record.change))
        }
        Column::PercentChange => (
            format_signed_percentage(record.percent_change),
            theme::change_style(record.percent_change),
        ),
        Column::Volume => (format_volume(record.volume), theme::muted()),
        Column::MarketCap => (format_market_cap(record.market_cap), theme::neutral()),
        Column::PeRatio => (format_pe_ratio(record.pe_ratio), theme::text()),
        Column::OneDayChange => (
            format_signed_percentage(record.one_day_change),
            theme::change_style(record.one_day_change),
        ),
        Column::Chart => (
            sparkline(&record.chart_data, SPARK_WIDTH),
            theme::change_style(record.change),
        ),
    }
}

fn alignment(column: Column) -> Alignment {
    match column {
        Column::Symbol | Column::Name | Column::Chart => Alignment::Left,
        _ => Alignment::Right,
    }
}

fn widths() -> Vec<Constraint> {
    let mut widths = vec![Constraint::Length(3)];
    widths.extend(Column::ALL.iter().map(|c| match c {
        Column::Symbol => Constraint::Length(6),
        Column::Name => Constraint::Min(14),
        Column::Price => Constraint::Length(10),
        Column::Change => Constraint::Length(9),
        Column::PercentChange => Constraint::Length(8),
        Column::Volume => Constraint::Length(8),
        Column::MarketCap => Constraint::Length(9),
        Column::PeRatio => Constraint::Length(7),
        Column::OneDayChange => Constraint::Length(8),
        Column::Chart => Constraint::Length(SPARK_WIDTH as u16),
    }));
    widths
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let message = if app.board.is_empty() {
        "The board is empty. Press [n] to add a security or [r] to regenerate."
    } else {
        "No records match the current filters. Press [c] to clear them."
    };
    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::muted())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerboard_core::domain::{Sector, Security};

    fn record() -> StockRecord {
        let mut r = StockRecord::flat(&Security::new("AAPL", "Apple Inc.", Sector::Technology), 187.5, 4);
        r.change = 1.25;
        r.percent_change = -0.5;
        r.volume = 2_500_000;
        r.market_cap = 2_900.0;
        r
    }

    #[test]
    fn cells_use_shared_formatters() {
        let r = record();
        assert_eq!(cell_text(Column::Price, &r).0, "$187.50");
        assert_eq!(cell_text(Column::Change, &r).0, "+$1.25");
        assert_eq!(cell_text(Column::PercentChange, &r).0, "-0.50%");
        assert_eq!(cell_text(Column::Volume, &r).0, "2.5M");
        assert_eq!(cell_text(Column::MarketCap, &r).0, "2.90T");
        assert_eq!(cell_text(Column::PeRatio, &r).0, "-");
    }

    #[test]
    fn change_cells_coloured_by_sign() {
        let r = record();
        assert_eq!(cell_text(Column::Change, &r).1, theme::positive());
        assert_eq!(cell_text(Column::PercentChange, &r).1, theme::negative());
    }

    #[test]
    fn one_width_per_column_plus_checkbox() {
        assert_eq!(widths().len(), Column::ALL.len() + 1);
    }
}
