//! Keyboard input dispatch: overlays, then an open edit, then global keys,
//! then panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

const PAGE: isize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Search => {
            handle_search_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. An open cell edit owns the keyboard.
    if app.board.edit_session().is_some() {
        handle_edit_key(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(panel) = Panel::from_index(idx) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Char('?') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('p') => {
            app.toggle_ticks();
            return;
        }
        KeyCode::Char('/') => {
            app.search_backup = app.board.search().to_string();
            app.overlay = Overlay::Search;
            return;
        }
        KeyCode::Char('f') => {
            app.cycle_sector();
            return;
        }
        KeyCode::Char('c') => {
            app.clear_query();
            return;
        }
        KeyCode::Char('r') => {
            app.regenerate();
            return;
        }
        _ => {}
    }

    // 4. Panel-specific keys.
    match app.active_panel {
        Panel::Grid => handle_grid_key(app, key),
        Panel::Heatmap => handle_heatmap_key(app, key),
        Panel::Help => {}
    }
}

/// The heatmap shares the grid cursor; only row movement applies.
fn handle_heatmap_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Char('l') | KeyCode::Down | KeyCode::Right => app.move_row(1),
        KeyCode::Char('k') | KeyCode::Char('h') | KeyCode::Up | KeyCode::Left => app.move_row(-1),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Live search: every keystroke re-filters the board.
fn handle_search_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let previous = std::mem::take(&mut app.search_backup);
            app.board.set_search(&previous);
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            app.search_backup.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            let mut term = app.board.search().to_string();
            term.pop();
            app.board.set_search(&term);
        }
        KeyCode::Char(c) => {
            let mut term = app.board.search().to_string();
            term.push(c);
            app.board.set_search(&term);
        }
        _ => {}
    }
    app.cursor.row = 0;
    app.clamp_cursor();
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.board.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => {
            if let Some(draft) = app.board.draft_mut() {
                draft.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(draft) = app.board.draft_mut() {
                draft.push(c);
            }
        }
        _ => {}
    }
}

fn handle_grid_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_row(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_row(-1),
        KeyCode::PageDown => app.move_row(PAGE),
        KeyCode::PageUp => app.move_row(-PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.move_row(isize::MIN / 2),
        KeyCode::Char('G') | KeyCode::End => app.move_row(isize::MAX / 2),
        KeyCode::Char('h') | KeyCode::Left => app.move_column(-1),
        KeyCode::Char('l') | KeyCode::Right => app.move_column(1),
        KeyCode::Char(' ') => app.toggle_cursor_selection(),
        KeyCode::Char('a') => app.toggle_select_all(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('s') => app.sort_by_cursor_column(),
        KeyCode::Enter => app.begin_edit_at_cursor(),
        KeyCode::Char('n') => app.add_next(),
        KeyCode::Char('w') => app.export_selection(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use crossterm::event::KeyEventState;
    use tickerboard_core::domain::{Sector, Security};
    use tickerboard_core::{Board, SortDirection, SortField, StockRecord};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    fn app() -> AppState {
        let records = [("AAPL", "Apple Inc.", 10.0), ("XOM", "Exxon", 20.0), ("MSFT", "Microsoft", 30.0)]
            .iter()
            .map(|(s, n, p)| StockRecord::flat(&Security::new(s, n, Sector::Technology), *p, 4))
            .collect();
        AppState::new(
            Board::with_records(records),
            Duration::from_secs(60),
            PathBuf::from("."),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn welcome_dismissed_by_any_key() {
        let mut app = app();
        app.overlay = Overlay::Welcome;
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn release_events_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn live_search_filters_and_esc_restores() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        type_str(&mut app, "ms");
        assert_eq!(app.board.search(), "ms");
        assert_eq!(app.view_len(), 1);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.board.search(), "");
        assert_eq!(app.view_len(), 3);
    }

    #[test]
    fn edit_flow_through_keys() {
        let mut app = app();
        // Cursor on AAPL (symbol-ascending), move to the Price column.
        handle_key(&mut app, press(KeyCode::Char('l')));
        handle_key(&mut app, press(KeyCode::Char('l')));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.board.edit_session().map(|s| s.draft.as_str()), Some("10"));

        handle_key(&mut app, press(KeyCode::Backspace));
        handle_key(&mut app, press(KeyCode::Backspace));
        type_str(&mut app, "42.5");
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.board.edit_session().is_none());
        assert_eq!(app.board.get("AAPL").unwrap().price, 42.5);
    }

    #[test]
    fn quit_key_is_text_inside_edit() {
        let mut app = app();
        app.cursor.column = 2;
        handle_key(&mut app, press(KeyCode::Enter));
        // While editing, 'q' is text, not quit.
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.board.edit_session().unwrap().draft, "10q");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.board.edit_session().is_none());
        assert_eq!(app.board.get("AAPL").unwrap().price, 10.0);
    }

    #[test]
    fn sort_key_cycles_cursor_column() {
        let mut app = app();
        app.cursor.column = 2; // Price
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert_eq!(app.board.sort_spec().field, SortField::Price);
        assert_eq!(app.board.sort_spec().direction, SortDirection::Ascending);
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert_eq!(app.board.sort_spec().direction, SortDirection::Descending);
    }

    #[test]
    fn select_and_remove_via_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert!(app.board.is_selected("MSFT"));
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert!(app.board.get("MSFT").is_none());
        assert_eq!(app.view_len(), 2);
    }

    #[test]
    fn jump_keys_stay_in_bounds() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.cursor.row, 2);
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.cursor.row, 0);
        for _ in 0..20 {
            handle_key(&mut app, press(KeyCode::Char('h')));
        }
        assert_eq!(app.cursor.column, 0);
    }
}
