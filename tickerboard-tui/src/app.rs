//! Application state: single-owner, main-thread only.
//!
//! All dashboard state lives here. The tick timer thread only signals over
//! `tick_rx`; every board mutation happens on the UI thread.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tickerboard_core::export;
use tickerboard_core::{Board, EditField, SelectAllState, SortField, TickDriver, TickEvent};

const ERROR_HISTORY_CAP: usize = 50;

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Grid,
    Heatmap,
    Help,
}

impl Panel {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Grid => 0,
            Panel::Heatmap => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Grid),
            1 => Some(Panel::Heatmap),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Grid => "Watchlist",
            Panel::Heatmap => "Heatmap",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Grid)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Grid)
    }
}

/// Grid columns, left to right. The checkbox column is not navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Symbol,
    Name,
    Price,
    Change,
    PercentChange,
    Volume,
    MarketCap,
    PeRatio,
    OneDayChange,
    Chart,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Symbol,
        Column::Name,
        Column::Price,
        Column::Change,
        Column::PercentChange,
        Column::Volume,
        Column::MarketCap,
        Column::PeRatio,
        Column::OneDayChange,
        Column::Chart,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Symbol => "Symbol",
            Column::Name => "Name",
            Column::Price => "Price",
            Column::Change => "Change",
            Column::PercentChange => "% Chg",
            Column::Volume => "Volume",
            Column::MarketCap => "Mkt Cap",
            Column::PeRatio => "P/E",
            Column::OneDayChange => "1D %",
            Column::Chart => "Trend",
        }
    }

    pub fn sort_field(self) -> Option<SortField> {
        match self {
            Column::Symbol => Some(SortField::Symbol),
            Column::Name => Some(SortField::Name),
            Column::Price => Some(SortField::Price),
            Column::Change => Some(SortField::Change),
            Column::PercentChange => Some(SortField::PercentChange),
            Column::Volume => Some(SortField::Volume),
            Column::MarketCap => Some(SortField::MarketCap),
            Column::PeRatio => Some(SortField::PeRatio),
            Column::OneDayChange => Some(SortField::OneDayChange),
            Column::Chart => None,
        }
    }

    pub fn edit_field(self) -> Option<EditField> {
        match self {
            Column::Price => Some(EditField::Price),
            Column::Change => Some(EditField::Change),
            Column::PercentChange => Some(EditField::PercentChange),
            Column::Volume => Some(EditField::Volume),
            Column::MarketCap => Some(EditField::MarketCap),
            Column::PeRatio => Some(EditField::PeRatio),
            Column::OneDayChange => Some(EditField::OneDayChange),
            Column::Symbol | Column::Name | Column::Chart => None,
        }
    }
}

/// Cursor over the sorted, filtered view.
#[derive(Debug, Clone, Default)]
pub struct GridCursor {
    pub row: usize,
    /// Index into [`Column::ALL`].
    pub column: usize,
    pub scroll_offset: usize,
}

impl GridCursor {
    pub fn column(&self) -> Column {
        Column::ALL[self.column.min(Column::ALL.len() - 1)]
    }

    /// Keep the row inside `0..row_count` and the viewport around it.
    pub fn clamp(&mut self, row_count: usize, visible_height: usize) {
        if row_count == 0 {
            self.row = 0;
            self.scroll_offset = 0;
            return;
        }
        self.row = self.row.min(row_count - 1);
        if self.row < self.scroll_offset {
            self.scroll_offset = self.row;
        } else if visible_height > 0 && self.row >= self.scroll_offset + visible_height {
            self.scroll_offset = self.row + 1 - visible_height;
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Board,
    Export,
    Ticker,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Input => "EDIT",
            ErrorCategory::Board => "BRD",
            ErrorCategory::Export => "CSV",
            ErrorCategory::Ticker => "TICK",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
    Search,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Board and grid
    pub board: Board,
    pub cursor: GridCursor,
    /// Rows the grid fit on the last draw; drives scrolling.
    pub grid_height: usize,

    // Ticking
    pub tick_rx: Receiver<TickEvent>,
    pub driver: Option<TickDriver>,
    pub tick_interval: Duration,
    pub last_tick: Option<TickEvent>,
    pub ticks_applied: u64,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    /// Search text before the overlay opened, restored on Esc.
    pub search_backup: String,

    // Paths
    pub state_path: PathBuf,
    pub export_dir: PathBuf,
}

impl AppState {
    /// Build the app around `board`. Ticking starts paused; call
    /// [`AppState::resume_ticks`] once the terminal is up.
    pub fn new(board: Board, tick_interval: Duration, state_path: PathBuf, export_dir: PathBuf) -> Self {
        let (_tx, tick_rx) = mpsc::channel();
        Self {
            active_panel: Panel::Grid,
            running: true,
            board,
            cursor: GridCursor::default(),
            grid_height: 0,
            tick_rx,
            driver: None,
            tick_interval,
            last_tick: None,
            ticks_applied: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            search_backup: String::new(),
            state_path,
            export_dir,
        }
    }

    // ── Ticking ────────────────────────────────────────────────────

    pub fn is_ticking(&self) -> bool {
        self.driver.is_some()
    }

    /// Start a fresh timer on a fresh channel. Anything still queued on the
    /// old channel is discarded.
    pub fn resume_ticks(&mut self) {
        if self.driver.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        match TickDriver::spawn(self.tick_interval, tx) {
            Ok(driver) => {
                self.tick_rx = rx;
                self.driver = Some(driver);
                info!(interval_ms = self.tick_interval.as_millis() as u64, "ticking resumed");
            }
            Err(e) => self.push_error(
                ErrorCategory::Ticker,
                format!("Failed to start tick timer: {e}"),
                String::new(),
            ),
        }
    }

    pub fn pause_ticks(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.stop();
            info!("ticking paused");
        }
    }

    pub fn toggle_ticks(&mut self) {
        if self.is_ticking() {
            self.pause_ticks();
            self.set_warning("Live updates paused");
        } else {
            self.resume_ticks();
            if self.is_ticking() {
                self.set_status("Live updates resumed");
            }
        }
    }

    /// Apply every queued tick. Returns how many were applied.
    pub fn drain_ticks(&mut self) -> usize {
        let events: Vec<TickEvent> = self.tick_rx.try_iter().collect();
        let n = events.len();
        for event in events {
            self.board.apply_tick();
            self.ticks_applied += 1;
            self.last_tick = Some(event);
        }
        if n > 0 {
            self.clamp_cursor();
        }
        n
    }

    // ── Grid ───────────────────────────────────────────────────────

    pub fn view_len(&self) -> usize {
        self.board.view().len()
    }

    pub fn clamp_cursor(&mut self) {
        let rows = self.view_len();
        self.cursor.clamp(rows, self.grid_height);
    }

    /// Symbol of the record under the cursor.
    pub fn cursor_symbol(&self) -> Option<String> {
        self.board
            .view()
            .get(self.cursor.row)
            .map(|r| r.symbol.clone())
    }

    pub fn move_row(&mut self, delta: isize) {
        let rows = self.view_len();
        if rows == 0 {
            return;
        }
        let row = self.cursor.row as isize + delta;
        self.cursor.row = row.clamp(0, rows as isize - 1) as usize;
        self.clamp_cursor();
    }

    pub fn move_column(&mut self, delta: isize) {
        let last = Column::ALL.len() as isize - 1;
        self.cursor.column = (self.cursor.column as isize + delta).clamp(0, last) as usize;
    }

    pub fn toggle_cursor_selection(&mut self) {
        if let Some(symbol) = self.cursor_symbol() {
            let included = !self.board.is_selected(&symbol);
            self.board.toggle_select(&symbol, included);
        }
    }

    /// Header checkbox: select every visible row unless all already are.
    pub fn toggle_select_all(&mut self) {
        let select = self.board.selection_state() != SelectAllState::All;
        self.board.select_all(select);
    }

    pub fn remove_selected(&mut self) {
        let count = self.board.selected_count();
        if count == 0 {
            self.set_warning("Nothing selected");
            return;
        }
        let removed = self.board.remove_selected();
        self.clamp_cursor();
        self.set_status(format!("Removed {removed} record(s)"));
    }

    pub fn sort_by_cursor_column(&mut self) {
        match self.cursor.column().sort_field() {
            Some(field) => {
                let spec = self.board.cycle_sort(field);
                self.set_status(format!("Sort: {spec}"));
            }
            None => self.set_warning("This column is not sortable"),
        }
    }

    pub fn begin_edit_at_cursor(&mut self) {
        let Some(field) = self.cursor.column().edit_field() else {
            self.set_warning(format!("{} is not editable", self.cursor.column().header()));
            return;
        };
        let Some(symbol) = self.cursor_symbol() else {
            return;
        };
        if let Err(e) = self.board.begin_edit(&symbol, field) {
            self.push_error(ErrorCategory::Board, e.to_string(), symbol);
        }
    }

    pub fn commit_edit(&mut self) {
        match self.board.commit_edit() {
            Ok(Some(applied)) => {
                self.set_status(format!(
                    "{} {} = {}",
                    applied.symbol, applied.field, applied.value
                ));
            }
            Ok(None) => {}
            Err(e) => {
                let context = self
                    .board
                    .edit_session()
                    .map(|s| format!("{} {}", s.symbol, s.field))
                    .unwrap_or_default();
                self.push_error(ErrorCategory::Input, e.to_string(), context);
            }
        }
    }

    pub fn add_next(&mut self) {
        match self.board.add_next() {
            Ok(symbol) => self.set_status(format!("Added {symbol}")),
            Err(e) => self.set_warning(e.to_string()),
        }
    }

    pub fn regenerate(&mut self) {
        self.board.regenerate();
        self.cursor = GridCursor {
            column: self.cursor.column,
            ..GridCursor::default()
        };
        self.set_status("Board refreshed");
    }

    pub fn cycle_sector(&mut self) {
        let sector = self.board.cycle_sector();
        self.cursor.row = 0;
        self.clamp_cursor();
        self.set_status(format!("Sector: {sector}"));
    }

    pub fn clear_query(&mut self) {
        self.board.clear_query();
        self.clamp_cursor();
        self.set_status("Filters cleared");
    }

    /// Write the selection to a timestamped CSV in the export dir.
    pub fn export_selection(&mut self) {
        if self.board.selected_count() == 0 {
            self.set_warning("Select rows before exporting");
            return;
        }
        let name = format!("tickerboard-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir.join(name);
        match export::write_selection_csv(&path, self.board.records(), self.board.controller().selection()) {
            Ok(rows) => self.set_status(format!("Exported {rows} row(s) to {}", path.display())),
            Err(e) => self.push_error(ErrorCategory::Export, e.to_string(), path.display().to_string()),
        }
    }

    // ── Status ─────────────────────────────────────────────────────

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        warn!(category = category.label(), %message, %context, "ui error");
        let record = ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "status");
        self.status_message = Some((msg, StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerboard_core::domain::{Sector, Security};
    use tickerboard_core::StockRecord;

    fn app_with(symbols: &[&str]) -> AppState {
        let records = symbols
            .iter()
            .map(|s| StockRecord::flat(&Security::new(s, s, Sector::Technology), 10.0, 4))
            .collect();
        AppState::new(
            Board::with_records(records),
            Duration::from_millis(5),
            PathBuf::from("."),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Grid.next(), Panel::Heatmap);
        assert_eq!(Panel::Help.next(), Panel::Grid);
        assert_eq!(Panel::Grid.prev(), Panel::Help);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..Panel::COUNT {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(Panel::COUNT).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = app_with(&["A"]);
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn columns_map_to_fields() {
        assert_eq!(Column::Chart.sort_field(), None);
        assert_eq!(Column::Name.edit_field(), None);
        assert_eq!(Column::Volume.edit_field(), Some(EditField::Volume));
        let editable = Column::ALL.iter().filter(|c| c.edit_field().is_some()).count();
        assert_eq!(editable, EditField::ALL.len());
    }

    #[test]
    fn cursor_clamps_after_removal() {
        let mut app = app_with(&["A", "B", "C"]);
        app.cursor.row = 2;
        app.board.toggle_select("C", true);
        app.remove_selected();
        assert_eq!(app.cursor.row, 1);
    }

    #[test]
    fn grid_cursor_scrolls_into_view() {
        let mut cursor = GridCursor {
            row: 12,
            ..GridCursor::default()
        };
        cursor.clamp(20, 5);
        assert_eq!(cursor.scroll_offset, 8);
        cursor.row = 3;
        cursor.clamp(20, 5);
        assert_eq!(cursor.scroll_offset, 3);
        cursor.clamp(0, 5);
        assert_eq!(cursor.row, 0);
    }

    #[test]
    fn invalid_edit_goes_to_error_history() {
        let mut app = app_with(&["A"]);
        app.cursor.column = 2; // Price
        app.begin_edit_at_cursor();
        app.board.update_draft("abc");
        app.commit_edit();
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
        assert!(app.board.edit_session().is_some());
    }

    #[test]
    fn toggle_select_all_flips() {
        let mut app = app_with(&["A", "B"]);
        app.toggle_select_all();
        assert_eq!(app.board.selected_count(), 2);
        app.toggle_select_all();
        assert_eq!(app.board.selected_count(), 0);
    }

    #[test]
    fn pause_and_resume_swap_channels() {
        let mut app = app_with(&["A"]);
        app.resume_ticks();
        assert!(app.is_ticking());
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while app.ticks_applied == 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.drain_ticks();
        }
        assert!(app.ticks_applied > 0);
        app.toggle_ticks();
        assert!(!app.is_ticking());
        // Residual ticks on the old channel are still drained, then it is dead.
        app.drain_ticks();
        let before = app.ticks_applied;
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(app.drain_ticks(), 0);
        assert_eq!(app.ticks_applied, before);
    }

    #[test]
    fn export_writes_into_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&["A", "B"]);
        app.export_dir = dir.path().to_path_buf();
        app.export_selection();
        assert_eq!(app.status_message.as_ref().map(|(_, l)| *l), Some(StatusLevel::Warning));

        app.board.toggle_select("B", true);
        app.export_selection();
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
