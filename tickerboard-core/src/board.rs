//! Board: the record collection plus query and grid state.
//!
//! This is the single object a view talks to. It owns the full collection,
//! derives the visible set from the current search term and sector filter,
//! and forwards grid gestures to the [`GridController`].

use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::controller::{AppliedEdit, GridController, SelectAllState};
use crate::domain::{EditField, Sector, Security, SortField, StockRecord};
use crate::edit::{EditError, EditSession};
use crate::filter::{self, SectorFilter};
use crate::generator;
use crate::sort::SortSpec;
use crate::tick::{self, TickParams};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("symbol '{0}' is already on the board")]
    DuplicateSymbol(String),
    #[error("no record with symbol '{0}'")]
    UnknownSymbol(String),
    #[error("every catalog security is already on the board")]
    CatalogExhausted,
}

/// Header badges computed over the visible set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub visible: usize,
    pub total: usize,
    pub gainers: usize,
    pub losers: usize,
    pub unchanged: usize,
    /// Σ price × volume.
    pub traded_value: f64,
}

#[derive(Debug, Clone)]
pub struct Board {
    records: Vec<StockRecord>,
    controller: GridController,
    search: String,
    sector: SectorFilter,
    catalog: Vec<Security>,
    seed_count: usize,
    chart_len: usize,
    tick_params: TickParams,
    rng: StdRng,
}

impl Board {
    /// Seed a board from config.
    pub fn new(config: &BoardConfig) -> Self {
        let mut rng = generator::make_rng(config.board.seed);
        let catalog = config.catalog();
        let records = generator::generate_board(
            &catalog,
            config.board.seed_count,
            config.board.chart_len,
            &mut rng,
        );
        info!(records = records.len(), catalog = catalog.len(), "board seeded");
        Self {
            records,
            controller: GridController::new(),
            search: String::new(),
            sector: SectorFilter::All,
            catalog,
            seed_count: config.board.seed_count,
            chart_len: config.board.chart_len,
            tick_params: config.tick.params(),
            rng,
        }
    }

    /// Board over an explicit collection, with default settings otherwise.
    pub fn with_records(records: Vec<StockRecord>) -> Self {
        let config = BoardConfig::default();
        Self {
            seed_count: records.len(),
            chart_len: records
                .first()
                .map_or(config.board.chart_len, |r| r.chart_data.len()),
            records,
            controller: GridController::new(),
            search: String::new(),
            sector: SectorFilter::All,
            catalog: config.catalog(),
            tick_params: config.tick.params(),
            rng: generator::make_rng(Some(0)),
        }
    }

    // ── Collection ─────────────────────────────────────────────────

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.symbol == symbol)
    }

    pub fn add_record(&mut self, record: StockRecord) -> Result<(), BoardError> {
        if self.get(&record.symbol).is_some() {
            warn!(symbol = %record.symbol, "rejected duplicate record");
            return Err(BoardError::DuplicateSymbol(record.symbol));
        }
        debug!(symbol = %record.symbol, "record added");
        self.records.push(record);
        Ok(())
    }

    /// Generate and append a record for the first catalog security not yet
    /// on the board. Returns its symbol.
    pub fn add_next(&mut self) -> Result<String, BoardError> {
        let security = self
            .catalog
            .iter()
            .find(|s| self.records.iter().all(|r| r.symbol != s.symbol))
            .cloned()
            .ok_or(BoardError::CatalogExhausted)?;
        let record = generator::generate_record(&security, self.chart_len, &mut self.rng);
        let symbol = record.symbol.clone();
        self.add_record(record)?;
        Ok(symbol)
    }

    /// Apply a partial update to one record. Returns false if the symbol is
    /// unknown.
    pub fn update<F>(&mut self, symbol: &str, f: F) -> bool
    where
        F: FnOnce(&mut StockRecord),
    {
        match self.records.iter_mut().find(|r| r.symbol == symbol) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    /// Replace the collection with freshly generated records. Selection and
    /// any pending edit are dropped; sort and query survive.
    pub fn regenerate(&mut self) {
        self.records =
            generator::generate_board(&self.catalog, self.seed_count, self.chart_len, &mut self.rng);
        self.controller.clear_selection();
        self.controller.cancel_edit();
        info!(records = self.records.len(), "board regenerated");
    }

    /// Advance every record by one tick.
    pub fn apply_tick(&mut self) {
        self.records = tick::advance(&self.records, &self.tick_params, &mut self.rng);
        debug!(records = self.records.len(), "tick applied");
    }

    pub fn tick_params(&self) -> &TickParams {
        &self.tick_params
    }

    // ── Query ──────────────────────────────────────────────────────

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn sector(&self) -> SectorFilter {
        self.sector
    }

    pub fn set_sector(&mut self, sector: SectorFilter) {
        self.sector = sector;
    }

    /// Step the sector filter through the sectors currently on the board.
    pub fn cycle_sector(&mut self) -> SectorFilter {
        self.sector = self.sector.next_in(&self.sectors_present());
        self.sector
    }

    pub fn clear_query(&mut self) {
        self.search.clear();
        self.sector = SectorFilter::All;
    }

    pub fn has_query(&self) -> bool {
        !self.search.is_empty() || self.sector != SectorFilter::All
    }

    pub fn sectors_present(&self) -> Vec<Sector> {
        filter::sectors_present(&self.records)
    }

    /// Visible records, filtered then sorted.
    pub fn view(&self) -> Vec<&StockRecord> {
        let visible = filter::visible_records(&self.records, &self.search, self.sector);
        self.controller.apply_sort(visible)
    }

    pub fn summary(&self) -> Summary {
        let visible = filter::visible_records(&self.records, &self.search, self.sector);
        let gainers = visible.iter().filter(|r| r.is_gainer()).count();
        let losers = visible.iter().filter(|r| r.is_loser()).count();
        Summary {
            visible: visible.len(),
            total: self.records.len(),
            gainers,
            losers,
            unchanged: visible.len() - gainers - losers,
            traded_value: visible.iter().map(|r| r.traded_value()).sum(),
        }
    }

    // ── Grid ───────────────────────────────────────────────────────

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.controller.is_selected(symbol)
    }

    pub fn selected_count(&self) -> usize {
        self.controller.selection().len()
    }

    pub fn toggle_select(&mut self, symbol: &str, included: bool) {
        self.controller.toggle_select(symbol, included);
    }

    /// Select exactly the visible records, or clear the selection.
    pub fn select_all(&mut self, included: bool) {
        let visible = filter::visible_records(&self.records, &self.search, self.sector);
        self.controller
            .select_all(included, visible.iter().map(|r| r.symbol.as_str()));
    }

    pub fn selection_state(&self) -> SelectAllState {
        let visible = filter::visible_records(&self.records, &self.search, self.sector);
        self.controller
            .selection_state(visible.iter().map(|r| r.symbol.as_str()))
    }

    /// Remove every selected record. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.records.len();
        let records = std::mem::take(&mut self.records);
        self.records = self.controller.remove_selected(records);
        let removed = before - self.records.len();
        info!(removed, remaining = self.records.len(), "removed selected records");
        removed
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.controller.sort_spec()
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.controller.set_sort(spec);
    }

    pub fn cycle_sort(&mut self, field: SortField) -> SortSpec {
        self.controller.cycle_sort(field)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.controller.edit_session()
    }

    /// Start editing `field` of `symbol`, seeding the draft from the record.
    pub fn begin_edit(&mut self, symbol: &str, field: EditField) -> Result<(), BoardError> {
        let current = self
            .get(symbol)
            .map(|r| field.read(r))
            .ok_or_else(|| BoardError::UnknownSymbol(symbol.to_string()))?;
        self.controller.begin_edit(symbol, field, current);
        Ok(())
    }

    pub fn update_draft(&mut self, text: &str) {
        self.controller.update_draft(text);
    }

    pub fn draft_mut(&mut self) -> Option<&mut String> {
        self.controller.draft_mut()
    }

    pub fn commit_edit(&mut self) -> Result<Option<AppliedEdit>, EditError> {
        self.controller.commit_edit(&mut self.records)
    }

    pub fn cancel_edit(&mut self) {
        self.controller.cancel_edit();
    }
}
