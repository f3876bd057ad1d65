//! Grid controller: selection, sort and inline edit state.
//!
//! Every transition is a method on [`GridController`]. None of them touch the
//! filter; callers pass in whatever visible symbols or records apply. Only
//! [`GridController::commit_edit`] can fail.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{EditField, FieldValue, SortField, StockRecord};
use crate::edit::{EditError, EditSession};
use crate::selection::SelectionSet;
use crate::sort::{self, SortSpec};

/// Tri-state of a "select all" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectAllState {
    None,
    Some,
    All,
}

/// A successfully committed edit.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedEdit {
    pub symbol: String,
    pub field: EditField,
    pub value: FieldValue,
}

#[derive(Debug, Clone, Default)]
pub struct GridController {
    selection: SelectionSet,
    sort: SortSpec,
    edit: Option<EditSession>,
}

impl GridController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(sort: SortSpec) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    // ── Selection ──────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.selection.contains(symbol)
    }

    pub fn toggle_select(&mut self, symbol: &str, included: bool) {
        self.selection.set(symbol, included);
    }

    /// Select exactly `visible_symbols`, or clear everything.
    pub fn select_all<'a, I>(&mut self, included: bool, visible_symbols: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        if included {
            self.selection.replace(visible_symbols);
        } else {
            self.selection.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop selected records, keeping survivors in their original order.
    /// The selection is empty afterwards.
    pub fn remove_selected(&mut self, mut records: Vec<StockRecord>) -> Vec<StockRecord> {
        let before = records.len();
        records.retain(|r| !self.selection.contains(&r.symbol));
        debug!(removed = before - records.len(), "removed selected records");
        self.selection.clear();
        records
    }

    pub fn selection_state<'a, I>(&self, visible_symbols: I) -> SelectAllState
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total = 0usize;
        let mut selected = 0usize;
        for symbol in visible_symbols {
            total += 1;
            if self.selection.contains(symbol) {
                selected += 1;
            }
        }
        if selected == 0 {
            SelectAllState::None
        } else if selected == total {
            SelectAllState::All
        } else {
            SelectAllState::Some
        }
    }

    // ── Sort ───────────────────────────────────────────────────────

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = spec;
    }

    pub fn cycle_sort(&mut self, field: SortField) -> SortSpec {
        self.sort = self.sort.cycle(field);
        self.sort
    }

    /// Sort with the controller's current spec.
    pub fn apply_sort<'a>(&self, records: Vec<&'a StockRecord>) -> Vec<&'a StockRecord> {
        sort::apply_sort(records, &self.sort)
    }

    // ── Edit ───────────────────────────────────────────────────────

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Open a session on `(symbol, field)`, discarding any pending one.
    pub fn begin_edit(&mut self, symbol: &str, field: EditField, current: FieldValue) {
        if let Some(prev) = self.edit.take() {
            debug!(symbol = %prev.symbol, field = %prev.field, "discarding pending edit");
        }
        self.edit = Some(EditSession::new(symbol, field, current));
    }

    /// Replace the draft text. No validation happens until commit.
    pub fn update_draft(&mut self, text: &str) {
        if let Some(session) = self.edit.as_mut() {
            session.draft = text.to_string();
        }
    }

    /// Mutable access for character-level editing in a view.
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        self.edit.as_mut().map(|s| &mut s.draft)
    }

    /// Parse the draft and write it into the matching record.
    ///
    /// - no session: `Ok(None)`, nothing happens
    /// - unparseable draft: `Err`, records untouched, session stays open
    /// - target symbol gone: session cleared, `Ok(None)`
    pub fn commit_edit(
        &mut self,
        records: &mut [StockRecord],
    ) -> Result<Option<AppliedEdit>, EditError> {
        let Some(session) = self.edit.as_ref() else {
            return Ok(None);
        };

        let value = match session.parse() {
            Ok(value) => value,
            Err(err) => {
                warn!(symbol = %session.symbol, error = %err, "edit rejected");
                return Err(err);
            }
        };

        let Some(session) = self.edit.take() else {
            return Ok(None);
        };
        match records.iter_mut().find(|r| r.symbol == session.symbol) {
            Some(record) => {
                session.field.write(record, value);
                debug!(symbol = %session.symbol, field = %session.field, %value, "edit committed");
                Ok(Some(AppliedEdit {
                    symbol: session.symbol,
                    field: session.field,
                    value,
                }))
            }
            None => {
                debug!(symbol = %session.symbol, "edit target no longer exists");
                Ok(None)
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }
}
