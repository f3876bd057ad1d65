//! Three-state column sort.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{SortField, StockRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Insertion order.
    None,
}

impl SortDirection {
    /// Asc → Desc → None → Asc.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
            SortDirection::None => SortDirection::Ascending,
        }
    }

    /// Header glyph for the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
            SortDirection::None => "",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Symbol,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Spec after the user activates `field`'s header.
    ///
    /// The same field steps through the direction cycle; any other field
    /// starts over at ascending.
    pub fn cycle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.next())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{} asc", self.field),
            SortDirection::Descending => write!(f, "{} desc", self.field),
            SortDirection::None => f.write_str("unsorted"),
        }
    }
}

/// Order `records` by `spec`.
///
/// Stable in both directions, so ties keep their incoming order. With
/// `SortDirection::None` the input is returned untouched.
pub fn apply_sort<T: Borrow<StockRecord>>(mut records: Vec<T>, spec: &SortSpec) -> Vec<T> {
    let field = spec.field;
    match spec.direction {
        SortDirection::None => {}
        SortDirection::Ascending => records.sort_by(|a, b| {
            field
                .key(a.borrow())
                .compare(&field.key(b.borrow()))
        }),
        SortDirection::Descending => records.sort_by(|a, b| {
            field
                .key(a.borrow())
                .compare(&field.key(b.borrow()))
                .reverse()
        }),
    }
    records
}
