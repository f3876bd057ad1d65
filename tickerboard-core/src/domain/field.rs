//! Field descriptors: which record attributes can be sorted and edited, and how.
//!
//! Editing dispatches on a closed `FieldKind` tag instead of field-name
//! strings, so parsing and clamping are a total match.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::{StockRecord, PRICE_FLOOR};

/// Display/parse family of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Money amount, parsed as float.
    Currency,
    /// Percentage points, parsed as float.
    Percentage,
    /// Whole units, parsed as integer.
    Count,
    /// Plain ratio, parsed as float.
    Ratio,
}

impl FieldKind {
    pub fn is_integer(self) -> bool {
        matches!(self, FieldKind::Count)
    }
}

/// A parsed edit value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
}

impl FieldValue {
    pub fn as_f64(self) -> f64 {
        match self {
            FieldValue::Float(v) => v,
            FieldValue::Integer(v) => v as f64,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// Attributes that accept inline edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditField {
    Price,
    Change,
    PercentChange,
    Volume,
    MarketCap,
    PeRatio,
    OneDayChange,
}

impl EditField {
    pub const ALL: [EditField; 7] = [
        EditField::Price,
        EditField::Change,
        EditField::PercentChange,
        EditField::Volume,
        EditField::MarketCap,
        EditField::PeRatio,
        EditField::OneDayChange,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            EditField::Price | EditField::Change => FieldKind::Currency,
            EditField::PercentChange | EditField::OneDayChange => FieldKind::Percentage,
            EditField::Volume | EditField::MarketCap => FieldKind::Count,
            EditField::PeRatio => FieldKind::Ratio,
        }
    }

    /// Price-like and volume-like fields never go below zero; deltas may.
    pub fn is_non_negative(self) -> bool {
        match self {
            EditField::Price | EditField::PeRatio | EditField::Volume | EditField::MarketCap => {
                true
            }
            EditField::Change | EditField::PercentChange | EditField::OneDayChange => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditField::Price => "price",
            EditField::Change => "change",
            EditField::PercentChange => "percentChange",
            EditField::Volume => "volume",
            EditField::MarketCap => "marketCap",
            EditField::PeRatio => "peRatio",
            EditField::OneDayChange => "oneDayChange",
        }
    }

    /// Current value of this field on `record`, exactly as stored.
    pub fn read(self, record: &StockRecord) -> FieldValue {
        match self {
            EditField::Price => FieldValue::Float(record.price),
            EditField::Change => FieldValue::Float(record.change),
            EditField::PercentChange => FieldValue::Float(record.percent_change),
            EditField::Volume => FieldValue::Integer(i64::try_from(record.volume).unwrap_or(i64::MAX)),
            EditField::MarketCap => FieldValue::Float(record.market_cap),
            EditField::PeRatio => FieldValue::Float(record.pe_ratio),
            EditField::OneDayChange => FieldValue::Float(record.one_day_change),
        }
    }

    /// Parse raw draft text for this field.
    ///
    /// Returns `None` for anything that is not a finite number of the right
    /// kind. Surrounding whitespace is ignored.
    pub fn parse(self, raw: &str) -> Option<FieldValue> {
        let raw = raw.trim();
        if self.kind().is_integer() {
            raw.parse::<i64>().ok().map(FieldValue::Integer)
        } else {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float)
        }
    }

    /// Clamp a parsed value according to the field's sign rule.
    pub fn clamp(self, value: FieldValue) -> FieldValue {
        if !self.is_non_negative() {
            return value;
        }
        match value {
            FieldValue::Float(v) if self == EditField::Price => FieldValue::Float(v.max(PRICE_FLOOR)),
            FieldValue::Float(v) => FieldValue::Float(v.max(0.0)),
            FieldValue::Integer(v) => FieldValue::Integer(v.max(0)),
        }
    }

    /// Write an already-clamped value into `record`.
    pub fn write(self, record: &mut StockRecord, value: FieldValue) {
        match self {
            EditField::Price => record.price = value.as_f64(),
            EditField::Change => record.change = value.as_f64(),
            EditField::PercentChange => record.percent_change = value.as_f64(),
            EditField::Volume => {
                record.volume = match value {
                    FieldValue::Integer(v) => u64::try_from(v).unwrap_or(0),
                    FieldValue::Float(v) => v.max(0.0) as u64,
                }
            }
            EditField::MarketCap => record.market_cap = value.as_f64(),
            EditField::PeRatio => record.pe_ratio = value.as_f64(),
            EditField::OneDayChange => record.one_day_change = value.as_f64(),
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort key extracted from a record: text compares case-insensitively,
/// numbers by value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            // Keys from the same field always share a variant.
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        }
    }
}

/// Attributes that can drive the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Symbol,
    Name,
    Price,
    Change,
    PercentChange,
    Volume,
    MarketCap,
    PeRatio,
    OneDayChange,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Symbol,
        SortField::Name,
        SortField::Price,
        SortField::Change,
        SortField::PercentChange,
        SortField::Volume,
        SortField::MarketCap,
        SortField::PeRatio,
        SortField::OneDayChange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Symbol => "symbol",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Change => "change",
            SortField::PercentChange => "percentChange",
            SortField::Volume => "volume",
            SortField::MarketCap => "marketCap",
            SortField::PeRatio => "peRatio",
            SortField::OneDayChange => "oneDayChange",
        }
    }

    /// Parse a field label, accepting camelCase or snake_case.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted: String = label
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        SortField::ALL
            .into_iter()
            .find(|f| f.label().to_lowercase() == wanted)
    }

    pub fn key(self, record: &StockRecord) -> SortKey {
        match self {
            SortField::Symbol => SortKey::Text(record.symbol.to_lowercase()),
            SortField::Name => SortKey::Text(record.name.to_lowercase()),
            SortField::Price => SortKey::Number(record.price),
            SortField::Change => SortKey::Number(record.change),
            SortField::PercentChange => SortKey::Number(record.percent_change),
            SortField::Volume => SortKey::Number(record.volume as f64),
            SortField::MarketCap => SortKey::Number(record.market_cap),
            SortField::PeRatio => SortKey::Number(record.pe_ratio),
            SortField::OneDayChange => SortKey::Number(record.one_day_change),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_parse_rules() {
        assert_eq!(EditField::Price.kind(), FieldKind::Currency);
        assert_eq!(EditField::OneDayChange.kind(), FieldKind::Percentage);
        assert_eq!(EditField::Volume.kind(), FieldKind::Count);
        assert_eq!(EditField::MarketCap.kind(), FieldKind::Count);
        assert_eq!(EditField::PeRatio.kind(), FieldKind::Ratio);
    }

    #[test]
    fn parse_rejects_non_finite_and_garbage() {
        assert_eq!(EditField::Price.parse(" 12.5 "), Some(FieldValue::Float(12.5)));
        assert_eq!(EditField::Price.parse("abc"), None);
        assert_eq!(EditField::Price.parse("inf"), None);
        assert_eq!(EditField::Price.parse("NaN"), None);
        assert_eq!(EditField::Price.parse(""), None);
    }

    #[test]
    fn count_fields_require_integers() {
        assert_eq!(EditField::Volume.parse("1200"), Some(FieldValue::Integer(1200)));
        assert_eq!(EditField::Volume.parse("12.7"), None);
        assert_eq!(EditField::MarketCap.parse("-4"), Some(FieldValue::Integer(-4)));
    }

    #[test]
    fn clamp_only_non_negative_fields() {
        assert_eq!(
            EditField::Price.clamp(FieldValue::Float(-5.0)),
            FieldValue::Float(0.0)
        );
        assert_eq!(
            EditField::Change.clamp(FieldValue::Float(-5.0)),
            FieldValue::Float(-5.0)
        );
        assert_eq!(
            EditField::Volume.clamp(FieldValue::Integer(-9)),
            FieldValue::Integer(0)
        );
        assert_eq!(
            EditField::PercentChange.clamp(FieldValue::Float(-0.4)),
            FieldValue::Float(-0.4)
        );
    }

    #[test]
    fn sort_field_labels_parse_both_cases() {
        assert_eq!(SortField::from_label("percentChange"), Some(SortField::PercentChange));
        assert_eq!(SortField::from_label("percent_change"), Some(SortField::PercentChange));
        assert_eq!(SortField::from_label("PE_RATIO"), Some(SortField::PeRatio));
        assert_eq!(SortField::from_label("sector"), None);
    }

    #[test]
    fn text_keys_are_lowercased() {
        assert_eq!(
            SortKey::Text("abc".into()).compare(&SortKey::Text("abd".into())),
            Ordering::Less
        );
        assert_eq!(
            SortKey::Number(2.0).compare(&SortKey::Number(1.0)),
            Ordering::Greater
        );
    }
}
