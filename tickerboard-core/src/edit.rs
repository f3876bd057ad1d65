//! Inline cell edit session.

use thiserror::Error;

use crate::domain::{EditField, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("'{draft}' is not a valid number for {field}")]
    InvalidNumber { field: EditField, draft: String },
}

/// One in-progress cell edit. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub symbol: String,
    pub field: EditField,
    pub draft: String,
    /// Value the draft was seeded from, committed as-is if the draft is untouched.
    seed: FieldValue,
}

impl EditSession {
    /// Open a session with the draft seeded from the cell's current value.
    pub fn new(symbol: &str, field: EditField, current: FieldValue) -> Self {
        Self {
            symbol: symbol.to_string(),
            field,
            draft: current.to_string(),
            seed: current,
        }
    }

    /// Parse and clamp the draft for this session's field.
    ///
    /// An untouched draft yields the seed value exactly, so opening and
    /// committing an edit never rewrites the stored value.
    pub fn parse(&self) -> Result<FieldValue, EditError> {
        if self.draft.trim() == self.seed.to_string() {
            return Ok(self.field.clamp(self.seed));
        }
        self.field
            .parse(&self.draft)
            .map(|value| self.field.clamp(value))
            .ok_or_else(|| EditError::InvalidNumber {
                field: self.field,
                draft: self.draft.clone(),
            })
    }

    pub fn targets(&self, symbol: &str, field: EditField) -> bool {
        self.symbol == symbol && self.field == field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_seeded_from_current_value() {
        let s = EditSession::new("X", EditField::Price, FieldValue::Float(10.0));
        assert_eq!(s.draft, "10");
        let s = EditSession::new("X", EditField::Volume, FieldValue::Integer(1500));
        assert_eq!(s.draft, "1500");
    }

    #[test]
    fn parse_clamps_price_but_not_change() {
        let mut s = EditSession::new("X", EditField::Price, FieldValue::Float(1.0));
        s.draft = "-5".into();
        assert_eq!(s.parse(), Ok(FieldValue::Float(0.0)));
        s.field = EditField::Change;
        assert_eq!(s.parse(), Ok(FieldValue::Float(-5.0)));
    }

    #[test]
    fn untouched_fractional_count_is_lossless() {
        let mut s = EditSession::new("X", EditField::MarketCap, FieldValue::Float(812.4));
        assert_eq!(s.draft, "812.4");
        assert_eq!(s.parse(), Ok(FieldValue::Float(812.4)));

        // Typed fractions are still rejected for count fields.
        s.draft = "812.5".into();
        assert!(s.parse().is_err());
        s.draft = "900".into();
        assert_eq!(s.parse(), Ok(FieldValue::Integer(900)));
    }

    #[test]
    fn invalid_draft_reports_field_and_text() {
        let mut s = EditSession::new("X", EditField::PeRatio, FieldValue::Float(1.0));
        s.draft = "abc".into();
        let err = s.parse().unwrap_err();
        assert_eq!(err.to_string(), "'abc' is not a valid number for peRatio");
    }
}
