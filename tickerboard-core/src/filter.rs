//! Search and sector filtering.
//!
//! The visible set is always derived, never stored: callers re-run
//! [`visible_records`] against the full collection whenever either input
//! changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Sector, SectorParseError, StockRecord};

/// Sector predicate. `All` is the sentinel that matches every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectorFilter {
    #[default]
    All,
    Only(Sector),
}

impl SectorFilter {
    pub fn matches(self, sector: Sector) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Only(wanted) => wanted == sector,
        }
    }

    /// Step to the next entry of `All, present[0], present[1], ...`, wrapping.
    pub fn next_in(self, present: &[Sector]) -> Self {
        let pos = match self {
            SectorFilter::All => None,
            SectorFilter::Only(s) => present.iter().position(|p| *p == s),
        };
        let next = match pos {
            None => 0,
            Some(i) => i + 1,
        };
        present
            .get(next)
            .map_or(SectorFilter::All, |s| SectorFilter::Only(*s))
    }
}

impl fmt::Display for SectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorFilter::All => f.write_str("All"),
            SectorFilter::Only(sector) => write!(f, "{sector}"),
        }
    }
}

impl FromStr for SectorFilter {
    type Err = SectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(SectorFilter::All)
        } else {
            s.parse().map(SectorFilter::Only)
        }
    }
}

/// Whether `record` passes a search term given already lowercased.
fn matches_search(record: &StockRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.name.to_lowercase().contains(needle)
        || record.symbol.to_lowercase().contains(needle)
}

/// Records matching the search term (case-insensitive substring of name or
/// symbol) and the sector filter, in collection order.
pub fn visible_records<'a>(
    all: &'a [StockRecord],
    search_term: &str,
    sector: SectorFilter,
) -> Vec<&'a StockRecord> {
    let needle = search_term.to_lowercase();
    all.iter()
        .filter(|r| matches_search(r, &needle) && sector.matches(r.sector))
        .collect()
}

/// Distinct sectors in first-seen order.
pub fn sectors_present(records: &[StockRecord]) -> Vec<Sector> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.sector) {
            seen.push(record.sector);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Security;

    fn rec(symbol: &str, name: &str, sector: Sector) -> StockRecord {
        StockRecord::flat(&Security::new(symbol, name, sector), 1.0, 2)
    }

    fn sample() -> Vec<StockRecord> {
        vec![
            rec("AAPL", "Apple Inc.", Sector::Technology),
            rec("XOM", "Exxon Mobil", Sector::Energy),
            rec("PINE", "Pineapple Foods", Sector::Consumer),
        ]
    }

    #[test]
    fn empty_term_and_all_keeps_everything() {
        let records = sample();
        assert_eq!(visible_records(&records, "", SectorFilter::All).len(), 3);
    }

    #[test]
    fn search_matches_symbol_case_insensitively() {
        let records = sample();
        let visible = visible_records(&records, "aapl", SectorFilter::All);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "AAPL");
    }

    #[test]
    fn search_matches_name_substring_in_order() {
        let records = sample();
        let visible = visible_records(&records, "APPLE", SectorFilter::All);
        let symbols: Vec<_> = visible.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "PINE"]);
    }

    #[test]
    fn sector_and_search_compose() {
        let records = sample();
        let visible = visible_records(&records, "apple", SectorFilter::Only(Sector::Consumer));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "PINE");
        assert!(visible_records(&records, "", SectorFilter::Only(Sector::Finance)).is_empty());
    }

    #[test]
    fn sentinel_parses_case_insensitively() {
        assert_eq!("ALL".parse::<SectorFilter>(), Ok(SectorFilter::All));
        assert_eq!(
            "Energy".parse::<SectorFilter>(),
            Ok(SectorFilter::Only(Sector::Energy))
        );
        assert!("energy".parse::<SectorFilter>().is_err());
    }

    #[test]
    fn sectors_in_first_seen_order() {
        let mut records = sample();
        records.push(rec("CVX", "Chevron", Sector::Energy));
        assert_eq!(
            sectors_present(&records),
            vec![Sector::Technology, Sector::Energy, Sector::Consumer]
        );
    }

    #[test]
    fn next_in_wraps_through_all() {
        let present = [Sector::Energy, Sector::Finance];
        let f = SectorFilter::All.next_in(&present);
        assert_eq!(f, SectorFilter::Only(Sector::Energy));
        let f = f.next_in(&present);
        assert_eq!(f, SectorFilter::Only(Sector::Finance));
        assert_eq!(f.next_in(&present), SectorFilter::All);
        // A sector no longer present restarts the cycle.
        assert_eq!(
            SectorFilter::Only(Sector::Consumer).next_in(&present),
            SectorFilter::Only(Sector::Energy)
        );
    }
}
