//! StockRecord: one tracked security and its displayed metrics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest value a price (or chart sample) may take after any mutation.
///
/// Applies to inline edits and to ticks alike.
pub const PRICE_FLOOR: f64 = 0.0;

/// Market sector a security belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Healthcare,
    Finance,
    Energy,
    Consumer,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::Technology,
        Sector::Healthcare,
        Sector::Finance,
        Sector::Energy,
        Sector::Consumer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
            Sector::Energy => "Energy",
            Sector::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sector '{0}'")]
pub struct SectorParseError(pub String);

impl FromStr for Sector {
    type Err = SectorParseError;

    /// Exact label match, as used by the sector filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.label() == s)
            .ok_or_else(|| SectorParseError(s.to_string()))
    }
}

/// Catalog entry the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub symbol: String,
    pub name: String,
    pub sector: Sector,
}

impl Security {
    pub fn new(symbol: &str, name: &str, sector: Sector) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector,
        }
    }
}

/// One row of the board.
///
/// `symbol` is the identity key: selection, edit targeting and deduplication
/// all go through it. `chart_data` is a fixed-length window with the newest
/// sample at the tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub volume: u64,
    pub avg_volume: u64,
    /// Billions of the quote currency.
    pub market_cap: f64,
    /// 0.0 means not applicable.
    pub pe_ratio: f64,
    pub one_day_change: f64,
    pub sector: Sector,
    pub chart_data: Vec<f64>,
}

impl StockRecord {
    /// Build a flat record with every metric zeroed and a constant chart.
    pub fn flat(security: &Security, price: f64, chart_len: usize) -> Self {
        let price = price.max(PRICE_FLOOR);
        Self {
            symbol: security.symbol.clone(),
            name: security.name.clone(),
            price,
            change: 0.0,
            percent_change: 0.0,
            volume: 0,
            avg_volume: 0,
            market_cap: 0.0,
            pe_ratio: 0.0,
            one_day_change: 0.0,
            sector: security.sector,
            chart_data: vec![price; chart_len],
        }
    }

    pub fn is_gainer(&self) -> bool {
        self.change > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.change < 0.0
    }

    /// Traded value for the session: price × volume.
    pub fn traded_value(&self) -> f64 {
        self.price * self.volume as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_parse_is_exact() {
        assert_eq!("Energy".parse::<Sector>(), Ok(Sector::Energy));
        assert!("energy".parse::<Sector>().is_err());
        assert!("Utilities".parse::<Sector>().is_err());
    }

    #[test]
    fn flat_record_clamps_price() {
        let sec = Security::new("ZZZ", "Zed Corp", Sector::Finance);
        let r = StockRecord::flat(&sec, -3.0, 4);
        assert_eq!(r.price, 0.0);
        assert_eq!(r.chart_data, vec![0.0; 4]);
        assert_eq!(r.sector, Sector::Finance);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let sec = Security::new("AAPL", "Apple Inc.", Sector::Technology);
        let r = StockRecord::flat(&sec, 10.0, 2);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"percentChange\""));
        assert!(json.contains("\"chartData\""));
        assert!(json.contains("\"sector\":\"Technology\""));
    }

    #[test]
    fn gainer_loser_by_change_sign() {
        let sec = Security::new("A", "A", Sector::Energy);
        let mut r = StockRecord::flat(&sec, 1.0, 2);
        assert!(!r.is_gainer() && !r.is_loser());
        r.change = 0.5;
        assert!(r.is_gainer());
        r.change = -0.5;
        assert!(r.is_loser());
    }
}
