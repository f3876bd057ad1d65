//! CSV export of the selected records.
//!
//! Columns: Symbol, Name, Price, Change, % Change, Volume. Rows follow
//! collection order. Fields are written raw: a name containing a comma
//! produces an extra column on re-import.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::domain::StockRecord;
use crate::selection::SelectionSet;

pub const CSV_HEADER: [&str; 6] = ["Symbol", "Name", "Price", "Change", "% Change", "Volume"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render the selected records as CSV text.
pub fn export_selection_csv(
    records: &[StockRecord],
    selection: &SelectionSet,
) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    for r in records.iter().filter(|r| selection.contains(&r.symbol)) {
        wtr.write_record([
            r.symbol.clone(),
            r.name.clone(),
            r.price.to_string(),
            r.change.to_string(),
            r.percent_change.to_string(),
            r.volume.to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Write the selection CSV to `path`. Returns the number of data rows.
pub fn write_selection_csv(
    path: &Path,
    records: &[StockRecord],
    selection: &SelectionSet,
) -> Result<usize, ExportError> {
    let csv = export_selection_csv(records, selection)?;
    let rows = csv.lines().count().saturating_sub(1);
    fs::write(path, csv)?;
    info!(path = %path.display(), rows, "exported selection");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Sector, Security};

    fn rec(symbol: &str, name: &str, price: f64) -> StockRecord {
        let mut r = StockRecord::flat(&Security::new(symbol, name, Sector::Technology), price, 2);
        r.change = -1.5;
        r.percent_change = 0.25;
        r.volume = 1200;
        r
    }

    #[test]
    fn header_only_when_nothing_selected() {
        let csv = export_selection_csv(&[rec("A", "A", 1.0)], &SelectionSet::new()).unwrap();
        assert_eq!(csv, "Symbol,Name,Price,Change,% Change,Volume\n");
    }

    #[test]
    fn rows_follow_collection_order() {
        let records = vec![rec("B", "Bee", 2.0), rec("A", "Ay", 1.5), rec("C", "Sea", 3.0)];
        let mut sel = SelectionSet::new();
        sel.set("C", true);
        sel.set("B", true);
        let csv = export_selection_csv(&records, &sel).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "B,Bee,2,-1.5,0.25,1200");
        assert_eq!(lines[2], "C,Sea,3,-1.5,0.25,1200");
    }

    #[test]
    fn commas_in_names_are_not_quoted() {
        let records = vec![rec("TWTR", "Twitter, Inc.", 10.0)];
        let mut sel = SelectionSet::new();
        sel.set("TWTR", true);
        let csv = export_selection_csv(&records, &sel).unwrap();
        assert!(csv.contains("TWTR,Twitter, Inc.,10,"));
    }

    #[test]
    fn writes_file_and_counts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![rec("A", "Ay", 1.0), rec("B", "Bee", 2.0)];
        let mut sel = SelectionSet::new();
        sel.replace(["A", "B"]);
        assert_eq!(write_selection_csv(&path, &records, &sel).unwrap(), 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Symbol,Name"));
    }
}
