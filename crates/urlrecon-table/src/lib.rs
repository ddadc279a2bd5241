//! Tabular input and output for urlrecon.
//!
//! Templates come from one column of a spreadsheet (or a header-less CSV),
//! observed URLs from one column of a CSV log whose full rows travel along
//! with each candidate, and match records go out as an xlsx or CSV sheet.

mod error;
mod reader;
mod writer;

use std::path::Path;

pub use error::{Result, TableError};
pub use reader::{decode_utf8, read_log, read_templates, LogTable, Row};
pub use writer::{write_results, OutputColumns, XLSX_MAX_CELL_CHARS};

/// Default zero-based column of the templates in the route catalog sheet.
pub const DEFAULT_TEMPLATE_COLUMN: usize = 7;

/// Default zero-based column of the request URL in the log export.
pub const DEFAULT_URL_COLUMN: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Spreadsheet,
    Csv,
}

impl Format {
    /// Picks the format from the file extension; anything calamine does not
    /// read is treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Format::Spreadsheet,
            _ => Format::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.xlsx")), Format::Spreadsheet);
        assert_eq!(Format::from_path(Path::new("a.XLS")), Format::Spreadsheet);
        assert_eq!(Format::from_path(Path::new("a.ods")), Format::Spreadsheet);
        assert_eq!(Format::from_path(Path::new("a.csv")), Format::Csv);
        assert_eq!(Format::from_path(Path::new("a")), Format::Csv);
    }
}
