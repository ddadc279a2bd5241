use crate::error::{Result, TableError};
use crate::reader::Row;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use urlrecon_match::MatchRecord;

const RESULTS_SHEET: &str = "Results";

/// Longest cell text an xlsx sheet accepts, in characters.
pub const XLSX_MAX_CELL_CHARS: usize = 32_767;
const XLSX_MAX_ROWS: usize = 1_048_576;
const XLSX_MAX_COLUMNS: usize = 16_384;

/// Headers of the three leading output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumns {
    pub template: String,
    pub candidate: String,
    pub bound: String,
}

impl Default for OutputColumns {
    fn default() -> Self {
        Self {
            template: "Swagger_url".to_string(),
            candidate: "Target URL".to_string(),
            bound: "Sanitized URL".to_string(),
        }
    }
}

impl OutputColumns {
    pub fn header_row<'a>(&'a self, log_headers: &'a [String]) -> Vec<&'a str> {
        [
            self.template.as_str(),
            self.candidate.as_str(),
            self.bound.as_str(),
        ]
        .into_iter()
        .chain(log_headers.iter().map(String::as_str))
        .collect()
    }
}

fn output_row<'r>(record: &'r MatchRecord<'_, Row>) -> Vec<&'r str> {
    [record.template, record.candidate, record.bound.as_str()]
        .into_iter()
        .chain(record.row.iter().map(String::as_str))
        .collect()
}

/// Writes one row per record after a header row. `.xlsx` paths get a
/// workbook with a single `Results` sheet, anything else is written as CSV.
///
/// Returns the number of cells whose text was clipped to
/// [`XLSX_MAX_CELL_CHARS`]. CSV output is never clipped.
pub fn write_results(
    path: &Path,
    columns: &OutputColumns,
    log_headers: &[String],
    records: &[MatchRecord<'_, Row>],
) -> Result<usize> {
    let header = columns.header_row(log_headers);
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        write_xlsx(path, &header, records)
    } else {
        write_csv(path, &header, records).map(|()| 0)
    }
}

fn write_csv(path: &Path, header: &[&str], records: &[MatchRecord<'_, Row>]) -> Result<()> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Log rows may be shorter or longer than the header.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(header).map_err(csv_err)?;
    for record in records {
        writer.write_record(output_row(record)).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| TableError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_xlsx(path: &Path, header: &[&str], records: &[MatchRecord<'_, Row>]) -> Result<usize> {
    let xlsx_err = |source| TableError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let rows = records.len() + 1;
    if rows > XLSX_MAX_ROWS {
        return Err(TableError::TooManyRows(rows));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULTS_SHEET).map_err(xlsx_err)?;

    let mut clipped = write_xlsx_row(worksheet, path, 0, header)?;
    for (i, record) in records.iter().enumerate() {
        clipped += write_xlsx_row(worksheet, path, i + 1, &output_row(record))?;
    }

    workbook.save(path).map_err(xlsx_err)?;
    Ok(clipped)
}

fn write_xlsx_row(worksheet: &mut Worksheet, path: &Path, row: usize, cells: &[&str]) -> Result<usize> {
    if cells.len() > XLSX_MAX_COLUMNS {
        return Err(TableError::TooManyColumns(cells.len()));
    }
    let row_num = u32::try_from(row).map_err(|_| TableError::TooManyRows(row + 1))?;

    let mut clipped = 0;
    for (col, value) in cells.iter().enumerate() {
        let col_num = u16::try_from(col).map_err(|_| TableError::TooManyColumns(cells.len()))?;
        let (text, was_clipped) = clip_cell(value);
        clipped += usize::from(was_clipped);
        worksheet
            .write_string(row_num, col_num, text)
            .map_err(|source| TableError::Xlsx {
                path: path.to_path_buf(),
                source,
            })?;
    }

    Ok(clipped)
}

fn clip_cell(value: &str) -> (&str, bool) {
    match value.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((end, _)) => (&value[..end], true),
        None => (value, false),
    }
}
