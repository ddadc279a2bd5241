use crate::error::{Result, TableError};
use crate::Format;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use urlrecon_match::Candidate;

/// Every field of a log record, in column order.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub headers: Vec<String>,
    pub candidates: Vec<Candidate<Row>>,
}

/// Reads one column of templates, one entry per source row.
///
/// Spreadsheets are read from their first sheet. Empty or missing cells come
/// back as `None` so row positions are preserved.
pub fn read_templates(path: &Path, column: usize, skip_header: bool) -> Result<Vec<Option<String>>> {
    let mut templates = match Format::from_path(path) {
        Format::Spreadsheet => read_spreadsheet_column(path, column)?,
        Format::Csv => read_csv_column(path, column)?,
    };

    if skip_header && !templates.is_empty() {
        templates.remove(0);
    }

    Ok(templates)
}

/// Reads a CSV log with a header row. Each record becomes a candidate whose
/// URL is the field at `column`.
pub fn read_log(path: &Path, column: usize, delimiter: u8) -> Result<LogTable> {
    let content = read_text(path)?;
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut candidates = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: Row = record.iter().map(str::to_string).collect();
        candidates.push(Candidate {
            url: row.get(column).cloned(),
            row,
        });
    }

    Ok(LogTable {
        headers,
        candidates,
    })
}

fn read_spreadsheet_column(path: &Path, column: usize) -> Result<Vec<Option<String>>> {
    let spreadsheet_err = |source| TableError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::NoSheets {
            path: path.to_path_buf(),
        })?
        .map_err(spreadsheet_err)?;

    let Some((end_row, _)) = range.end() else {
        return Ok(Vec::new());
    };
    let Ok(column) = u32::try_from(column) else {
        return Ok(vec![None; end_row as usize + 1]);
    };

    // Absolute positions, so a sheet whose data starts below row 1 or right
    // of column A still lines up with the requested column.
    Ok((0..=end_row)
        .map(|row| range.get_value((row, column)).and_then(cell_text))
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn read_csv_column(path: &Path, column: usize) -> Result<Vec<Option<String>>> {
    let content = read_text(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        values.push(
            record
                .get(column)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }

    Ok(values)
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_utf8(bytes))
}

/// Decodes file content as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs). A leading byte order mark is dropped.
pub fn decode_utf8(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_log_rows_and_urls() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(
            &tmp,
            "log.csv",
            b"time,url,status\n10:00,/v1/acme/orders/99,200\n10:01,/v1/static,404\n",
        );

        let log = read_log(&path, 1, b',').unwrap();
        assert_eq!(log.headers, vec!["time", "url", "status"]);
        assert_eq!(log.candidates.len(), 2);
        assert_eq!(log.candidates[0].url.as_deref(), Some("/v1/acme/orders/99"));
        assert_eq!(log.candidates[0].row, vec!["10:00", "/v1/acme/orders/99", "200"]);
        assert_eq!(log.candidates[1].url.as_deref(), Some("/v1/static"));
    }

    #[test]
    fn test_read_log_short_row_has_no_url() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "log.csv", b"a,b,url\n1,2,/x\n3\n");

        let log = read_log(&path, 2, b',').unwrap();
        assert_eq!(log.candidates[0].url.as_deref(), Some("/x"));
        assert_eq!(log.candidates[1].url, None);
        assert_eq!(log.candidates[1].row, vec!["3"]);
    }

    #[test]
    fn test_read_log_delimiter() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "log.tsv", b"url\tstatus\n/a/1\t200\n");

        let log = read_log(&path, 0, b'\t').unwrap();
        assert_eq!(log.headers, vec!["url", "status"]);
        assert_eq!(log.candidates[0].url.as_deref(), Some("/a/1"));
    }

    #[test]
    fn test_read_log_windows_1252() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "log.csv", b"url,name\n/a/1,caf\xe9\n");

        let log = read_log(&path, 0, b',').unwrap();
        assert_eq!(log.candidates[0].row[1], "caf\u{e9}");
    }

    #[test]
    fn test_read_log_strips_bom() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "log.csv", "\u{feff}url\n/a/1\n".as_bytes());

        let log = read_log(&path, 0, b',').unwrap();
        assert_eq!(log.headers, vec!["url"]);
    }

    #[test]
    fn test_read_log_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_log(&tmp.path().join("nope.csv"), 0, b',').unwrap_err();
        assert!(matches!(err, TableError::Read { .. }));
    }

    #[test]
    fn test_read_templates_csv() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(
            &tmp,
            "templates.csv",
            b"name,template\norders,/v1/{{client}}/orders/{{id}}\nempty,\nshort\n",
        );

        let templates = read_templates(&path, 1, false).unwrap();
        assert_eq!(
            templates,
            vec![
                Some("template".to_string()),
                Some("/v1/{{client}}/orders/{{id}}".to_string()),
                None,
                None,
            ]
        );

        let templates = read_templates(&path, 1, true).unwrap();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0].as_deref(), Some("/v1/{{client}}/orders/{{id}}"));
    }

    #[test]
    fn test_read_templates_bad_spreadsheet() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "templates.xlsx", b"not a zip archive");

        let err = read_templates(&path, 0, false).unwrap_err();
        assert!(matches!(err, TableError::Spreadsheet { .. }));
    }

    #[test]
    fn test_read_templates_spreadsheet_cells() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("templates.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 1, "template").unwrap();
        worksheet.write_number(1, 1, 42.0).unwrap();
        worksheet.write_string(3, 1, "/v1/{{client}}/orders/{{id}}").unwrap();
        worksheet.write_number(4, 1, 2.5).unwrap();
        workbook.save(&path).unwrap();

        let templates = read_templates(&path, 1, true).unwrap();
        assert_eq!(
            templates,
            vec![
                Some("42".to_string()),
                None,
                Some("/v1/{{client}}/orders/{{id}}".to_string()),
                Some("2.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(42.0)).as_deref(), Some("42"));
        assert_eq!(cell_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(cell_text(&Data::String("/a".to_string())).as_deref(), Some("/a"));
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Error(calamine::CellErrorType::Div0)), None);
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        assert_eq!(decode_utf8("/caf\u{e9}".as_bytes().to_vec()), "/caf\u{e9}");
    }
}
