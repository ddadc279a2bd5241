use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV in '{path}'")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to open spreadsheet '{path}'")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Spreadsheet '{path}' contains no sheets")]
    NoSheets { path: PathBuf },

    #[error("Failed to write workbook '{path}'")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Too many rows for an xlsx sheet: {0}")]
    TooManyRows(usize),

    #[error("Too many columns for an xlsx sheet: {0}")]
    TooManyColumns(usize),
}

pub type Result<T> = std::result::Result<T, TableError>;
