use thiserror::Error;
use urlrecon_table::TableError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
