// src/sheet/mod.rs
//! Row-level access to the stats worksheet.
//!
//! Every backend speaks in whole rows of text cells and 1-based row numbers,
//! the same numbering the spreadsheet UI shows. Row 1 is normally the header.
//!
//! - `google` talks to the Sheets v4 REST API with a service account.
//! - `local` keeps the rows in a CSV file for offline use.
//! - `memory` holds rows in a `Vec`, mostly for tests.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::options::Backend;

pub mod auth;
pub mod google;
pub mod local;
pub mod memory;

pub use google::GoogleSheet;
pub use local::CsvSheet;
pub use memory::MemorySheet;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("could not read credentials file {path}: {source}")]
    CredsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid credentials file {path}: {source}")]
    CredsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not sign token request: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spreadsheet service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("spreadsheet '{0}' not found (is it shared with the service account?)")]
    SpreadsheetNotFound(String),

    #[error("worksheet '{0}' not found")]
    WorksheetNotFound(String),

    #[error("row {row} is out of range (sheet has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait Worksheet {
    fn title(&self) -> &str;

    /// Every non-trailing row, header included.
    fn get_all_values(&mut self) -> SheetResult<Vec<Vec<String>>>;

    fn append_row(&mut self, row: &[String]) -> SheetResult<()>;

    /// Overwrite row `row_number` (1-based).
    fn update_row(&mut self, row_number: usize, row: &[String]) -> SheetResult<()>;

    /// Remove row `row_number` (1-based); rows below shift up.
    fn delete_row(&mut self, row_number: usize) -> SheetResult<()>;
}

/// Open the backend named in the options.
pub fn open(backend: &Backend) -> SheetResult<Box<dyn Worksheet>> {
    log::info!("opening {}", backend.describe());
    let sheet: Box<dyn Worksheet> = match backend {
        Backend::Google(opts) => Box::new(GoogleSheet::open(opts)?),
        Backend::Csv(opts) => Box::new(CsvSheet::open(&opts.path)),
    };
    Ok(sheet)
}

/// Map a 1-based row number to a `Vec` index, checking bounds.
pub(crate) fn row_index(row_number: usize, len: usize) -> SheetResult<usize> {
    if row_number == 0 || row_number > len {
        return Err(SheetError::RowOutOfRange { row: row_number, len });
    }
    Ok(row_number - 1)
}
