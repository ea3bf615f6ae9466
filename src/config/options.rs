// src/config/options.rs
use std::path::PathBuf;

use log::LevelFilter;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub backend: Backend,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            backend: Backend::Google(GoogleOptions::default()),
            log_file: PathBuf::from(LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }
}

/// Where the stats rows live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Google(GoogleOptions),
    Csv(CsvOptions),
}

impl Backend {
    /// Short label for logs and the menu banner.
    pub fn describe(&self) -> String {
        match self {
            Backend::Google(g) => match &g.spreadsheet {
                SpreadsheetRef::Name(n) => format!("Google Sheet '{}' / '{}'", n, g.worksheet),
                SpreadsheetRef::Id(id) => format!("Google Sheet id {} / '{}'", id, g.worksheet),
            },
            Backend::Csv(c) => format!("CSV file {}", c.path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpreadsheetRef {
    /// Resolved through a Drive search on first use
    Name(String),
    Id(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleOptions {
    pub creds_path: PathBuf,
    pub spreadsheet: SpreadsheetRef,
    pub worksheet: String,
}

impl Default for GoogleOptions {
    fn default() -> Self {
        Self {
            creds_path: PathBuf::from(CREDS_FILE),
            spreadsheet: SpreadsheetRef::Name(s!(SPREADSHEET_NAME)),
            worksheet: s!(WORKSHEET_TITLE),
        }
    }
}

impl GoogleOptions {
    /// An explicit id wins over a name; blank values fall back to defaults.
    pub fn with_overrides(
        creds: Option<PathBuf>,
        name: Option<String>,
        id: Option<String>,
        worksheet: Option<String>,
    ) -> Self {
        let mut out = Self::default();
        if let Some(p) = creds.filter(|p| !p.as_os_str().is_empty()) {
            out.creds_path = p;
        }
        let id = id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let name = name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if let Some(id) = id {
            out.spreadsheet = SpreadsheetRef::Id(id);
        } else if let Some(name) = name {
            out.spreadsheet = SpreadsheetRef::Name(name);
        }
        if let Some(ws) = worksheet.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            out.worksheet = ws;
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    pub path: PathBuf,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_CSV) }
    }
}
