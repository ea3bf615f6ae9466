// src/config/consts.rs

// Spreadsheet
pub const SPREADSHEET_NAME: &str = "Goal-Scorer-Stats";
pub const WORKSHEET_TITLE: &str = "stats";
pub const CREDS_FILE: &str = "creds.json";

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/drive",
];

// Net config
pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const USER_AGENT: &str = concat!("goal_scorer/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const RETRIES: u32 = 3;
pub const RETRY_PAUSE_MS: u64 = 500;

// Auth
pub const TOKEN_LIFETIME_SECS: i64 = 3600;
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

// Local cache
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_CSV: &str = "out/stats.csv";

// Sheet layout, columns A..F
pub const HEADERS: [&str; 6] = ["Name", "Position", "Goals", "Matches", "Minutes", "Minutes per goal"];
pub const NO_GOALS: &str = "N/A";
