// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use log::LevelFilter;

use crate::config::consts::LOG_FILE;
use crate::config::options::{AppOptions, Backend, CsvOptions, GoogleOptions};
use crate::prompt::Prompter;
use crate::runner::{self, Action};
use crate::sheet;

#[derive(Parser, Debug)]
#[command(
    name = "goal_scorer",
    version,
    about = "Record and look up football goal-scorer stats in a Google Sheet",
    long_about = "Record and look up football goal-scorer stats in a Google Sheet.\n\
                  Without a subcommand an interactive menu is shown.\n\
                  Options can also be set in the environment or a .env file."
)]
pub struct Cli {
    /// Where the stats live
    #[arg(long, value_enum, env = "GOAL_SCORER_BACKEND", default_value_t = BackendArg::Google)]
    pub backend: BackendArg,

    /// Service-account key file
    #[arg(long, env = "GOAL_SCORER_CREDS")]
    pub creds: Option<PathBuf>,

    /// Spreadsheet name, looked up in Drive
    #[arg(long, env = "GOAL_SCORER_SHEET")]
    pub sheet: Option<String>,

    /// Spreadsheet id; skips the Drive lookup
    #[arg(long, env = "GOAL_SCORER_SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Worksheet (tab) title
    #[arg(long, env = "GOAL_SCORER_WORKSHEET")]
    pub worksheet: Option<String>,

    /// CSV file for --backend csv
    #[arg(long, env = "GOAL_SCORER_CSV")]
    pub csv: Option<PathBuf>,

    /// off, error, warn, info, debug, trace
    #[arg(long, env = "GOAL_SCORER_LOG", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    #[arg(long, env = "GOAL_SCORER_LOG_FILE", default_value = LOG_FILE)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Google,
    Csv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Prompt for a player's stats and append them
    Add,
    /// Look up a player by name
    View,
    /// Change a player's stats
    Edit,
    /// Delete a player's row
    Remove,
    /// Print every player
    List,
}

impl From<Command> for Action {
    fn from(c: Command) -> Self {
        match c {
            Command::Add => Action::Add,
            Command::View => Action::View,
            Command::Edit => Action::Edit,
            Command::Remove => Action::Remove,
            Command::List => Action::List,
        }
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{s}'"))
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        let backend = match self.backend {
            BackendArg::Google => Backend::Google(GoogleOptions::with_overrides(
                self.creds.clone(),
                self.sheet.clone(),
                self.sheet_id.clone(),
                self.worksheet.clone(),
            )),
            BackendArg::Csv => Backend::Csv(match &self.csv {
                Some(path) => CsvOptions { path: path.clone() },
                None => CsvOptions::default(),
            }),
        };
        AppOptions { backend, log_file: self.log_file.clone(), log_level: self.log_level }
    }
}

pub fn run() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(eyre!("could not read .env: {e}"));
        }
    }
    let cli = Cli::parse();
    let opts = cli.options();

    crate::logging::init(&opts.log_file, opts.log_level)
        .map_err(|e| eyre!("could not open log file {}: {e}", opts.log_file.display()))?;
    log::info!("starting {}", env!("CARGO_PKG_VERSION"));

    let mut sheet = sheet::open(&opts.backend)
        .wrap_err_with(|| format!("could not open {}", opts.backend.describe()))?;
    let mut prompter = Prompter::stdio();

    let outcome = match cli.command {
        Some(cmd) => runner::run(cmd.into(), &mut prompter, sheet.as_mut()),
        None => runner::menu(&mut prompter, sheet.as_mut(), &format!("Using {}", opts.backend.describe())),
    };
    outcome.map_err(|e| {
        log::error!("{e}");
        eyre!("{e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::SpreadsheetRef;

    #[test]
    fn csv_backend_and_subcommand() {
        let cli = Cli::try_parse_from(["goal_scorer", "--backend", "csv", "--csv", "x/stats.csv", "view"]).unwrap();
        assert_eq!(cli.command, Some(Command::View));
        assert_eq!(cli.options().backend, Backend::Csv(CsvOptions { path: PathBuf::from("x/stats.csv") }));
    }

    #[test]
    fn google_overrides_flow_into_options() {
        let cli = Cli::try_parse_from([
            "goal_scorer", "--sheet", "Cup", "--worksheet", "scorers", "--log-level", "debug",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        let opts = cli.options();
        assert_eq!(opts.log_level, LevelFilter::Debug);
        match opts.backend {
            Backend::Google(g) => {
                assert_eq!(g.spreadsheet, SpreadsheetRef::Name(s!("Cup")));
                assert_eq!(g.worksheet, "scorers");
            }
            other => panic!("unexpected backend {other:?}"),
        }
    }

    #[test]
    fn bad_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["goal_scorer", "--log-level", "loud"]).is_err());
    }
}
