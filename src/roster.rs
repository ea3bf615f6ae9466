// src/roster.rs
//
// Every record on the sheet, with the sheet row each one came from.
// Lookup is a straight scan; the sheet is a few hundred rows at most.

use crate::csv::detect_headers;
use crate::core::sanitize::name_key;
use crate::player::PlayerStats;
use crate::sheet::{SheetResult, Worksheet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    /// 1-based, as shown in the spreadsheet
    pub row_number: usize,
    pub stats: PlayerStats,
}

#[derive(Clone, Debug, Default)]
pub struct Roster {
    headers: Option<Vec<String>>,
    entries: Vec<RosterEntry>,
    skipped: usize,
}

impl Roster {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let (headers, body) = detect_headers(rows);
        let first_row = if headers.is_some() { 2 } else { 1 };

        let mut entries = Vec::with_capacity(body.len());
        let mut skipped = 0;
        for (i, row) in body.iter().enumerate() {
            let row_number = first_row + i;
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            match PlayerStats::from_row(row) {
                Ok(stats) => entries.push(RosterEntry { row_number, stats }),
                Err(e) => {
                    log::warn!("skipping sheet row {row_number}: {e}");
                    skipped += 1;
                }
            }
        }
        Self { headers, entries, skipped }
    }

    pub fn load(sheet: &mut dyn Worksheet) -> SheetResult<Self> {
        let rows = sheet.get_all_values()?;
        let roster = Self::from_rows(rows);
        log::debug!("loaded {} players from '{}'", roster.len(), sheet.title());
        Ok(roster)
    }

    /// Case-insensitive exact name match, in sheet order.
    pub fn find(&self, name: &str) -> Vec<&RosterEntry> {
        let key = name_key(name);
        self.entries
            .iter()
            .filter(|e| name_key(&e.stats.name) == key)
            .collect()
    }

    pub fn entries(&self) -> &[RosterEntry] { &self.entries }
    pub fn headers(&self) -> Option<&[String]> { self.headers.as_deref() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Rows that were present but could not be read as records.
    pub fn skipped(&self) -> usize { self.skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Position;

    fn rows() -> Vec<Vec<String>> {
        vec![
            row!["Name", "Position", "Goals", "Matches", "Minutes", "Minutes per goal"],
            row!["Bukayo Saka", "Attacker", "9", "20", "1700", "189"],
            row!["Declan Rice", "Midfielder", "4", "22", "1900", "475"],
            row![],
            row!["bukayo saka", "attacker", "2", "3", "200", "100"],
            row!["Broken", "Striker", "1", "1", "1"],
        ]
    }

    #[test]
    fn row_numbers_follow_the_sheet() {
        let r = Roster::from_rows(rows());
        assert!(r.headers().is_some());
        let numbers: Vec<usize> = r.entries().iter().map(|e| e.row_number).collect();
        assert_eq!(numbers, vec![2, 3, 5]);
        assert_eq!(r.skipped(), 1);
    }

    #[test]
    fn headerless_sheet_starts_at_row_one() {
        let r = Roster::from_rows(vec![row!["Kane", "Attacker", "1", "1", "90"]]);
        assert!(r.headers().is_none());
        assert_eq!(r.entries()[0].row_number, 1);
    }

    #[test]
    fn find_is_case_insensitive_and_returns_all_matches() {
        let r = Roster::from_rows(rows());
        let hits = r.find("  BUKAYO   saka ");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].stats.goals, 9);
        assert_eq!(hits[1].row_number, 5);
        assert_eq!(r.find("Declan Rice")[0].stats.position, Position::Midfielder);
        assert!(r.find("Saka").is_empty());
    }
}
