// src/runner.rs
//
// The user-facing operations. Each takes a Prompter and a Worksheet so the
// CLI, the menu, and the tests all drive the same code.

use std::error::Error;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::player::PlayerStats;
use crate::prompt::{GOALS_PROMPT, MATCHES_PROMPT, MINUTES_PROMPT, Prompter};
use crate::roster::{Roster, RosterEntry};
use crate::sheet::{SheetResult, Worksheet};

pub type RunResult<T> = Result<T, Box<dyn Error>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Add,
    View,
    Edit,
    Remove,
    List,
}

/// Run one action to completion.
pub fn run<R: BufRead, W: Write>(
    action: Action,
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<()> {
    log::debug!("action {action:?}");
    match action {
        Action::Add => add_player(p, sheet).map(|_| ()),
        Action::View => view_player(p, sheet).map(|_| ()),
        Action::Edit => edit_player(p, sheet).map(|_| ()),
        Action::Remove => remove_player(p, sheet).map(|_| ()),
        Action::List => list_players(p, sheet).map(|_| ()),
    }
}

/* ---------------- Add ---------------- */

pub fn prompt_new_record<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<PlayerStats> {
    Ok(PlayerStats {
        name: p.name()?,
        position: p.position()?,
        goals: p.count(GOALS_PROMPT)?,
        matches: p.count(MATCHES_PROMPT)?,
        minutes: p.count(MINUTES_PROMPT)?,
    })
}

/// Put the header row on an empty sheet.
pub fn ensure_headers(sheet: &mut dyn Worksheet) -> SheetResult<bool> {
    if sheet.get_all_values()?.is_empty() {
        sheet.append_row(&PlayerStats::headers())?;
        log::info!("wrote header row to empty sheet '{}'", sheet.title());
        return Ok(true);
    }
    Ok(false)
}

pub fn add_player<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<PlayerStats> {
    let stats = prompt_new_record(p)?;
    ensure_headers(sheet)?;
    sheet.append_row(&stats.to_row())?;
    log::info!("added '{}' ({}) to '{}'", stats.name, stats.position, sheet.title());

    p.say("")?;
    p.say(stats.added_message())?;
    p.say(format!("Minutes per goal: {}", stats.minutes_per_goal()))?;
    Ok(stats)
}

/* ---------------- View ---------------- */

pub fn view_player<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<Vec<PlayerStats>> {
    let name = p.name()?;
    let roster = Roster::load(sheet)?;
    let hits = roster.find(&name);

    if hits.is_empty() {
        p.say(not_found(&name))?;
        return Ok(Vec::new());
    }
    if hits.len() > 1 {
        p.say(format!("\nFound {} players named '{}':", hits.len(), name))?;
    }
    for e in &hits {
        p.say("")?;
        p.say(&e.stats)?;
    }
    Ok(hits.into_iter().map(|e| e.stats.clone()).collect())
}

fn not_found(name: &str) -> String {
    format!("No player named '{name}' was found.")
}

fn summary_line(e: &RosterEntry) -> String {
    let s = &e.stats;
    format!(
        "{} ({}), {} goals in {} matches, {} minutes [row {}]",
        s.name, s.position, s.goals, s.matches, s.minutes, e.row_number
    )
}

/// Prompt for a name and settle on one matching row.
fn pick_player<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    roster: &Roster,
    name: &str,
) -> io::Result<Option<RosterEntry>> {
    let hits = roster.find(name);
    match hits.len() {
        0 => {
            p.say(not_found(name))?;
            Ok(None)
        }
        1 => Ok(Some(hits[0].clone())),
        n => {
            p.say(format!("\n{n} players are named '{name}':"))?;
            for (i, e) in hits.iter().enumerate() {
                p.say(format!("  {}) {}", i + 1, summary_line(e)))?;
            }
            let ix = p.choose(&format!("Which one? (1-{n}): "), n)?;
            Ok(Some(hits[ix].clone()))
        }
    }
}

/* ---------------- Edit ---------------- */

pub fn edit_player<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<Option<PlayerStats>> {
    let name = p.name()?;
    let roster = Roster::load(sheet)?;
    let Some(entry) = pick_player(p, &roster, &name)? else {
        return Ok(None);
    };

    let old = entry.stats;
    p.say("")?;
    p.say(&old)?;
    p.say("\nPress Enter to keep a value.")?;
    let new = PlayerStats {
        name: p.name_or_keep(&old.name)?,
        position: p.position_or_keep(old.position)?,
        goals: p.count_or_keep(GOALS_PROMPT, old.goals)?,
        matches: p.count_or_keep(MATCHES_PROMPT, old.matches)?,
        minutes: p.count_or_keep(MINUTES_PROMPT, old.minutes)?,
    };

    if new == old {
        p.say("No changes made.")?;
        return Ok(None);
    }

    sheet.update_row(entry.row_number, &new.to_row())?;
    log::info!("updated '{}' at row {}", new.name, entry.row_number);
    p.say(format!("\nPlayer '{}' has been updated.", new.name))?;
    p.say(format!("Minutes per goal: {}", new.minutes_per_goal()))?;
    Ok(Some(new))
}

/* ---------------- Remove ---------------- */

pub fn remove_player<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<Option<PlayerStats>> {
    let name = p.name()?;
    let roster = Roster::load(sheet)?;
    let Some(entry) = pick_player(p, &roster, &name)? else {
        return Ok(None);
    };

    let question = format!("Remove '{}' ({}) from the sheet?", entry.stats.name, entry.stats.position);
    if !p.confirm(&question)? {
        p.say("Nothing removed.")?;
        return Ok(None);
    }

    sheet.delete_row(entry.row_number)?;
    log::info!("removed '{}' from row {}", entry.stats.name, entry.row_number);
    p.say(format!("Player '{}' has been removed from the sheet.", entry.stats.name))?;
    Ok(Some(entry.stats))
}

/* ---------------- List ---------------- */

pub fn list_players<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
) -> RunResult<usize> {
    let roster = Roster::load(sheet)?;
    if roster.is_empty() {
        p.say("The sheet has no players yet.")?;
    } else {
        p.say(format_table(&roster))?;
    }
    if roster.skipped() > 0 {
        p.say(format!("({} unreadable rows skipped)", roster.skipped()))?;
    }
    Ok(roster.len())
}

/// Column-aligned table, header first. Text left-aligned, numbers right-aligned.
pub fn format_table(roster: &Roster) -> String {
    let headers = PlayerStats::headers();
    let rows: Vec<Vec<String>> = roster.entries().iter().map(|e| e.stats.to_row()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = s!();
    let line = |out: &mut String, cells: &[String], numeric: bool| {
        let mut parts = Vec::with_capacity(cells.len());
        for (i, (cell, &w)) in cells.iter().zip(&widths).enumerate() {
            if numeric && i >= 2 {
                parts.push(format!("{cell:>w$}"));
            } else {
                parts.push(format!("{cell:<w$}"));
            }
        }
        let _ = writeln!(out, "{}", parts.join("  ").trim_end());
    };

    line(&mut out, &headers[..], false);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, &rule[..], false);
    for r in &rows {
        line(&mut out, &r[..], true);
    }
    out.truncate(out.trim_end().len());
    out
}

/* ---------------- Menu ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Action),
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => MenuChoice::Run(Action::Add),
            "2" | "view" => MenuChoice::Run(Action::View),
            "3" | "edit" => MenuChoice::Run(Action::Edit),
            "4" | "remove" => MenuChoice::Run(Action::Remove),
            "5" | "list" => MenuChoice::Run(Action::List),
            "6" | "exit" | "quit" | "q" => MenuChoice::Exit,
            _ => return Err(()),
        })
    }
}

const MENU: &str = "\
Goal scorer stats
  1) Add a player
  2) View a player
  3) Edit a player
  4) Remove a player
  5) List all players
  6) Exit";

fn is_eof(e: &(dyn Error + 'static)) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|io| io.kind() == io::ErrorKind::UnexpectedEof)
}

/// Interactive loop. Sheet errors are reported and the menu carries on;
/// Exit or end of input stops it.
pub fn menu<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    sheet: &mut dyn Worksheet,
    banner: &str,
) -> RunResult<()> {
    p.say(banner)?;
    loop {
        p.say("")?;
        p.say(MENU)?;
        let answer = match p.ask("Choose an option (1-6): ") {
            Ok(a) => a,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        let action = match answer.parse::<MenuChoice>() {
            Ok(MenuChoice::Run(a)) => a,
            Ok(MenuChoice::Exit) => break,
            Err(()) => {
                p.say("Invalid choice: Please enter a number from 1 to 6.")?;
                continue;
            }
        };
        match run(action, p, sheet) {
            Ok(()) => {}
            Err(e) if is_eof(e.as_ref()) => break,
            Err(e) => {
                log::error!("{action:?} failed: {e}");
                p.say(format!("Error: {e}"))?;
            }
        }
    }
    p.say("Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_by_number_or_word() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Run(Action::Add)));
        assert_eq!(" View ".parse::<MenuChoice>(), Ok(MenuChoice::Run(Action::View)));
        assert_eq!("q".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("7".parse::<MenuChoice>(), Err(()));
    }

    #[test]
    fn table_aligns_numbers_right() {
        let roster = Roster::from_rows(vec![
            row!["Bukayo Saka", "Attacker", "9", "20", "1700"],
            row!["Rice", "Midfielder", "0", "22", "1900"],
        ]);
        let t = format_table(&roster);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name         Position    Goals"));
        assert!(lines[1].starts_with("-----------  ----------  -----"));
        assert!(lines[2].starts_with("Bukayo Saka  Attacker        9"));
        assert!(lines[3].ends_with("N/A"));
    }
}
