// src/player.rs
//
// The one record this tool deals in: a player's scoring line.
// Sheet columns A..F = Name, Position, Goals, Matches, Minutes, Minutes per goal.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::consts::{HEADERS, NO_GOALS};

/* ---------------- Validation ---------------- */

/// Rejected user input. The message doubles as the re-prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Invalid data: Please input a valid name.")]
    Name,
    #[error("Invalid data: Please enter one of Attacker, Midfielder, Defender, Goalkeeper.")]
    Position,
    #[error("Invalid data: Please enter a non-negative whole number.")]
    Count,
}

pub fn parse_name(raw: &str) -> Result<String, InvalidInput> {
    let name = crate::core::sanitize::normalize_ws(raw);
    if name.is_empty() { Err(InvalidInput::Name) } else { Ok(name) }
}

/// Non-negative whole number. Leading '+' and surrounding whitespace are fine.
pub fn parse_count(raw: &str) -> Result<u32, InvalidInput> {
    let t = raw.trim();
    let t = t.strip_prefix('+').unwrap_or(t);
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidInput::Count);
    }
    t.parse().map_err(|_| InvalidInput::Count)
}

/* ---------------- Position ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Attacker,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Attacker,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Attacker => "Attacker",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(t))
            .ok_or(InvalidInput::Position)
    }
}

/* ---------------- Derived metric ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinutesPerGoal {
    /// No goals scored yet
    Undefined,
    Minutes(u32),
}

impl fmt::Display for MinutesPerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinutesPerGoal::Undefined => f.write_str(NO_GOALS),
            MinutesPerGoal::Minutes(n) => write!(f, "{n}"),
        }
    }
}

/// minutes / goals, rounded half up. Zero goals has no ratio.
pub fn minutes_per_goal(minutes: u32, goals: u32) -> MinutesPerGoal {
    if goals == 0 {
        return MinutesPerGoal::Undefined;
    }
    let (m, g) = (u64::from(minutes), u64::from(goals));
    // (m + g/2) / g never exceeds m, so it fits back into u32
    MinutesPerGoal::Minutes(((m + g / 2) / g) as u32)
}

/* ---------------- Record ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStats {
    pub name: String,
    pub position: Position,
    pub goals: u32,
    pub matches: u32,
    pub minutes: u32,
}

/// A sheet row that could not be read back as a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {0} cells, expected at least 5")]
    TooShort(usize),
    #[error("empty name")]
    Name,
    #[error("bad position '{0}'")]
    Position(String),
    #[error("bad {column} value '{value}'")]
    Count { column: &'static str, value: String },
}

impl PlayerStats {
    pub fn minutes_per_goal(&self) -> MinutesPerGoal {
        minutes_per_goal(self.minutes, self.goals)
    }

    pub fn headers() -> Vec<String> {
        HEADERS.iter().map(|h| s!(*h)).collect()
    }

    /// Six cells in column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            s!(self.position.as_str()),
            self.goals.to_string(),
            self.matches.to_string(),
            self.minutes.to_string(),
            self.minutes_per_goal().to_string(),
        ]
    }

    /// Column F is recomputed, never trusted.
    pub fn from_row(row: &[String]) -> Result<Self, RowError> {
        if row.len() < 5 {
            return Err(RowError::TooShort(row.len()));
        }
        let name = parse_name(&row[0]).map_err(|_| RowError::Name)?;
        let position = row[1]
            .parse::<Position>()
            .map_err(|_| RowError::Position(row[1].clone()))?;
        let count = |ix: usize| {
            parse_count(&row[ix]).map_err(|_| RowError::Count {
                column: HEADERS[ix],
                value: row[ix].clone(),
            })
        };
        Ok(Self {
            name,
            position,
            goals: count(2)?,
            matches: count(3)?,
            minutes: count(4)?,
        })
    }

    /// The sentence printed after a successful add.
    pub fn added_message(&self) -> String {
        format!(
            "Player '{}' that plays as '{}' with {} goals in {} matches and {} minutes has been added to the sheet!",
            self.name, self.position, self.goals, self.matches, self.minutes
        )
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:             {}", self.name)?;
        writeln!(f, "Position:         {}", self.position)?;
        writeln!(f, "Goals:            {}", self.goals)?;
        writeln!(f, "Matches:          {}", self.matches)?;
        writeln!(f, "Minutes:          {}", self.minutes)?;
        write!(f, "Minutes per goal: {}", self.minutes_per_goal())
    }
}
