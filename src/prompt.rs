// src/prompt.rs
//
// Line-oriented prompts with validate → re-prompt loops.
// Generic over reader/writer so tests can script a session with a Cursor.

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::player::{InvalidInput, Position, parse_count, parse_name};

pub const NAME_PROMPT: &str = "Enter player's name: ";
pub const POSITION_PROMPT: &str = "Enter player's position (Attacker, Midfielder, Defender, Goalkeeper): ";
pub const GOALS_PROMPT: &str = "Enter the number of goals scored: ";
pub const MATCHES_PROMPT: &str = "Enter the number of matches played: ";
pub const MINUTES_PROMPT: &str = "Enter the amount of minutes played: ";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W { self.output }

    pub fn say(&mut self, msg: impl Display) -> io::Result<()> {
        writeln!(self.output, "{msg}")
    }

    /// Print `prompt`, read one line without its line ending.
    /// End of input is `UnexpectedEof`.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = s!();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, InvalidInput>,
    ) -> io::Result<T> {
        loop {
            let line = self.ask(prompt)?;
            match parse(&line) {
                Ok(v) => return Ok(v),
                Err(e) => self.say(e)?,
            }
        }
    }

    /// Empty answer keeps `current`.
    fn ask_or_keep<T: Clone>(
        &mut self,
        prompt: &str,
        current: &T,
        parse: impl Fn(&str) -> Result<T, InvalidInput>,
    ) -> io::Result<T> {
        self.ask_until(prompt, |line| {
            if line.trim().is_empty() { Ok(current.clone()) } else { parse(line) }
        })
    }

    /* ---------------- Record fields ---------------- */

    pub fn name(&mut self) -> io::Result<String> {
        self.ask_until(NAME_PROMPT, parse_name)
    }

    pub fn position(&mut self) -> io::Result<Position> {
        self.ask_until(POSITION_PROMPT, |s| s.parse::<Position>())
    }

    pub fn count(&mut self, prompt: &str) -> io::Result<u32> {
        self.ask_until(prompt, parse_count)
    }

    pub fn name_or_keep(&mut self, current: &str) -> io::Result<String> {
        let prompt = format!("{} [{current}]: ", NAME_PROMPT.trim_end_matches(": "));
        self.ask_or_keep(&prompt, &s!(current), parse_name)
    }

    pub fn position_or_keep(&mut self, current: Position) -> io::Result<Position> {
        let prompt = format!("{} [{current}]: ", POSITION_PROMPT.trim_end_matches(": "));
        self.ask_or_keep(&prompt, &current, |s| s.parse::<Position>())
    }

    pub fn count_or_keep(&mut self, prompt: &str, current: u32) -> io::Result<u32> {
        let prompt = format!("{} [{current}]: ", prompt.trim_end_matches(": "));
        self.ask_or_keep(&prompt, &current, parse_count)
    }

    /* ---------------- Questions ---------------- */

    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let prompt = format!("{question} (y/n): ");
        loop {
            let line = self.ask(&prompt)?;
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Invalid data: Please answer y or n.")?,
            }
        }
    }

    /// 1-based pick among `n` options; returns the 0-based index.
    pub fn choose(&mut self, prompt: &str, n: usize) -> io::Result<usize> {
        loop {
            let line = self.ask(prompt)?;
            match line.trim().parse::<usize>() {
                Ok(k) if (1..=n).contains(&k) => return Ok(k - 1),
                _ => self.say(format!("Invalid choice: Please enter a number from 1 to {n}."))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn name_reprompts_until_non_empty() {
        let mut p = scripted("\n   \n  Mo Salah \n");
        assert_eq!(p.name().unwrap(), "Mo Salah");
        let out = transcript(p);
        assert_eq!(out.matches(NAME_PROMPT).count(), 3);
        assert_eq!(out.matches("Invalid data: Please input a valid name.").count(), 2);
    }

    #[test]
    fn count_rejects_negative_and_text() {
        let mut p = scripted("-4\nten\n10\r\n");
        assert_eq!(p.count(GOALS_PROMPT).unwrap(), 10);
        let out = transcript(p);
        assert_eq!(out.matches("non-negative whole number").count(), 2);
    }

    #[test]
    fn position_accepts_any_case() {
        let mut p = scripted("winger\nDEFENDER\n");
        assert_eq!(p.position().unwrap(), Position::Defender);
        assert!(transcript(p).contains("Invalid data: Please enter one of"));
    }

    #[test]
    fn keep_defaults_on_empty_answer() {
        let mut p = scripted("\n\nabc\n12\n");
        assert_eq!(p.name_or_keep("Son").unwrap(), "Son");
        assert_eq!(p.position_or_keep(Position::Attacker).unwrap(), Position::Attacker);
        assert_eq!(p.count_or_keep(GOALS_PROMPT, 3).unwrap(), 12);
        let out = transcript(p);
        assert!(out.contains("Enter player's name [Son]: "));
        assert!(out.contains("Enter the number of goals scored [3]: "));
    }

    #[test]
    fn confirm_and_choose() {
        let mut p = scripted("maybe\nYES\n0\n4\n2\n");
        assert!(p.confirm("Remove?").unwrap());
        assert_eq!(p.choose("Pick: ", 3).unwrap(), 1);
        let out = transcript(p);
        assert!(out.contains("Remove? (y/n): "));
        assert_eq!(out.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn eof_is_an_error_not_a_loop() {
        let mut p = scripted("   \n");
        let err = p.name().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
