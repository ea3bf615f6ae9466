// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without newline, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// If the first cell is "Name", split the first row off as the header.
pub fn detect_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    if rows.is_empty() { return (None, rows); }
    let first = &rows[0];
    if !first.is_empty() && first[0].trim().eq_ignore_ascii_case("name") {
        let header = rows.remove(0);
        return (Some(header), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_to_string(rows: &[Vec<String>], sep: char) -> String {
        let mut buf: Vec<u8> = Vec::new();
        for r in rows {
            let _ = write_row(&mut buf, r, sep);
        }
        match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
        }
    }

    #[test]
    fn quoted_fields_survive() {
        let rows = vec![row!["Smith, Jr.", "Defender", "say \"hi\""]];
        let text = rows_to_string(&rows, ',');
        assert_eq!(text, "\"Smith, Jr.\",Defender,\"say \"\"hi\"\"\"\n");
        assert_eq!(parse_rows(&text, ','), rows);
    }

    #[test]
    fn crlf_blank_lines_and_missing_trailing_newline() {
        let rows = parse_rows("Name,Goals\r\n\r\nSaka,9\nRice,4", ',');
        assert_eq!(rows, vec![row!["Name", "Goals"], row!["Saka", "9"], row!["Rice", "4"]]);
        assert!(parse_rows("", ',').is_empty());
    }

    #[test]
    fn header_detection() {
        let (h, r) = detect_headers(vec![row!["name", "x"], row!["Saka", "1"]]);
        assert_eq!(h, Some(row!["name", "x"]));
        assert_eq!(r.len(), 1);
        let (h, r) = detect_headers(vec![row!["Saka", "1"]]);
        assert!(h.is_none());
        assert_eq!(r.len(), 1);
    }
}
