// src/core/sanitize.rs

/// Collapse runs of whitespace to one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Comparison key for player names: whitespace-normalized, lowercased.
/// Full Unicode lowercasing so "ØDEGAARD" finds "Ødegaard".
pub fn name_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// Escape a value for a single-quoted Drive query literal.
pub fn drive_query_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' || ch == '\\' { out.push('\\'); }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// A1-notation worksheet title: always quoted, inner quotes doubled.
pub fn a1_title(title: &str) -> String {
    join!("'", &title.replace('\'', "''"), "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  Kevin \t De   Bruyne\n"), "Kevin De Bruyne");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn name_key_folds_case_and_spacing() {
        assert_eq!(name_key(" MARTIN  ØDEGAARD "), name_key("martin ødegaard"));
        assert_ne!(name_key("Son"), name_key("Sonny"));
    }

    #[test]
    fn quoting() {
        assert_eq!(drive_query_literal("Goal-Scorer-Stats"), "'Goal-Scorer-Stats'");
        assert_eq!(drive_query_literal(r"O'Neil\"), r"'O\'Neil\\'");
        assert_eq!(a1_title("stats"), "'stats'");
        assert_eq!(a1_title("Bob's"), "'Bob''s'");
    }
}
