// src/sheet/google.rs
//
// Sheets v4 REST backend.
//
//   open     drive files.list (by name)  →  spreadsheets.get (sheet id by title)
//   read     values.get         'stats'         UNFORMATTED_VALUE
//   append   values.append      'stats'         RAW, INSERT_ROWS
//   update   values.update      'stats'!A7:F7   RAW
//   delete   batchUpdate        deleteDimension ROWS [6, 7)

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::auth::{ServiceAccountKey, TokenSource};
use super::{SheetError, SheetResult, Worksheet};
use crate::config::consts::{DRIVE_FILES_API, SCOPES, SHEETS_API};
use crate::config::options::{GoogleOptions, SpreadsheetRef};
use crate::core::net::{self, Retry};
use crate::core::sanitize::{a1_title, drive_query_literal};

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/* ---------------- Wire types ---------------- */

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/* ---------------- Pure helpers ---------------- */

/// 1 → A, 26 → Z, 27 → AA.
pub fn column_letter(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// `'stats'!A7:F7` for a row of `width` cells.
pub fn row_range(title: &str, row_number: usize, width: usize) -> String {
    let last = column_letter(width.max(1));
    format!("{}!A{row_number}:{last}{row_number}", a1_title(title))
}

/// `{SHEETS_API}/{id}/values/{range}{suffix}` with the range percent-encoded.
pub fn values_url(spreadsheet_id: &str, range: &str, suffix: &str) -> SheetResult<Url> {
    let mut url = Url::parse(SHEETS_API).map_err(|e| SheetError::Decode(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SheetError::Decode(s!("sheets endpoint is not a base url")))?
        .push(spreadsheet_id)
        .push("values")
        .push(&join!(range, suffix));
    Ok(url)
}

/// First column that holds a count (C).
const FIRST_COUNT_COLUMN: usize = 2;

/// Counts (columns C onward) go over as numbers so the sheet can sum them.
/// Name and position are always text, so "007" stays "007".
pub fn cell_value(column: usize, cell: &str) -> Value {
    if column < FIRST_COUNT_COLUMN {
        return json!(cell);
    }
    match cell.parse::<u64>() {
        Ok(n) if !cell.starts_with('+') => json!(n),
        _ => json!(cell),
    }
}

fn row_values(row: &[String]) -> Vec<Value> {
    row.iter().enumerate().map(|(i, c)| cell_value(i, c)).collect()
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => s!(),
        other => other.to_string(),
    }
}

/* ---------------- Backend ---------------- */

pub struct GoogleSheet {
    http: Client,
    auth: TokenSource,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

impl GoogleSheet {
    pub fn open(opts: &GoogleOptions) -> SheetResult<Self> {
        let key = ServiceAccountKey::from_file(&opts.creds_path)?;
        let http = net::client()?;
        let mut auth = TokenSource::new(key, SCOPES);

        let spreadsheet_id = match &opts.spreadsheet {
            SpreadsheetRef::Id(id) => id.clone(),
            SpreadsheetRef::Name(name) => find_spreadsheet(&http, &mut auth, name)?,
        };
        let sheet_id = find_worksheet(&http, &mut auth, &spreadsheet_id, &opts.worksheet)?;
        log::info!(
            "opened spreadsheet {spreadsheet_id}, worksheet '{}' (sheetId {sheet_id}) as {}",
            opts.worksheet,
            auth.client_email()
        );

        Ok(Self { http, auth, spreadsheet_id, sheet_id, title: opts.worksheet.clone() })
    }
}

fn find_spreadsheet(http: &Client, auth: &mut TokenSource, name: &str) -> SheetResult<String> {
    let token = auth.token(http)?;
    let q = format!(
        "name = {} and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
        drive_query_literal(name)
    );
    let resp = net::send("drive search", Retry::Idempotent, || {
        http.get(DRIVE_FILES_API)
            .bearer_auth(&token)
            .query(&[
                ("q", q.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "10"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
    })?;
    let list: FileList = resp.json()?;
    if list.files.len() > 1 {
        log::warn!("{} spreadsheets named '{name}', using the first", list.files.len());
    }
    list.files
        .into_iter()
        .next()
        .map(|f| {
            log::debug!("resolved '{}' to {}", f.name, f.id);
            f.id
        })
        .ok_or_else(|| SheetError::SpreadsheetNotFound(s!(name)))
}

fn find_worksheet(
    http: &Client,
    auth: &mut TokenSource,
    spreadsheet_id: &str,
    title: &str,
) -> SheetResult<i64> {
    let token = auth.token(http)?;
    let url = format!("{SHEETS_API}/{spreadsheet_id}");
    let resp = net::send("spreadsheet metadata", Retry::Idempotent, || {
        http.get(&url)
            .bearer_auth(&token)
            .query(&[("fields", "sheets.properties(sheetId,title)")])
    })?;
    let meta: SpreadsheetMeta = resp.json()?;
    meta.sheets
        .into_iter()
        .map(|s| s.properties)
        .find(|p| p.title == title)
        .map(|p| p.sheet_id)
        .ok_or_else(|| SheetError::WorksheetNotFound(s!(title)))
}

impl Worksheet for GoogleSheet {
    fn title(&self) -> &str { &self.title }

    fn get_all_values(&mut self) -> SheetResult<Vec<Vec<String>>> {
        let token = self.auth.token(&self.http)?;
        let url = values_url(&self.spreadsheet_id, &a1_title(&self.title), "")?;
        let resp = net::send("values.get", Retry::Idempotent, || {
            self.http.get(url.clone())
                .bearer_auth(&token)
                .query(&[("majorDimension", "ROWS"), ("valueRenderOption", "UNFORMATTED_VALUE")])
        })?;
        let range: ValueRange = resp.json()?;
        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    fn append_row(&mut self, row: &[String]) -> SheetResult<()> {
        let token = self.auth.token(&self.http)?;
        let url = values_url(&self.spreadsheet_id, &a1_title(&self.title), ":append")?;
        let body = json!({ "values": [row_values(row)] });
        net::send("values.append", Retry::Once, || {
            self.http.post(url.clone())
                .bearer_auth(&token)
                .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
                .json(&body)
        })?;
        log::info!("appended row to '{}'", self.title);
        Ok(())
    }

    fn update_row(&mut self, row_number: usize, row: &[String]) -> SheetResult<()> {
        if row_number == 0 {
            return Err(SheetError::RowOutOfRange { row: 0, len: 0 });
        }
        let token = self.auth.token(&self.http)?;
        let range = row_range(&self.title, row_number, row.len());
        let url = values_url(&self.spreadsheet_id, &range, "")?;
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [row_values(row)],
        });
        net::send("values.update", Retry::Idempotent, || {
            self.http.put(url.clone())
                .bearer_auth(&token)
                .query(&[("valueInputOption", "RAW")])
                .json(&body)
        })?;
        log::info!("updated {range}");
        Ok(())
    }

    fn delete_row(&mut self, row_number: usize) -> SheetResult<()> {
        if row_number == 0 {
            return Err(SheetError::RowOutOfRange { row: 0, len: 0 });
        }
        let token = self.auth.token(&self.http)?;
        let url = format!("{SHEETS_API}/{}:batchUpdate", self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row_number - 1,
                        "endIndex": row_number,
                    }
                }
            }]
        });
        net::send("batchUpdate deleteDimension", Retry::Once, || {
            self.http.post(&url).bearer_auth(&token).json(&body)
        })?;
        log::info!("deleted row {row_number} of '{}'", self.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerStats, Position};

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(6), "F");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn row_ranges_cover_the_whole_record() {
        assert_eq!(row_range("stats", 7, 6), "'stats'!A7:F7");
        assert_eq!(row_range("Bob's", 2, 0), "'Bob''s'!A2:A2");
    }

    #[test]
    fn values_urls_are_encoded() {
        let u = values_url("abc123", "'stats'", ":append").unwrap();
        assert_eq!(u.as_str(), "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'stats':append");
        let u = values_url("abc123", &row_range("my stats", 3, 6), "").unwrap();
        assert_eq!(u.as_str(), "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'my%20stats'!A3:F3");
    }

    #[test]
    fn counts_are_sent_as_numbers() {
        assert_eq!(cell_value(2, "27"), json!(27));
        assert_eq!(cell_value(5, "N/A"), json!("N/A"));
        assert_eq!(cell_value(3, "+3"), json!("+3"));
        assert_eq!(cell_value(1, "Attacker"), json!("Attacker"));
        assert_eq!(cell_text(&json!(95)), "95");
        assert_eq!(cell_text(&json!("95")), "95");
    }

    #[test]
    fn numeric_looking_names_stay_text() {
        let stats = PlayerStats {
            name: s!("007"),
            position: Position::Attacker,
            goals: 4,
            matches: 9,
            minutes: 700,
        };
        let sent = row_values(&stats.to_row());
        assert_eq!(sent[0], json!("007"));
        assert_eq!(sent[2], json!(4));

        // what values.get hands back for that row
        let back: Vec<String> = sent.iter().map(cell_text).collect();
        assert_eq!(PlayerStats::from_row(&back).unwrap(), stats);
    }

    #[test]
    fn unformatted_numbers_read_back_as_counts() {
        let raw: ValueRange = serde_json::from_str(
            r#"{"values":[["Saka","Attacker",9,20,1700,189]]}"#,
        ).unwrap();
        let row: Vec<String> = raw.values[0].iter().map(cell_text).collect();
        assert_eq!(PlayerStats::from_row(&row).unwrap().minutes, 1700);
    }

    #[test]
    fn value_range_without_values_is_empty() {
        let r: ValueRange = serde_json::from_str(r#"{"range":"stats!A1:Z1000","majorDimension":"ROWS"}"#).unwrap();
        assert!(r.values.is_empty());
    }
}
