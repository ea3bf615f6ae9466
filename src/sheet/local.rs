// src/sheet/local.rs
//
// CSV file standing in for the worksheet. Whole-file rewrite on update/delete;
// the file is small and single-user.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{SheetResult, Worksheet, row_index};
use crate::csv::parse_rows;
use crate::file::{append_rows, write_rows};

const SEP: char = ',';

pub struct CsvSheet {
    path: PathBuf,
    title: String,
}

impl CsvSheet {
    /// Nothing is touched on disk until the first write.
    pub fn open(path: &Path) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!("stats"));
        Self { path: path.to_path_buf(), title }
    }

    fn read(&self) -> SheetResult<Vec<Vec<String>>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_rows(&text, SEP)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Worksheet for CsvSheet {
    fn title(&self) -> &str { &self.title }

    fn get_all_values(&mut self) -> SheetResult<Vec<Vec<String>>> {
        self.read()
    }

    fn append_row(&mut self, row: &[String]) -> SheetResult<()> {
        append_rows(&self.path, &[row.to_vec()], SEP)?;
        log::debug!("appended row to {}", self.path.display());
        Ok(())
    }

    fn update_row(&mut self, row_number: usize, row: &[String]) -> SheetResult<()> {
        let mut rows = self.read()?;
        let ix = row_index(row_number, rows.len())?;
        rows[ix] = row.to_vec();
        write_rows(&self.path, &rows, SEP)?;
        Ok(())
    }

    fn delete_row(&mut self, row_number: usize) -> SheetResult<()> {
        let mut rows = self.read()?;
        let ix = row_index(row_number, rows.len())?;
        rows.remove(ix);
        write_rows(&self.path, &rows, SEP)?;
        Ok(())
    }
}
