// src/sheet/memory.rs
use super::{SheetResult, Worksheet, row_index};

#[derive(Clone, Debug, Default)]
pub struct MemorySheet {
    title: String,
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    pub fn new(title: &str) -> Self {
        Self { title: s!(title), rows: Vec::new() }
    }

    pub fn with_rows(title: &str, rows: Vec<Vec<String>>) -> Self {
        Self { title: s!(title), rows }
    }

    pub fn rows(&self) -> &[Vec<String>] { &self.rows }
}

impl Worksheet for MemorySheet {
    fn title(&self) -> &str { &self.title }

    fn get_all_values(&mut self) -> SheetResult<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, row: &[String]) -> SheetResult<()> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn update_row(&mut self, row_number: usize, row: &[String]) -> SheetResult<()> {
        let ix = row_index(row_number, self.rows.len())?;
        self.rows[ix] = row.to_vec();
        Ok(())
    }

    fn delete_row(&mut self, row_number: usize) -> SheetResult<()> {
        let ix = row_index(row_number, self.rows.len())?;
        self.rows.remove(ix);
        Ok(())
    }
}
