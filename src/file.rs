// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::write_row;

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Create/truncate `path` and write every row.
pub fn write_rows(path: &Path, rows: &[Vec<String>], sep: char) -> io::Result<()> {
    ensure_parent(path)?;
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()
}

/// Append rows, creating the file (and its directory) on first use.
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> io::Result<()> {
    ensure_parent(path)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()
}
