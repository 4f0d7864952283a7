//! File I/O: reference CSV in, raw JSON archive and merged CSV out.

use crate::models::YearRange;
use crate::table::Table;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Archive path for the raw API payload: `<out>/raw/worldbank_<ind>_<start>_<end>.json`.
pub fn raw_json_path(out_dir: &Path, indicator: &str, years: YearRange) -> PathBuf {
    out_dir.join("raw").join(format!(
        "worldbank_{}_{}_{}.json",
        indicator, years.start, years.end
    ))
}

/// Merged output path: `<out>/processed/merged_countries_<ind>.csv`.
pub fn merged_csv_path(out_dir: &Path, indicator: &str) -> PathBuf {
    out_dir
        .join("processed")
        .join(format!("merged_countries_{}.csv", indicator))
}

/// Load a delimited reference file with an arbitrary header into a [`Table`].
pub fn load_reference_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open reference file {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    let mut table = Table::new(headers);
    for record in rdr.records() {
        let record = record.with_context(|| format!("read row of {}", path.display()))?;
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        // Ragged rows are padded so every row has one cell per header.
        row.resize(table.headers.len(), String::new());
        table.rows.push(row);
    }
    Ok(table)
}

/// Save the unmodified raw API records as an indented JSON array.
pub fn save_raw_json<P: AsRef<Path>>(records: &[Value], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut f =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a table as CSV with header (no index column).
pub fn save_table_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
