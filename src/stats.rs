//! Quick analysis over a merged table.

use crate::table::Table;
use std::cmp::Ordering;

/// Top `n` rows by numeric value in `value_col`, descending.
///
/// Keeps the `country_name`, `iso3`, and value columns (those of them the
/// table actually has). Rows whose value cell is missing or non-numeric are
/// dropped.
pub fn top_n(table: &Table, value_col: &str, n: usize) -> Table {
    let cols: Vec<&str> = ["country_name", "iso3", value_col]
        .into_iter()
        .filter(|c| table.column_index(c).is_some())
        .collect();

    let mut ranked: Vec<(f64, Vec<String>)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let v = table.cell(row, value_col).trim().parse::<f64>().ok()?;
            let cells = cols
                .iter()
                .map(|c| table.cell(row, c).to_string())
                .collect();
            Some((v, cells))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.truncate(n);

    Table {
        headers: cols.iter().map(|c| c.to_string()).collect(),
        rows: ranked.into_iter().map(|(_, cells)| cells).collect(),
    }
}
