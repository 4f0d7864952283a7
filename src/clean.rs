//! Per-dataset postprocessing ahead of the merge.
//!
//! The reference side keeps its arbitrary columns and gains canonical header
//! names plus a `_country_norm` key column. The indicator side is reduced to
//! one row per ISO3: the most recent year that actually has a value.

use crate::models::IndicatorRow;
use crate::normalize::{NORM_COL, normalize_country_name, standardize_columns};
use crate::table::Table;
use log::warn;
use serde::Serialize;
use std::cmp::Reverse;

/// One cleaned indicator observation, ready to join. `value` is guaranteed
/// present; rows without one are dropped before reduction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorValue {
    pub iso3: String,
    pub country_name: String,
    pub country_norm: String,
    pub indicator: String,
    pub year: Option<i32>,
    pub value: f64,
}

/// Clean the reference table: canonical headers, uppercased ISO3, trimmed
/// country names, and a derived `_country_norm` column.
///
/// When no country-name column can be identified, `_country_norm` is empty
/// for every row and the merge cannot fall back to name matching for this
/// table; that degradation is logged rather than silent.
pub fn clean_reference(mut table: Table) -> Table {
    if table.is_empty() && table.headers.is_empty() {
        return table;
    }
    table.headers = standardize_columns(&table.headers);

    table.map_column("iso3", |s| s.trim().to_uppercase());
    table.map_column("country_name", |s| s.trim().to_string());

    let norm = match table.column_index("country_name") {
        Some(i) => table
            .rows
            .iter()
            .map(|row| {
                row.get(i)
                    .map(|name| normalize_country_name(name))
                    .unwrap_or_default()
            })
            .collect(),
        None => {
            warn!("reference table has no recognizable country-name column; name fallback disabled");
            vec![String::new(); table.rows.len()]
        }
    };
    table.push_column(NORM_COL, norm);
    table
}

/// Clean the flattened indicator rows: normalize codes and names, drop rows
/// with no value, and keep only the most recent valued year per ISO3.
pub fn clean_indicator(rows: &[IndicatorRow]) -> Vec<IndicatorValue> {
    let mut cleaned: Vec<IndicatorValue> = rows
        .iter()
        .filter_map(|r| {
            let value = r.value?;
            let country_name = r.country_name.trim().to_string();
            Some(IndicatorValue {
                iso3: r.iso3.trim().to_uppercase(),
                country_norm: normalize_country_name(&country_name),
                country_name,
                indicator: r.indicator.clone(),
                year: r.year,
                value,
            })
        })
        .collect();

    // ISO3 ascending, then year descending with missing years last.
    cleaned.sort_by(|a, b| {
        a.iso3
            .cmp(&b.iso3)
            .then_with(|| match (a.year, b.year) {
                (Some(x), Some(y)) => Reverse(x).cmp(&Reverse(y)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
    cleaned.dedup_by(|b, a| a.iso3 == b.iso3);
    cleaned
}
