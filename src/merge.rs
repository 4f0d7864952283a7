//! Left join of the cleaned reference table with the reduced indicator data.

use crate::clean::IndicatorValue;
use crate::normalize::NORM_COL;
use crate::table::Table;
use ahash::AHashMap;
use log::warn;

/// Left-join the reference table to the indicator values.
///
/// Joins on `iso3` when the reference exposes one, otherwise on
/// `_country_norm`. Every reference row is retained exactly once; unmatched
/// rows get empty `indicator`/`value` cells. The indicator side is already
/// one row per key, so the join cannot fan out.
pub fn merge_datasets(reference: &Table, indicator: &[IndicatorValue]) -> Table {
    let key_col = if reference.column_index("iso3").is_some() {
        "iso3"
    } else {
        NORM_COL
    };
    if key_col == NORM_COL {
        warn!("reference table has no iso3 column; joining on normalized country name");
    }

    let mut lookup: AHashMap<&str, &IndicatorValue> = AHashMap::new();
    for iv in indicator {
        let key = if key_col == "iso3" {
            iv.iso3.as_str()
        } else {
            iv.country_norm.as_str()
        };
        // Empty keys never match; first entry wins (the side is unique anyway).
        if !key.is_empty() {
            lookup.entry(key).or_insert(iv);
        }
    }

    let mut headers = reference.headers.clone();
    headers.push("indicator".to_string());
    headers.push("value".to_string());

    let mut merged = Table::new(headers);
    for row in &reference.rows {
        let key = reference.cell(row, key_col);
        let mut out = row.clone();
        match lookup.get(key) {
            Some(iv) => {
                out.push(iv.indicator.clone());
                out.push(iv.value.to_string());
            }
            None => {
                out.push(String::new());
                out.push(String::new());
            }
        }
        merged.rows.push(out);
    }
    merged
}
