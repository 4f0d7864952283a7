//! One-shot orchestration: fetch, clean, merge, write.
//!
//! Kept separate from the CLI so the whole run is callable (and testable)
//! with explicit parameters instead of doing work at startup.

use crate::api::Client;
use crate::clean::{clean_indicator, clean_reference};
use crate::merge::merge_datasets;
use crate::models::{FetchResult, YearRange};
use crate::storage;
use crate::table::Table;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Parameters of one run.
#[derive(Debug, Clone)]
pub struct JobParams {
    pub indicator: String,
    pub years: YearRange,
    pub reference_csv: PathBuf,
    pub out_dir: PathBuf,
}

/// What a run produced, printed as the one-line summary on success.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub raw_json: PathBuf,
    pub merged_csv: PathBuf,
    pub rows_merged: usize,
    pub cols_merged: usize,
}

/// Fetch the indicator series and run the full pipeline against the local
/// reference file. Strictly sequential; the fetch completes before cleaning
/// starts, cleaning before merging, merging before writing.
pub fn run(client: &Client, params: &JobParams) -> Result<RunSummary> {
    let reference = storage::load_reference_csv(&params.reference_csv)
        .with_context(|| format!("load reference {}", params.reference_csv.display()))?;

    let fetched = client
        .fetch_indicator(&params.indicator, params.years)
        .with_context(|| format!("fetch indicator {}", params.indicator))?;
    info!(
        "fetched {} raw records ({} usable rows)",
        fetched.raw.len(),
        fetched.rows.len()
    );

    process(reference, &fetched, params)
}

/// Clean, merge, and write. Split from [`run`] so tests can drive it with
/// synthetic data instead of the network.
pub fn process(reference: Table, fetched: &FetchResult, params: &JobParams) -> Result<RunSummary> {
    let raw_json = storage::raw_json_path(&params.out_dir, &params.indicator, params.years);
    storage::save_raw_json(&fetched.raw, &raw_json)
        .with_context(|| format!("archive raw payload to {}", raw_json.display()))?;

    let reference = clean_reference(reference);
    let indicator = clean_indicator(&fetched.rows);
    let merged = merge_datasets(&reference, &indicator);

    let merged_csv = storage::merged_csv_path(&params.out_dir, &params.indicator);
    storage::save_table_csv(&merged, &merged_csv)
        .with_context(|| format!("write merged table to {}", merged_csv.display()))?;

    Ok(RunSummary {
        raw_json,
        merged_csv,
        rows_merged: merged.rows.len(),
        cols_merged: merged.headers.len(),
    })
}

/// Default indicator fetched when none is given on the command line.
pub const DEFAULT_INDICATOR: &str = "SP.POP.TOTL";
