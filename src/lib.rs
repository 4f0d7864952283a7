//! wb-merge
//!
//! A small Rust library + CLI that fetches a country-level indicator series
//! from the World Bank Indicators API, reconciles it against a locally
//! supplied reference table of countries, and writes a merged,
//! analysis-ready CSV plus an archival copy of the raw response.
//!
//! The interesting part is name reconciliation: the two datasets spell
//! countries differently ("Ivory Coast" vs. "Cote d'Ivoire"), so both sides
//! are mapped onto a canonical join key — ISO3 where available, a normalized,
//! alias-substituted country name otherwise.
//!
//! ### Example
//! ```no_run
//! use wb_merge::{Client, YearRange};
//! use wb_merge::pipeline::{self, JobParams};
//!
//! let summary = pipeline::run(
//!     &Client::default(),
//!     &JobParams {
//!         indicator: "SP.POP.TOTL".into(),
//!         years: YearRange::new(2015, 2024),
//!         reference_csv: "all_countries.csv".into(),
//!         out_dir: "data".into(),
//!     },
//! )?;
//! println!("{} rows merged", summary.rows_merged);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod clean;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod stats;
pub mod storage;
pub mod table;

pub use api::Client;
pub use models::{FetchResult, IndicatorRow, YearRange};
pub use table::Table;
