//! Synchronous client for the **World Bank Indicators API (v2)**.
//!
//! Targets the `country/all/indicator/{code}` endpoint and returns both the
//! unmodified raw records (for archiving) and tidy [`IndicatorRow`]s.
//! Pagination is handled automatically.
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; we accept both.
//! - A malformed page (not `[meta, records]`) ends pagination with a warning
//!   rather than an error; whatever was accumulated so far is returned.
//! - Network timeouts use a sane default (30s total, 10s connect).

use crate::models::{Entry, FetchResult, IndicatorRow, PageMeta, YearRange};
use anyhow::{Context, Result, bail};
use log::warn;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Page size requested from the API. The whole "all countries" record set for
/// one indicator and a decade fits in a single page at this size.
pub const DEFAULT_PER_PAGE: u32 = 20_000;

// Safety cap to avoid pathological jobs
const MAX_PAGES: u32 = 1_000;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub per_page: u32,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wb_merge/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://api.worldbank.org/v2".into(),
            per_page: DEFAULT_PER_PAGE,
            http,
        }
    }
}

/// What one absorbed page tells the pagination loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Valid `[meta, records]` page; `pages` is the reported total page count.
    Continue { pages: u32 },
    /// Malformed page (not an array, or fewer than two elements); stop and
    /// keep what was accumulated.
    Stop,
}

/// Absorb one page body into `out`.
///
/// Raw records are appended unmodified; each record is also flattened into an
/// [`IndicatorRow`] unless it lacks a country name or ISO3 code. A response
/// carrying an API `message` payload is a hard error; a response without the
/// expected `[meta, records]` shape ends pagination with a warning, since the
/// API uses that shape for "nothing more to say" as well as for trouble.
pub fn absorb_page(body: &Value, out: &mut FetchResult) -> Result<PageOutcome> {
    let Some(arr) = body.as_array() else {
        warn!("unexpected response shape (not a top-level array); stopping pagination");
        return Ok(PageOutcome::Stop);
    };

    // If first element has "message", surface the API error.
    if let Some(first) = arr.first()
        && first.get("message").is_some()
    {
        bail!("world bank api error: {}", first);
    }

    if arr.len() < 2 {
        warn!(
            "response has {} top-level element(s) instead of [meta, records]; stopping pagination",
            arr.len()
        );
        return Ok(PageOutcome::Stop);
    }

    let meta: PageMeta = serde_json::from_value(arr[0].clone()).context("parse page metadata")?;
    let records = arr[1]
        .as_array()
        .context("parse records: position 1 is not an array")?;

    out.raw.extend(records.iter().cloned());
    for record in records {
        match serde_json::from_value::<Entry>(record.clone()) {
            Ok(entry) => {
                if let Some(row) = IndicatorRow::from_entry(&entry) {
                    out.rows.push(row);
                }
            }
            // One bad record should not abort the whole fetch; it stays in
            // the raw archive but is dropped from the flattened table.
            Err(e) => warn!("skipping malformed indicator record: {}", e),
        }
    }

    Ok(PageOutcome::Continue { pages: meta.pages })
}

impl Client {
    /// Fetch all observations for one indicator over an inclusive year range.
    ///
    /// Pages through the endpoint until the metadata-reported page count is
    /// reached. Returns the unmodified raw records plus the flattened rows.
    ///
    /// ### Errors
    /// - Network/HTTP error (after a small retry on 5xx and transport errors)
    /// - JSON decoding error
    /// - API-level error payload (surfaced as an error)
    pub fn fetch_indicator(&self, indicator: &str, years: YearRange) -> Result<FetchResult> {
        if indicator.trim().is_empty() {
            bail!("indicator code required");
        }

        let indicator_spec =
            percent_encoding::utf8_percent_encode(indicator.trim(), SAFE).to_string();
        let url = format!(
            "{}/country/all/indicator/{}?format=json&date={}&per_page={}",
            self.base_url,
            indicator_spec,
            years.to_query_param(),
            self.per_page
        );

        // Small retry for transient failures (5xx / network errors)
        let get_json = |u: &str| -> Result<Value> {
            let mut last_err: Option<anyhow::Error> = None;
            for backoff_ms in [100u64, 300, 700] {
                match self.http.get(u).send() {
                    Ok(r) if r.status().is_success() => {
                        return r.json().context("decode json");
                    }
                    Ok(r) if r.status().is_server_error() => { /* retry */ }
                    Ok(r) => bail!("request failed with HTTP {}", r.status()),
                    Err(e) => last_err = Some(e.into()),
                }
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
            bail!("network error: {:?}", last_err);
        };

        let mut out = FetchResult::default();
        let mut page = 1u32;
        loop {
            if page > MAX_PAGES {
                bail!("page limit exceeded ({})", MAX_PAGES);
            }
            let page_url = format!("{}&page={}", url, page);
            let body = get_json(&page_url).with_context(|| format!("GET {}", page_url))?;

            match absorb_page(&body, &mut out)? {
                PageOutcome::Stop => break,
                PageOutcome::Continue { pages } => {
                    if page >= pages {
                        break;
                    }
                    page += 1;
                }
            }
        }

        if out.rows.is_empty() {
            warn!(
                "fetch for {} ({}) produced no usable rows",
                indicator,
                years.to_query_param()
            );
        }

        Ok(out)
    }
}
