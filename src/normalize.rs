//! Country-name and column-name normalization.
//!
//! Two independently sourced tables rarely agree on spelling: the reference
//! file may say "Ivory Coast" where the World Bank says "Cote d'Ivoire", and
//! its ISO3 column may be headed "Alpha-3". This module maps both sides onto
//! canonical forms so the merge has a common key to join on.

use ahash::{AHashMap, AHashSet};
use regex::Regex;
use std::sync::LazyLock;

/// Column name the cleaners store the normalized country name under.
pub const NORM_COL: &str = "_country_norm";

/// Known alternate spellings mapped to the normalized form the World Bank
/// uses. Keys and values are already in normalized form (lowercase, no
/// punctuation, single spaces), so normalization stays idempotent.
static ALIASES: LazyLock<AHashMap<&'static str, &'static str>> = LazyLock::new(|| {
    AHashMap::from_iter([
        ("czech republic", "czechia"),
        ("laos", "lao pdr"),
        ("bahamas", "bahamas the"),
        ("cape verde", "cabo verde"),
        ("congo brazzaville", "congo rep"),
        ("congo drc", "congo dem rep"),
        ("eswatini", "swaziland"),
        ("gambia", "gambia the"),
        ("ivory coast", "cote divoire"),
        ("north korea", "korea dem peoples rep"),
        ("south korea", "korea rep"),
        ("vietnam", "viet nam"),
        ("russia", "russian federation"),
        ("usa", "united states of america"),
        ("united states", "united states of america"),
    ])
});

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("regex"));
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("regex"));

/// Normalize a country name into the canonical join key: lowercase, strip
/// punctuation, collapse whitespace, then substitute known aliases.
/// Idempotent; empty input stays empty.
pub fn normalize_country_name(name: &str) -> String {
    let s = name.trim().to_lowercase();
    let s = NON_WORD.replace_all(&s, "");
    let s = MULTI_SPACE.replace_all(s.trim(), " ").into_owned();
    match ALIASES.get(s.as_str()) {
        Some(alias) => (*alias).to_string(),
        None => s,
    }
}

/// Canonical target for a recognized column-name synonym, if any.
///
/// Matching is case-insensitive and whitespace-insensitive: underscores and
/// whitespace runs are treated alike, so `"Country Name"`, `"country_name"`,
/// and `"COUNTRYNAME"` all resolve to `country_name`.
fn canonical_target(header: &str) -> Option<&'static str> {
    let key = header.trim().to_lowercase().replace('_', " ");
    let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
    match key.as_str() {
        "country" | "country name" | "name" | "countryname" => Some("country_name"),
        "region" | "world region" => Some("region"),
        "iso3" | "iso 3" | "iso code 3" | "alpha-3" | "iso3code" | "countryiso3code" => {
            Some("iso3")
        }
        "subregion" | "sub region" => Some("subregion"),
        _ => None,
    }
}

/// Rename recognized headers to their canonical names.
///
/// Only the first header matching each canonical target is renamed; later
/// duplicates are left untouched so the result never has colliding names.
pub fn standardize_columns(headers: &[String]) -> Vec<String> {
    let mut taken: AHashSet<&'static str> = AHashSet::new();
    headers
        .iter()
        .map(|h| match canonical_target(h) {
            Some(target) if taken.insert(target) => target.to_string(),
            _ => h.clone(),
        })
        .collect()
}
