use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inclusive year range used in API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn to_query_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

/// Metadata section returned by the API (position 0).
///
/// The API is loose here: `per_page` is sometimes a string, and error-ish
/// responses may omit fields entirely. Missing `pages` means "this is the
/// only page".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default, deserialize_with = "de_opt_u32_from_string_or_number")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: u32,
}

fn default_pages() -> u32 {
    1
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_opt_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as u32))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            Ok(Some(v as u32))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map(Some).map_err(E::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// `{id, value}` pair the API uses for both `country` and `indicator`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeName {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Raw record from the API (position 1 array). All fields optional: records
/// for aggregates and discontinued series come back with holes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub indicator: Option<CodeName>,
    #[serde(default)]
    pub country: Option<CodeName>,
    #[serde(default)]
    pub countryiso3code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub value: Option<f64>,
}

/// Serde helper: coerce a JSON number, numeric string, or null to `Option<f64>`.
/// Unparseable values become `None` rather than an error.
fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<f64>().ok())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// Flattened observation (one row = one country/year cell).
///
/// `year` and `value` are already numerically coerced; unparseable inputs are
/// `None`. Rows whose raw record lacked a country name or ISO3 code never
/// become an `IndicatorRow` at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorRow {
    pub country_name: String,
    pub iso3: String,
    pub year: Option<i32>,
    pub indicator: String,
    pub value: Option<f64>,
}

impl IndicatorRow {
    /// Flatten a raw entry. Returns `None` when the record has no country
    /// name or no ISO3 field (such rows are dropped, not kept as blanks).
    pub fn from_entry(e: &Entry) -> Option<Self> {
        let country_name = e.country.as_ref()?.value.clone()?;
        let iso3 = e.countryiso3code.clone()?;
        let indicator = e
            .indicator
            .as_ref()
            .and_then(|c| c.id.clone())
            .unwrap_or_default();
        let year = e.date.as_deref().and_then(|d| d.trim().parse::<i32>().ok());
        Some(Self {
            country_name,
            iso3,
            year,
            indicator,
            value: e.value,
        })
    }
}

/// Everything one paginated fetch produced: the unmodified raw records for
/// archiving, and the flattened tabular view.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub raw: Vec<Value>,
    pub rows: Vec<IndicatorRow>,
}
