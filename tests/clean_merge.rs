use wb_merge::clean::{IndicatorValue, clean_indicator, clean_reference};
use wb_merge::merge::merge_datasets;
use wb_merge::models::IndicatorRow;
use wb_merge::normalize::NORM_COL;
use wb_merge::table::Table;

fn indicator_row(name: &str, iso3: &str, year: i32, value: Option<f64>) -> IndicatorRow {
    IndicatorRow {
        country_name: name.into(),
        iso3: iso3.into(),
        year: Some(year),
        indicator: "SP.POP.TOTL".into(),
        value,
    }
}

fn reference(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

#[test]
fn cleaned_indicator_has_one_row_per_iso3() {
    let rows = vec![
        indicator_row("Germany", "DEU", 2024, None),
        indicator_row("Germany", "DEU", 2023, Some(83.0)),
        indicator_row("Germany", "deu ", 2020, Some(80.0)),
        indicator_row("France", "FRA", 2024, Some(68.0)),
        indicator_row("France", "FRA", 2023, Some(67.0)),
    ];
    let cleaned = clean_indicator(&rows);

    let mut iso3s: Vec<&str> = cleaned.iter().map(|c| c.iso3.as_str()).collect();
    iso3s.dedup();
    assert_eq!(iso3s, ["DEU", "FRA"]);
    assert_eq!(cleaned[0].year, Some(2023));
    assert_eq!(cleaned[0].value, 83.0);
    assert_eq!(cleaned[1].year, Some(2024));
}

#[test]
fn reference_cleaning_derives_norm_and_uppercases_iso3() {
    let table = reference(
        &["Country Name", "Alpha-3", "World_Region"],
        &[&["  Czech Republic ", "cze", "Europe"], &["Laos", "", "Asia"]],
    );
    let cleaned = clean_reference(table);

    assert_eq!(cleaned.headers, ["country_name", "iso3", "region", NORM_COL]);
    assert_eq!(cleaned.rows[0], ["Czech Republic", "CZE", "Europe", "czechia"]);
    assert_eq!(cleaned.rows[1], ["Laos", "", "Asia", "lao pdr"]);
}

#[test]
fn reference_without_name_column_gets_empty_norm() {
    let table = reference(&["code", "population"], &[&["X1", "5"]]);
    let cleaned = clean_reference(table);
    assert_eq!(cleaned.headers, ["code", "population", NORM_COL]);
    assert_eq!(cleaned.rows[0], ["X1", "5", ""]);
}

#[test]
fn merge_joins_on_iso3_and_preserves_row_count() {
    let cleaned_ref = clean_reference(reference(
        &["name", "iso3"],
        &[
            &["Czech Republic", "CZE"],
            &["Atlantis", "ATL"],
            &["France", "FRA"],
        ],
    ));
    let indicator = vec![
        IndicatorValue {
            iso3: "CZE".into(),
            country_name: "Czechia".into(),
            country_norm: "czechia".into(),
            indicator: "SP.POP.TOTL".into(),
            year: Some(2023),
            value: 10_500_000.0,
        },
        IndicatorValue {
            iso3: "FRA".into(),
            country_name: "France".into(),
            country_norm: "france".into(),
            indicator: "SP.POP.TOTL".into(),
            year: Some(2024),
            value: 68_000_000.0,
        },
    ];

    let merged = merge_datasets(&cleaned_ref, &indicator);
    assert_eq!(merged.rows.len(), cleaned_ref.rows.len());
    assert_eq!(
        *merged.headers.last().unwrap(),
        "value",
        "indicator columns are appended last"
    );

    let row = &merged.rows[0];
    assert_eq!(merged.cell(row, "country_name"), "Czech Republic");
    assert_eq!(merged.cell(row, "iso3"), "CZE");
    assert_eq!(merged.cell(row, "indicator"), "SP.POP.TOTL");
    assert_eq!(merged.cell(row, "value"), "10500000");

    // Unmatched reference rows are kept with empty indicator cells.
    let atlantis = &merged.rows[1];
    assert_eq!(merged.cell(atlantis, "indicator"), "");
    assert_eq!(merged.cell(atlantis, "value"), "");
}

#[test]
fn merge_falls_back_to_normalized_name() {
    // Reference has no ISO3 column at all; "Laos" must still match the
    // indicator side keyed by the normalized name "lao pdr".
    let cleaned_ref = clean_reference(reference(&["name"], &[&["Laos"], &["Germany"]]));
    let rows = vec![
        indicator_row("Lao PDR", "LAO", 2023, Some(7_600_000.0)),
        indicator_row("Germany", "DEU", 2023, Some(83_000_000.0)),
    ];
    let indicator = clean_indicator(&rows);

    let merged = merge_datasets(&cleaned_ref, &indicator);
    assert_eq!(merged.rows.len(), 2);
    assert_eq!(merged.cell(&merged.rows[0], "value"), "7600000");
    assert_eq!(merged.cell(&merged.rows[1], "value"), "83000000");
}

#[test]
fn empty_norm_keys_never_match() {
    let cleaned_ref = clean_reference(reference(&["code"], &[&["X1"]]));
    let indicator = vec![IndicatorValue {
        iso3: "".into(),
        country_name: "".into(),
        country_norm: "".into(),
        indicator: "X".into(),
        year: None,
        value: 1.0,
    }];
    let merged = merge_datasets(&cleaned_ref, &indicator);
    assert_eq!(merged.cell(&merged.rows[0], "value"), "");
}
