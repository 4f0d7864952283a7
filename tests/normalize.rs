use wb_merge::normalize::{NORM_COL, normalize_country_name, standardize_columns};

#[test]
fn normalization_is_idempotent() {
    for name in ["Czech Republic", "USA", "Laos", "Germany", "Côte d'Ivoire"] {
        let once = normalize_country_name(name);
        assert_eq!(normalize_country_name(&once), once, "for {:?}", name);
    }
}

#[test]
fn alias_table_is_consistent() {
    assert_eq!(
        normalize_country_name("USA"),
        normalize_country_name("United States")
    );
    assert_eq!(normalize_country_name("USA"), "united states of america");
    assert_eq!(normalize_country_name("Czech Republic"), "czechia");
    assert_eq!(normalize_country_name("Laos"), "lao pdr");
    assert_eq!(normalize_country_name("Ivory Coast"), "cote divoire");
}

#[test]
fn missing_names_pass_through() {
    assert_eq!(normalize_country_name(""), "");
    assert_eq!(normalize_country_name("   "), "");
}

#[test]
fn column_mapping_is_case_and_whitespace_insensitive() {
    for header in ["Country Name", "country_name", "COUNTRYNAME", "  name  "] {
        let mapped = standardize_columns(&[header.to_string()]);
        assert_eq!(mapped, ["country_name"], "for {:?}", header);
    }
    let mapped = standardize_columns(&[
        "Alpha-3".to_string(),
        "World_Region".to_string(),
        "Sub_Region".to_string(),
    ]);
    assert_eq!(mapped, ["iso3", "region", "subregion"]);
}

#[test]
fn underscores_and_spaces_are_interchangeable() {
    let mapped = standardize_columns(&[
        "Country  Name".to_string(),
        "ISO Code 3".to_string(),
        "World Region".to_string(),
        "Sub Region".to_string(),
    ]);
    assert_eq!(mapped, ["country_name", "iso3", "region", "subregion"]);
}

#[test]
fn only_first_synonym_per_target_is_renamed() {
    let mapped = standardize_columns(&[
        "Country".to_string(),
        "Name".to_string(),
        "iso3".to_string(),
        "countryiso3code".to_string(),
    ]);
    // Later duplicates keep their original header so names never collide.
    assert_eq!(mapped, ["country_name", "Name", "iso3", "countryiso3code"]);
}

#[test]
fn unrecognized_headers_are_untouched() {
    let mapped = standardize_columns(&["population".to_string(), NORM_COL.to_string()]);
    assert_eq!(mapped, ["population", NORM_COL]);
}
