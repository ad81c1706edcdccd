//! Tests for the remote type catalog.
use rfcmap::catalog::{self, SapType};

#[test]
fn test_catalog_names() {
    let names: Vec<_> = SapType::ALL.iter().map(|t| t.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "STRING", "CHAR", "DECIMAL", "NUMBER", "DATE", "DATETIME", "INT", "ARRAY", "STRUCT",
            "TABLE"
        ]
    );
    assert_eq!(SapType::DEFAULT, SapType::Char);
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(SapType::parse(" decimal "), Some(SapType::Decimal));
    assert_eq!(SapType::parse("DateTime"), Some(SapType::Datetime));
    assert_eq!(SapType::parse("RAW"), None);
}

#[test]
fn test_search() {
    assert_eq!(catalog::search(""), SapType::ALL.to_vec());
    assert_eq!(
        catalog::search("date"),
        vec![SapType::Date, SapType::Datetime]
    );
    assert_eq!(
        catalog::search("ar"),
        vec![SapType::Char, SapType::Array]
    );
    assert!(catalog::search("xyz").is_empty());
}

#[test]
fn test_unknown_types_are_kept_verbatim() {
    let def = rfcmap::normalize::normalize(&serde_json::json!({
        "importMapping": [{ "type": "RAWSTRING" }]
    }));
    assert_eq!(def.import_mapping[0].data_type, "RAWSTRING");
    assert_eq!(def.import_mapping[0].sap_type(), None);
}

#[test]
fn test_serde_uses_catalog_names() {
    assert_eq!(serde_json::to_string(&SapType::Datetime).unwrap(), "\"DATETIME\"");
}
