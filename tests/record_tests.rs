#![cfg(feature = "json")]

use std::fs;

use chrono::NaiveDate;
use devis::core::*;
use devis::record::{parse_quote_record, to_json_string, write_json};
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_quote() -> Document {
    DocumentBuilder::new(
        DocumentType::Quote,
        CompanyBuilder::new("Ma Société")
            .address("12 rue des Lilas\n75011 Paris")
            .email("bonjour@societe.example")
            .build(),
        PartyBuilder::new("Crème & Co").build(),
    )
    .number("D-0001")
    .date(date(2025, 6, 1))
    .subject("Rénovation cuisine")
    .validity_end_date(date(2025, 12, 31))
    .notes("Acompte de 30 % à la commande.")
    .add_line(
        LineItemBuilder::new("service", "Main d'œuvre", dec!(2), dec!(100))
            .unit("h")
            .tax(dec!(20))
            .build(),
    )
    .add_line(
        LineItemBuilder::new("product", "Évier inox", dec!(1), dec!(50))
            .discount(dec!(50))
            .tax(dec!(5))
            .build(),
    )
    .build()
    .unwrap()
}

#[test]
fn written_record_has_expected_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quote-D-0001.json");
    write_json(&sample_quote(), &path).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["type"], "quote");
    assert_eq!(value["number"], "D-0001");
    assert_eq!(value["date"], "2025-06-01");
    assert_eq!(value["validity_end_date"], "2025-12-31");
    assert_eq!(value["subject"], "Rénovation cuisine");
    assert_eq!(value["customer"]["name"], "Crème & Co");
    assert_eq!(value["lines"].as_array().unwrap().len(), 2);
    assert_eq!(value["lines"][1]["total_ex_tax"].as_f64(), Some(25.0));
    assert_eq!(value["subtotal_ex_tax"].as_f64(), Some(225.0));
    assert_eq!(value["total_tax"].as_f64(), Some(41.25));
    assert_eq!(value["net_payable"].as_f64(), Some(266.25));
}

#[test]
fn record_keeps_non_ascii_literal_and_indents() {
    let json = to_json_string(&sample_quote()).unwrap();
    assert!(json.contains("Crème & Co"));
    assert!(json.contains("Main d'œuvre"));
    assert!(!json.contains("\\u"));
    assert!(json.contains("\n  \"type\": \"quote\""));
}

#[test]
fn missing_optionals_are_null() {
    let doc = DocumentBuilder::new(
        DocumentType::Invoice,
        CompanyBuilder::new("Iss").build(),
        PartyBuilder::new("Cli").build(),
    )
    .date(date(2025, 1, 2))
    .build()
    .unwrap();
    let value: Value = serde_json::from_str(&to_json_string(&doc).unwrap()).unwrap();
    assert_eq!(value["type"], "invoice");
    assert!(value["number"].is_null());
    assert!(value["subject"].is_null());
    assert!(value["validity_end_date"].is_null());
    assert_eq!(value["lines"], Value::Array(vec![]));
}

#[test]
fn writing_twice_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.json");
    let doc = sample_quote();
    write_json(&doc, &path).unwrap();
    let first = fs::read(&path).unwrap();
    write_json(&doc, &path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("nested").join("quote.json");
    write_json(&sample_quote(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn exported_quote_imports_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quote.json");
    let doc = sample_quote();
    write_json(&doc, &path).unwrap();

    let (customer, lines) = parse_quote_record(&path).unwrap();
    assert_eq!(customer, "Crème & Co");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].item_key, "service");
    assert_eq!(lines[0].description, "Main d'œuvre");
    assert_eq!(lines[0].unit, "h");
    assert_eq!(lines[1].discount_pct, dec!(50));
    assert_eq!(lines[1].tax_pct, dec!(5));

    // Rebuilt as an invoice, the amounts carry over.
    let invoice = DocumentBuilder::new(
        DocumentType::Invoice,
        doc.issuer.clone(),
        PartyBuilder::new(customer).build(),
    )
    .lines(lines)
    .build()
    .unwrap();
    assert_eq!(invoice.totals(), doc.totals());
}

#[test]
fn import_skips_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{
            "customer": {"name": "ACME"},
            "lines": [
                {"item_key": "ok", "description": "Fine", "quantity": 1, "unit_price": 10},
                {"item_key": "no-price", "description": "Missing", "quantity": 1},
                {"item_key": "bad", "description": "Text qty", "quantity": "abc", "unit_price": 1},
                "not an object",
                {"item_key": "ok2", "description": "Also fine", "quantity": "2", "unit_price": "4.5"}
            ]
        }"#,
    )
    .unwrap();

    let (customer, lines) = parse_quote_record(&path).unwrap();
    assert_eq!(customer, "ACME");
    let keys: Vec<_> = lines.iter().map(|l| l.item_key.as_str()).collect();
    assert_eq!(keys, ["ok", "ok2"]);
    assert_eq!(lines[1].total_ex_tax(), dec!(9.00));
}

#[test]
fn import_without_customer_or_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "{}").unwrap();
    let (customer, lines) = parse_quote_record(&path).unwrap();
    assert_eq!(customer, "");
    assert!(lines.is_empty());
}

#[test]
fn import_of_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = parse_quote_record(dir.path().join("nope.json"));
    assert!(matches!(result, Err(DocumentError::Io(_))));
}

#[test]
fn import_of_invalid_json_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"lines\": [").unwrap();
    assert!(matches!(parse_quote_record(&path), Err(DocumentError::Json(_))));

    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(parse_quote_record(&path), Err(DocumentError::Json(_))));
}
