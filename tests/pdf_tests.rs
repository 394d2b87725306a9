#![cfg(feature = "pdf")]

use std::path::Path;

use chrono::NaiveDate;
use devis::core::*;
use devis::pdf::{self, DrawOp};
use lopdf::Object;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn issuer(logo: &Path) -> Company {
    CompanyBuilder::new("My Co")
        .address("1 rue de la Paix")
        .email("me@co.example")
        .phone("+33 1 23 45 67 89")
        .tax_id("123 456 789 00010")
        .logo(logo)
        .logo_box(80.0, 40.0, 10.0)
        .build()
}

/// Quote with a full issuer block, a realization block and `n` rows.
fn rich_quote(logo: &Path, n: usize) -> Document {
    let lines = (0..n).map(|i| {
        LineItemBuilder::new(format!("k{i}"), format!("Line {i}"), dec!(1), dec!(1.0)).build()
    });
    DocumentBuilder::new(
        DocumentType::Quote,
        issuer(logo),
        PartyBuilder::new("Foo Inc").address("Somewhere").build(),
    )
    .number("D-4242")
    .date(date(2025, 1, 2))
    .subject("Test subject")
    .validity_end_date(date(2025, 1, 31))
    .notes("Note A\nNote B")
    .lines(lines)
    .build()
    .unwrap()
}

fn simple(doc_type: DocumentType) -> Document {
    DocumentBuilder::new(
        doc_type,
        CompanyBuilder::new("Ma Société").build(),
        PartyBuilder::new("Client SA").build(),
    )
    .number("TST-0001")
    .add_line(
        LineItemBuilder::new("svc", "Service", dec!(2), dec!(100.0))
            .discount(dec!(10.0))
            .build(),
    )
    .add_line(LineItemBuilder::new("prod", "Produit", dec!(1), dec!(50.0)).build())
    .build()
    .unwrap()
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 128]));
    img.save(path).unwrap();
}

fn has_image_xobject(pdf: &lopdf::Document) -> bool {
    pdf.objects.values().any(|obj| match obj {
        Object::Stream(stream) => stream
            .dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .map(|name| name == b"Image")
            .unwrap_or(false),
        _ => false,
    })
}

#[test]
fn export_produces_non_empty_file() {
    let dir = TempDir::new().unwrap();
    for doc_type in [DocumentType::Quote, DocumentType::Invoice] {
        let out = dir.path().join(format!("{}.pdf", doc_type.as_str()));
        pdf::export_pdf(&simple(doc_type), &out).unwrap();
        assert!(out.exists());
        assert!(std::fs::metadata(&out).unwrap().len() > 200);
    }
}

#[test]
fn output_is_a_loadable_pdf() {
    let bytes = pdf::render_pdf(&simple(DocumentType::Invoice)).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[test]
fn forty_rows_paginate_despite_missing_logo() {
    let dir = TempDir::new().unwrap();
    let doc = rich_quote(&dir.path().join("no-logo.png"), 40);
    let out = dir.path().join("rich.pdf");
    pdf::export_pdf(&doc, &out).unwrap();

    let pdf = lopdf::Document::load(&out).unwrap();
    assert_eq!(pdf.get_pages().len(), 2);
    assert!(!has_image_xobject(&pdf));
}

#[test]
fn rich_header_leaves_room_for_36_rows() {
    let dir = TempDir::new().unwrap();
    let layout = pdf::paginate(&rich_quote(&dir.path().join("absent.png"), 40));
    let rows = |page: &pdf::Page| page.texts().filter(|t| t.starts_with("Line ")).count();
    assert_eq!(rows(&layout.pages[0]), 36);
    assert_eq!(rows(&layout.pages[1]), 4);

    // Totals and notes follow the last row on the continuation page.
    let last = &layout.pages[1];
    assert!(last.texts().any(|t| t.starts_with("NET PAYABLE:")));
    assert!(last.text_y("Note B").is_some());
    assert_eq!(last.text_y("Realization"), None);
}

#[test]
fn real_logo_is_embedded_once_and_drawn_on_every_page() {
    let dir = TempDir::new().unwrap();
    let logo = dir.path().join("logo.png");
    write_png(&logo, 160, 40);
    let doc = rich_quote(&logo, 100);

    let layout = pdf::paginate(&doc);
    assert!(layout.page_count() >= 3);
    assert!(layout.pages.iter().all(pdf::Page::has_logo));

    let pdf = lopdf::Document::load_mem(&pdf::render_pdf(&doc).unwrap()).unwrap();
    assert_eq!(pdf.get_pages().len(), layout.page_count());
    assert!(has_image_xobject(&pdf));
}

#[test]
fn logo_is_fitted_into_configured_box() {
    let dir = TempDir::new().unwrap();
    let logo = dir.path().join("logo.png");
    write_png(&logo, 40, 80);
    let layout = pdf::paginate(&rich_quote(&logo, 1));
    let placed = layout.pages[0]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Logo { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
        .unwrap();
    // 40x80 into an 80x40 box keeps the aspect ratio: 20x40.
    assert_eq!(placed, (20.0, 40.0));
}

#[test]
fn undecodable_logo_is_ignored() {
    let dir = TempDir::new().unwrap();
    let logo = dir.path().join("logo.png");
    std::fs::write(&logo, b"definitely not a png").unwrap();
    let doc = rich_quote(&logo, 3);
    assert!(pdf::load_logo(&logo).is_err());
    assert!(pdf::issuer_logo(&doc.issuer).is_none());
    assert!(pdf::render_pdf(&doc).is_ok());
}

#[test]
fn export_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("a").join("b").join("invoice.pdf");
    pdf::export_pdf(&simple(DocumentType::Invoice), &out).unwrap();
    assert!(out.exists());
}

#[test]
fn long_notes_add_pages_without_table_header() {
    let notes = "word ".repeat(2_000);
    let mut doc = simple(DocumentType::Invoice);
    doc.notes = Some(notes);
    let layout = pdf::paginate(&doc);
    assert!(layout.page_count() >= 2);
    for page in &layout.pages[1..] {
        assert_eq!(page.text_y("Description"), None);
        assert!(page.text_y("INVOICE TST-0001").is_some());
    }
}
