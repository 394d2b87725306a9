use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Company, Document, DocumentError, DocumentType, LineItem, Party, Totals};

/// On-disk form of a document.
///
/// Field order here is the field order in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: Option<String>,
    /// ISO-8601 date.
    pub date: NaiveDate,
    pub issuer: CompanyRecord,
    pub customer: PartyRecord,
    pub lines: Vec<LineRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal_ex_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_payable: Decimal,
    pub subject: Option<String>,
    pub validity_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub logo_path: Option<String>,
    pub logo_max_width: Option<f32>,
    pub logo_max_height: Option<f32>,
    pub logo_margin_right: Option<f32>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecord {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub item_key: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_pct: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_pct: Decimal,
    /// Derived; ignored on import.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_ex_tax: Decimal,
}

/// Map a document to its record. Totals come from [`Totals::of`], the same
/// values the PDF prints.
pub fn to_record(doc: &Document) -> DocumentRecord {
    let totals = Totals::of(doc);
    DocumentRecord {
        doc_type: doc.doc_type,
        number: doc.number.clone(),
        date: doc.date,
        issuer: company_record(&doc.issuer),
        customer: party_record(&doc.customer),
        lines: doc.lines.iter().map(line_record).collect(),
        subtotal_ex_tax: totals.subtotal_ex_tax,
        total_tax: totals.total_tax,
        net_payable: totals.net_payable,
        subject: doc.subject.clone(),
        validity_end_date: doc.validity_end_date,
    }
}

fn company_record(company: &Company) -> CompanyRecord {
    CompanyRecord {
        name: company.name.clone(),
        logo_path: company
            .logo_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        logo_max_width: company.logo_max_width,
        logo_max_height: company.logo_max_height,
        logo_margin_right: company.logo_margin_right,
        address: company.address.clone(),
        email: company.email.clone(),
        phone: company.phone.clone(),
        tax_id: company.tax_id.clone(),
    }
}

fn party_record(party: &Party) -> PartyRecord {
    PartyRecord {
        name: party.name.clone(),
        address: party.address.clone(),
        email: party.email.clone(),
        phone: party.phone.clone(),
        tax_id: party.tax_id.clone(),
    }
}

fn line_record(line: &LineItem) -> LineRecord {
    LineRecord {
        item_key: line.item_key.clone(),
        description: line.description.clone(),
        quantity: line.quantity,
        unit_price: line.unit_price,
        discount_pct: line.discount_pct,
        unit: line.unit.clone(),
        tax_pct: line.tax_pct,
        total_ex_tax: line.total_ex_tax(),
    }
}

/// Pretty-printed record: 2-space indentation, non-ASCII kept literal.
pub fn to_json_string(doc: &Document) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(&to_record(doc))
        .map_err(|e| DocumentError::Json(format!("failed to serialize record: {e}")))
}

/// Write the record of `doc` to `path`, creating parent directories.
///
/// The output depends only on the document, so writing the same document
/// twice produces identical bytes.
pub fn write_json(doc: &Document, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let json = to_json_string(doc)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        doc_type = doc.doc_type.as_str(),
        lines = doc.lines.len(),
        "wrote document record"
    );
    Ok(())
}
