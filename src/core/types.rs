use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{self, Totals};

/// Kind of commercial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// A priced offer, optionally carrying a subject and a validity date.
    Quote,
    /// A request for payment.
    Invoice,
}

impl DocumentType {
    /// Wire tag used in records, file names and counter keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Invoice => "invoice",
        }
    }

    /// Parse from the wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "quote" => Some(Self::Quote),
            "invoice" => Some(Self::Invoice),
            _ => None,
        }
    }

    /// Heading printed at the top of every page.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Quote => "QUOTE",
            Self::Invoice => "INVOICE",
        }
    }

    /// Prefix of generated document numbers ("D-0001", "F-0001").
    pub fn number_prefix(&self) -> &'static str {
        match self {
            Self::Quote => "D-",
            Self::Invoice => "F-",
        }
    }
}

/// Issuing company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Image drawn in the top-right corner of each page, if it can be loaded.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    /// Logo box width in points (default 60).
    #[serde(default)]
    pub logo_max_width: Option<f32>,
    /// Logo box height in points (defaults to the width).
    #[serde(default)]
    pub logo_max_height: Option<f32>,
    /// Gap between the logo box and the right margin in points (default 20).
    #[serde(default)]
    pub logo_margin_right: Option<f32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Company registration / tax identifier (SIRET, VAT number…).
    #[serde(default)]
    pub tax_id: Option<String>,
}

/// Customer (or any third party) of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

/// One billable row of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog key of the billed item.
    pub item_key: String,
    pub description: String,
    pub quantity: Decimal,
    /// Unit price excluding tax.
    pub unit_price: Decimal,
    /// Discount percentage (0–100).
    pub discount_pct: Decimal,
    /// Free-form unit label ("h", "pcs", …).
    pub unit: String,
    /// Tax percentage (0–100).
    pub tax_pct: Decimal,
}

impl LineItem {
    /// Line total excluding tax, discount applied, rounded to cents.
    pub fn total_ex_tax(&self) -> Decimal {
        money::line_total_ex_tax(self)
    }

    /// Text shown in the description column: the description, or the item
    /// key when the description is blank.
    pub fn display_description(&self) -> &str {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            &self.item_key
        } else {
            trimmed
        }
    }
}

/// A quote or an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub doc_type: DocumentType,
    pub issuer: Company,
    pub customer: Party,
    /// Rows in display order.
    pub lines: Vec<LineItem>,
    pub number: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Subject of the work (quotes).
    pub subject: Option<String>,
    /// Last day the quote can be accepted.
    pub validity_end_date: Option<NaiveDate>,
}

impl Document {
    /// Sum of line totals excluding tax.
    pub fn subtotal_ex_tax(&self) -> Decimal {
        money::subtotal_ex_tax(self)
    }

    /// Tax computed from each line's tax percentage.
    pub fn total_tax(&self) -> Decimal {
        money::total_tax(self)
    }

    /// Amount due: subtotal plus tax.
    pub fn net_payable(&self) -> Decimal {
        money::net_payable(self)
    }

    /// All document-level figures at once.
    pub fn totals(&self) -> Totals {
        Totals::of(self)
    }

    /// Whether the subject/validity block applies to this document.
    pub fn has_realization(&self) -> bool {
        self.doc_type == DocumentType::Quote
            && (self.subject.as_deref().is_some_and(|s| !s.is_empty())
                || self.validity_end_date.is_some())
    }
}

/// Billable item from the configuration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub key: String,
    pub label: String,
    /// Default unit price excluding tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}
