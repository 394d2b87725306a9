use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::error::DocumentError;
use super::money::Totals;
use super::types::*;

/// Builder for quotes and invoices.
///
/// ```
/// use devis::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let quote = DocumentBuilder::new(
///         DocumentType::Quote,
///         CompanyBuilder::new("ACME SARL").email("hello@acme.example").build(),
///         PartyBuilder::new("Client SA").build(),
///     )
///     .number("D-0001")
///     .date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
///     .add_line(LineItemBuilder::new("svc", "Consulting", dec!(2), dec!(100)).tax(dec!(20)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(quote.net_payable(), dec!(240.00));
/// ```
pub struct DocumentBuilder {
    doc_type: DocumentType,
    issuer: Company,
    customer: Party,
    lines: Vec<LineItem>,
    number: Option<String>,
    date: Option<NaiveDate>,
    notes: Option<String>,
    subject: Option<String>,
    validity_end_date: Option<NaiveDate>,
}

impl DocumentBuilder {
    pub fn new(doc_type: DocumentType, issuer: Company, customer: Party) -> Self {
        Self {
            doc_type,
            issuer,
            customer,
            lines: Vec::new(),
            number: None,
            date: None,
            notes: None,
            subject: None,
            validity_end_date: None,
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Issue date. Defaults to today's local date.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn validity_end_date(mut self, date: NaiveDate) -> Self {
        self.validity_end_date = Some(date);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Append several lines, keeping their order.
    pub fn lines(mut self, lines: impl IntoIterator<Item = LineItem>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn build(self) -> Result<Document, DocumentError> {
        if self.issuer.name.trim().is_empty() {
            return Err(DocumentError::Builder("issuer name is required".into()));
        }

        // Input limits
        if self.lines.len() > 10_000 {
            return Err(DocumentError::Builder(
                "document cannot have more than 10,000 line items".into(),
            ));
        }
        if self.number.as_ref().is_some_and(|n| n.len() > 200) {
            return Err(DocumentError::Builder(
                "document number cannot exceed 200 characters".into(),
            ));
        }

        let doc = Document {
            doc_type: self.doc_type,
            issuer: self.issuer,
            customer: self.customer,
            lines: self.lines,
            number: self.number,
            date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            notes: self.notes,
            subject: self.subject,
            validity_end_date: self.validity_end_date,
        };
        if Totals::checked(&doc).is_none() {
            return Err(DocumentError::Builder(
                "line amounts exceed the representable range".into(),
            ));
        }
        Ok(doc)
    }
}

/// Builder for the issuing company.
pub struct CompanyBuilder {
    company: Company,
}

impl CompanyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            company: Company {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.company.address = Some(address.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.company.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.company.phone = Some(phone.into());
        self
    }

    pub fn tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.company.tax_id = Some(tax_id.into());
        self
    }

    pub fn logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.company.logo_path = Some(path.into());
        self
    }

    /// Logo box: maximum width and height, and the gap to the right margin.
    pub fn logo_box(mut self, max_width: f32, max_height: f32, margin_right: f32) -> Self {
        self.company.logo_max_width = Some(max_width);
        self.company.logo_max_height = Some(max_height);
        self.company.logo_margin_right = Some(margin_right);
        self
    }

    pub fn build(self) -> Company {
        self.company
    }
}

/// Builder for a customer party.
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.party.address = Some(address.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.party.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.party.phone = Some(phone.into());
        self
    }

    pub fn tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.party.tax_id = Some(tax_id.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    item_key: String,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    discount_pct: Decimal,
    unit: String,
    tax_pct: Decimal,
}

impl LineItemBuilder {
    pub fn new(
        item_key: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            item_key: item_key.into(),
            description: description.into(),
            quantity,
            unit_price,
            discount_pct: Decimal::ZERO,
            unit: String::new(),
            tax_pct: Decimal::ZERO,
        }
    }

    /// Seed a line from a catalog item: key, label and default price.
    pub fn from_catalog(item: &CatalogItem, quantity: Decimal) -> Self {
        Self::new(&item.key, &item.label, quantity, item.unit_price)
    }

    pub fn discount(mut self, pct: Decimal) -> Self {
        self.discount_pct = pct;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn tax(mut self, pct: Decimal) -> Self {
        self.tax_pct = pct;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            item_key: self.item_key,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_pct: self.discount_pct,
            unit: self.unit,
            tax_pct: self.tax_pct,
        }
    }
}
