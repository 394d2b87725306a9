//! # devis
//!
//! Quotes and invoices for a small business: deterministic totals, a JSON
//! record of every document, and a paginated A4 PDF rendering.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are rounded to cents
//! with midpoints away from zero. Nothing here is floating point except page
//! geometry.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use devis::core::*;
//! use rust_decimal_macros::dec;
//!
//! let quote = DocumentBuilder::new(
//!         DocumentType::Quote,
//!         CompanyBuilder::new("Iss").email("i@example.com").build(),
//!         PartyBuilder::new("Cli").build(),
//!     )
//!     .number("D-0001")
//!     .date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
//!     .add_line(LineItemBuilder::new("a", "A", dec!(2), dec!(100)).tax(dec!(20)).build())
//!     .add_line(LineItemBuilder::new("b", "B", dec!(1), dec!(50)).discount(dec!(50)).tax(dec!(5)).build())
//!     .build()
//!     .unwrap();
//!
//! let totals = quote.totals();
//! assert_eq!(totals.subtotal_ex_tax, dec!(225.00));
//! assert_eq!(totals.total_tax, dec!(41.25));
//! assert_eq!(totals.net_payable, dec!(266.25));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Document types, totals, numbering |
//! | `json` | JSON records (export/import) and the configuration store |
//! | `pdf` | Layout and PDF rendering |
//! | `all` | Everything (same as the default set) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "json")]
pub mod record;

#[cfg(feature = "json")]
pub mod config;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(all(feature = "json", feature = "pdf"))]
mod export;

#[cfg(all(feature = "json", feature = "pdf"))]
pub use export::{ExportedFiles, file_stem, generate_document};

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
