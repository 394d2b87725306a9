//! JSON records of documents.
//!
//! A record is the durable interchange format between export and a later
//! import: [`write_json`] persists a document with its computed totals, and
//! [`parse_quote_record`] recovers the customer name and lines from such a
//! file to seed a new document (typically an invoice from an accepted quote).
//!
//! # Example
//!
//! ```ignore
//! use devis::record;
//!
//! record::write_json(&quote, "out/quote-D-0001.json")?;
//! let (customer, lines) = record::parse_quote_record("out/quote-D-0001.json")?;
//! ```

mod export;
mod import;

pub use export::{
    CompanyRecord, DocumentRecord, LineRecord, PartyRecord, to_json_string, to_record, write_json,
};
pub use import::{parse_quote_record, parse_quote_str};
