//! Paginated A4 PDF rendering.
//!
//! Rendering happens in two steps. [`Layout::compose`] decides what goes on
//! which page and where, producing plain [`DrawOp`] instructions; the writer
//! then turns those into PDF content streams with lopdf. Keeping the two
//! apart makes page breaks inspectable without parsing a PDF:
//!
//! ```
//! use devis::core::*;
//! use devis::pdf;
//! use rust_decimal_macros::dec;
//!
//! let lines = (0..60).map(|i| {
//!     LineItemBuilder::new(format!("k{i}"), format!("Line {i}"), dec!(1), dec!(1)).build()
//! });
//! let doc = DocumentBuilder::new(
//!         DocumentType::Invoice,
//!         CompanyBuilder::new("My Co").build(),
//!         PartyBuilder::new("Foo Inc").build(),
//!     )
//!     .lines(lines)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pdf::paginate(&doc).page_count(), 2);
//! ```

mod layout;
mod logo;
mod metrics;
mod render;
mod wrap;

pub use layout::{
    Align, DrawOp, Layout, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, NOTES_GUARD,
    NOTES_WRAP_WIDTH, PAGE_HEIGHT, PAGE_WIDTH, Page, ROW_GUARD, ROW_HEIGHT,
};
pub use logo::{LogoImage, issuer_logo, load_logo};
pub use metrics::{Font, encode_win_ansi, text_width};
pub use render::{export_pdf, paginate, render_pdf};
pub use wrap::wrap_notes;
