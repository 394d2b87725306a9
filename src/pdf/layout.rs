//! Page layout: turns a document into per-page drawing instructions.
//!
//! The composer walks a fixed sequence (header, party frames, realization
//! block, table header, rows, totals, notes, footer) with a single vertical
//! cursor. Page breaks are decided by the cursor position, never by row
//! counts: a row needs [`ROW_GUARD`] points above the bottom margin, a notes
//! line needs [`NOTES_GUARD`]. A break closes the current page with its
//! footer, then repeats the page header (and the table header for rows).

use crate::core::{Document, LineItem, Totals};

use super::metrics::Font;
use super::wrap::wrap_notes;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN_LEFT: f32 = 50.0;
pub const MARGIN_RIGHT: f32 = 50.0;
pub const MARGIN_TOP: f32 = 50.0;
pub const MARGIN_BOTTOM: f32 = 40.0;

/// Space required above the bottom margin before emitting a table row.
pub const ROW_GUARD: f32 = 60.0;
/// Space required above the bottom margin before emitting a notes line.
pub const NOTES_GUARD: f32 = 20.0;
/// Maximum characters per wrapped notes line.
pub const NOTES_WRAP_WIDTH: usize = 100;

pub const ROW_HEIGHT: f32 = 14.0;
const INFO_LINE_HEIGHT: f32 = 12.0;
const PARTY_FRAMES_GAP: f32 = 10.0;

const DEFAULT_LOGO_WIDTH: f32 = 60.0;
const DEFAULT_LOGO_MARGIN_RIGHT: f32 = 20.0;

const CURRENCY: &str = "€";

/// Horizontal anchoring of a text instruction relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A single drawing instruction, in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        align: Align,
        text: String,
    },
    /// Horizontal rule from `x1` to `x2`.
    Rule { x1: f32, x2: f32, y: f32 },
    /// The issuer logo, scaled into the given rectangle.
    Logo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number, as printed in the footer.
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Text of every text instruction on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Vertical position of the first text instruction equal to `text`.
    pub fn text_y(&self, needle: &str) -> Option<f32> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, y, .. } if text == needle => Some(*y),
            _ => None,
        })
    }

    pub fn has_logo(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. }))
    }
}

/// A document laid out over one or more pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
}

impl Layout {
    /// Lay out `doc`. `logo` is the pixel size of the issuer logo when one
    /// could be loaded; without it no logo instruction is emitted.
    pub fn compose(doc: &Document, logo: Option<(u32, u32)>) -> Self {
        Composer::new(doc, logo).run()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Which headers to repeat after a page break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Table,
    Notes,
}

struct Composer<'a> {
    doc: &'a Document,
    totals: Totals,
    logo: Option<(u32, u32)>,
    finished: Vec<Page>,
    page: Page,
    y: f32,
}

impl<'a> Composer<'a> {
    fn new(doc: &'a Document, logo: Option<(u32, u32)>) -> Self {
        Self {
            doc,
            totals: Totals::of(doc),
            logo,
            finished: Vec::new(),
            page: Page::new(1),
            y: content_top(),
        }
    }

    fn run(mut self) -> Layout {
        self.draw_header();
        self.draw_party_frames();
        self.draw_realization_block();
        self.draw_table_header();

        let doc = self.doc;
        for line in &doc.lines {
            self.ensure_space(ROW_GUARD, Section::Table);
            self.emit_row(line);
        }

        self.draw_totals();

        if let Some(notes) = doc.notes.as_deref().filter(|n| !n.is_empty()) {
            self.text(MARGIN_LEFT, Font::Bold, 10.0, Align::Left, "Notes:");
            self.y -= INFO_LINE_HEIGHT;
            for line in wrap_notes(notes, NOTES_WRAP_WIDTH) {
                self.ensure_space(NOTES_GUARD, Section::Notes);
                self.text(MARGIN_LEFT, Font::Regular, 10.0, Align::Left, line);
                self.y -= INFO_LINE_HEIGHT;
            }
        }

        self.draw_footer();
        self.finished.push(self.page);
        Layout {
            pages: self.finished,
        }
    }

    fn ensure_space(&mut self, guard: f32, section: Section) {
        if self.y >= MARGIN_BOTTOM + guard {
            return;
        }
        self.draw_footer();
        let next = Page::new(self.page.number + 1);
        let done = std::mem::replace(&mut self.page, next);
        tracing::trace!(page = done.number, ?section, "page break");
        self.finished.push(done);
        self.y = content_top();
        self.draw_header();
        if section == Section::Table {
            self.draw_table_header();
        }
    }

    fn text(&mut self, x: f32, font: Font, size: f32, align: Align, text: impl Into<String>) {
        self.page.ops.push(DrawOp::Text {
            x,
            y: self.y,
            font,
            size,
            align,
            text: text.into(),
        });
    }

    fn rule(&mut self) {
        self.page.ops.push(DrawOp::Rule {
            x1: MARGIN_LEFT,
            x2: right_edge(),
            y: self.y,
        });
    }

    /// Title, date and logo. Repeated on every page.
    fn draw_header(&mut self) {
        let top = self.y;
        let title = match &self.doc.number {
            Some(number) => format!("{} {number}", self.doc.doc_type.title()),
            None => self.doc.doc_type.title().to_string(),
        };
        self.text(MARGIN_LEFT, Font::Bold, 14.0, Align::Left, title);
        self.y -= 20.0;
        let date = format!("Date: {}", self.doc.date.format("%Y-%m-%d"));
        self.text(MARGIN_LEFT, Font::Regular, 10.0, Align::Left, date);
        self.y -= 18.0;

        if let Some(pixels) = self.logo {
            self.page.ops.push(logo_placement(self.doc, pixels, top));
        }
    }

    /// Issuer and customer side by side; the taller column decides where the
    /// next block starts.
    fn draw_party_frames(&mut self) {
        let top = self.y;
        let issuer = &self.doc.issuer;
        let issuer_rows = party_rows(
            &issuer.name,
            issuer.address.as_deref(),
            issuer.email.as_deref(),
            issuer.phone.as_deref(),
            issuer.tax_id.as_deref(),
        );
        let customer = &self.doc.customer;
        let customer_rows = party_rows(
            &customer.name,
            customer.address.as_deref(),
            customer.email.as_deref(),
            customer.phone.as_deref(),
            customer.tax_id.as_deref(),
        );

        let issuer_bottom = self.draw_frame(MARGIN_LEFT, top, "Issuer", issuer_rows);
        let column = (MARGIN_LEFT + right_edge()) / 2.0 + 10.0;
        let customer_bottom = self.draw_frame(column, top, "Customer", customer_rows);

        self.y = issuer_bottom.min(customer_bottom) - PARTY_FRAMES_GAP;
    }

    fn draw_frame(&mut self, x: f32, top: f32, title: &str, rows: Vec<String>) -> f32 {
        self.y = top;
        self.text(x, Font::Bold, 10.0, Align::Left, title);
        self.y -= INFO_LINE_HEIGHT;
        for row in rows {
            self.text(x, Font::Regular, 9.0, Align::Left, row);
            self.y -= INFO_LINE_HEIGHT;
        }
        self.y
    }

    /// Subject and validity of a quote.
    fn draw_realization_block(&mut self) {
        if !self.doc.has_realization() {
            return;
        }
        self.text(MARGIN_LEFT, Font::Bold, 10.0, Align::Left, "Realization");
        self.y -= INFO_LINE_HEIGHT;
        if let Some(subject) = self.doc.subject.as_deref().filter(|s| !s.is_empty()) {
            let row = format!("Subject: {subject}");
            self.text(MARGIN_LEFT, Font::Regular, 9.0, Align::Left, row);
            self.y -= INFO_LINE_HEIGHT;
        }
        if let Some(end) = self.doc.validity_end_date {
            let row = format!("Valid until: {}", end.format("%Y-%m-%d"));
            self.text(MARGIN_LEFT, Font::Regular, 9.0, Align::Left, row);
            self.y -= INFO_LINE_HEIGHT;
        }
        self.y -= 6.0;
        self.rule();
        self.y -= 8.0;
    }

    fn draw_table_header(&mut self) {
        for (x, label) in [
            (MARGIN_LEFT, "Description"),
            (COL_UNIT, "Unit"),
            (350.0, "Qty"),
            (390.0, "Price"),
            (440.0, "Tax %"),
            (490.0, "Disc. %"),
            (540.0, "Total"),
        ] {
            self.text(x, Font::Bold, 10.0, Align::Left, label);
        }
        self.y -= 12.0;
        self.rule();
        self.y -= 8.0;
    }

    fn emit_row(&mut self, line: &LineItem) {
        self.text(
            MARGIN_LEFT,
            Font::Regular,
            10.0,
            Align::Left,
            line.display_description(),
        );
        self.text(COL_UNIT, Font::Regular, 10.0, Align::Left, line.unit.as_str());
        self.text(
            COL_QTY_END,
            Font::Regular,
            10.0,
            Align::Right,
            line.quantity.normalize().to_string(),
        );
        self.text(
            COL_PRICE_END,
            Font::Regular,
            10.0,
            Align::Right,
            format_amount(line.unit_price),
        );
        self.text(
            COL_TAX_END,
            Font::Regular,
            10.0,
            Align::Right,
            format_percent(line.tax_pct),
        );
        self.text(
            COL_DISCOUNT_END,
            Font::Regular,
            10.0,
            Align::Right,
            format_percent(line.discount_pct),
        );
        self.text(
            right_edge(),
            Font::Regular,
            10.0,
            Align::Right,
            format_amount(line.total_ex_tax()),
        );
        self.y -= ROW_HEIGHT;
    }

    fn draw_totals(&mut self) {
        let right = right_edge();
        self.y -= 6.0;
        self.rule();
        self.y -= 18.0;
        let subtotal = format!(
            "TOTAL EX TAX: {} {CURRENCY}",
            format_amount(self.totals.subtotal_ex_tax)
        );
        self.text(right, Font::Bold, 11.0, Align::Right, subtotal);
        self.y -= 14.0;
        let tax = format!(
            "TOTAL TAX: {} {CURRENCY}",
            format_amount(self.totals.total_tax)
        );
        self.text(right, Font::Regular, 10.0, Align::Right, tax);
        self.y -= 14.0;
        let net = format!(
            "NET PAYABLE: {} {CURRENCY}",
            format_amount(self.totals.net_payable)
        );
        self.text(right, Font::Bold, 12.0, Align::Right, net);
        self.y -= 16.0;
    }

    fn draw_footer(&mut self) {
        let label = format!("Page {}", self.page.number);
        self.page.ops.push(DrawOp::Text {
            x: PAGE_WIDTH / 2.0,
            y: MARGIN_BOTTOM - 20.0,
            font: Font::Oblique,
            size: 9.0,
            align: Align::Center,
            text: label,
        });
    }
}

const COL_UNIT: f32 = 300.0;
const COL_QTY_END: f32 = 380.0;
const COL_PRICE_END: f32 = 430.0;
const COL_TAX_END: f32 = 490.0;
const COL_DISCOUNT_END: f32 = 540.0;

fn content_top() -> f32 {
    PAGE_HEIGHT - MARGIN_TOP
}

fn right_edge() -> f32 {
    PAGE_WIDTH - MARGIN_RIGHT
}

/// One row per populated field.
fn party_rows(
    name: &str,
    address: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    tax_id: Option<&str>,
) -> Vec<String> {
    fn populated(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.trim().is_empty())
    }

    let mut rows = Vec::with_capacity(5);
    if !name.trim().is_empty() {
        rows.push(name.to_string());
    }
    if let Some(address) = populated(address) {
        rows.push(
            address
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    if let Some(email) = populated(email) {
        rows.push(format!("Email: {email}"));
    }
    if let Some(phone) = populated(phone) {
        rows.push(format!("Phone: {phone}"));
    }
    if let Some(tax_id) = populated(tax_id) {
        rows.push(format!("Tax ID: {tax_id}"));
    }
    rows
}

/// Logo box anchored `10pt` below the header top and `margin_right` left of
/// the right margin; the image keeps its aspect ratio and is centred in the
/// box.
fn logo_placement(doc: &Document, (px_w, px_h): (u32, u32), top: f32) -> DrawOp {
    let issuer = &doc.issuer;
    let box_w = issuer.logo_max_width.unwrap_or(DEFAULT_LOGO_WIDTH);
    let box_h = issuer.logo_max_height.unwrap_or(box_w);
    let margin = issuer
        .logo_margin_right
        .unwrap_or(DEFAULT_LOGO_MARGIN_RIGHT);
    let box_x = right_edge() - (box_w + margin);
    let box_y = top - 10.0;

    let scale = (box_w / px_w as f32).min(box_h / px_h as f32);
    let width = px_w as f32 * scale;
    let height = px_h as f32 * scale;
    DrawOp::Logo {
        x: box_x + (box_w - width) / 2.0,
        y: box_y + (box_h - height) / 2.0,
        width,
        height,
    }
}

fn format_amount(value: rust_decimal::Decimal) -> String {
    format!("{:.2}", crate::core::round2(value))
}

fn format_percent(value: rust_decimal::Decimal) -> String {
    value
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
