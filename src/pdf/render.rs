use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{
    Dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat, dictionary,
};

use super::layout::{Align, DrawOp, Layout, PAGE_HEIGHT, PAGE_WIDTH, Page};
use super::logo::{LogoImage, issuer_logo};
use super::metrics::{Font, encode_win_ansi, text_width};
use crate::core::{Document, DocumentError};

const LOGO_RESOURCE: &str = "Im1";
const RULE_WIDTH: f32 = 0.5;

/// Lay out `doc` over A4 pages, with the issuer logo if it can be loaded.
pub fn paginate(doc: &Document) -> Layout {
    let logo = issuer_logo(&doc.issuer);
    Layout::compose(doc, logo.as_ref().map(LogoImage::dimensions))
}

/// Render `doc` to PDF bytes.
pub fn render_pdf(doc: &Document) -> Result<Vec<u8>, DocumentError> {
    let logo = issuer_logo(&doc.issuer);
    let layout = Layout::compose(doc, logo.as_ref().map(LogoImage::dimensions));
    write_layout(&layout, logo.as_ref(), &document_title(doc))
}

/// Render `doc` and write it to `path`, creating parent directories.
pub fn export_pdf(doc: &Document, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let bytes = render_pdf(doc)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        doc_type = doc.doc_type.as_str(),
        bytes = bytes.len(),
        "wrote document PDF"
    );
    Ok(())
}

fn document_title(doc: &Document) -> String {
    match &doc.number {
        Some(number) => format!("{} {number}", doc.doc_type.title()),
        None => doc.doc_type.title().to_string(),
    }
}

/// Serialize a layout into a PDF document.
fn write_layout(
    layout: &Layout,
    logo: Option<&LogoImage>,
    title: &str,
) -> Result<Vec<u8>, DocumentError> {
    let mut pdf = PdfDocument::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut resources = dictionary! {
        "Font" => fonts,
    };
    if let Some(logo) = logo {
        let image_id = add_logo_xobject(&mut pdf, logo);
        resources.set(
            "XObject",
            dictionary! { LOGO_RESOURCE => Object::Reference(image_id) },
        );
    }
    let resources_id = pdf.add_object(resources);

    let mut kids = Vec::with_capacity(layout.page_count());
    for page in &layout.pages {
        let content = page_content(page)
            .encode()
            .map_err(|e| DocumentError::Pdf(format!("failed to encode page {}: {e}", page.number)))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::String(utf16_text(title), StringFormat::Hexadecimal),
        "Producer" => Object::string_literal("devis"),
    });
    pdf.trailer.set("Root", Object::Reference(catalog_id));
    pdf.trailer.set("Info", Object::Reference(info_id));

    pdf.compress();
    let mut output = Vec::new();
    pdf.save_to(&mut output)
        .map_err(|e| DocumentError::Pdf(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn add_logo_xobject(pdf: &mut PdfDocument, logo: &LogoImage) -> ObjectId {
    let mut image = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(logo.width),
        "Height" => i64::from(logo.height),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(alpha) = &logo.alpha {
        let mask_id = pdf.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(logo.width),
                "Height" => i64::from(logo.height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        ));
        image.set("SMask", Object::Reference(mask_id));
    }
    pdf.add_object(Stream::new(image, logo.rgb.clone()))
}

fn page_content(page: &Page) -> Content {
    let mut operations = vec![Operation::new("w", vec![RULE_WIDTH.into()])];
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                align,
                text,
            } => {
                let x = match align {
                    Align::Left => *x,
                    Align::Right => x - text_width(text, *font, *size),
                    Align::Center => x - text_width(text, *font, *size) / 2.0,
                };
                operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![font.resource_name().into(), (*size).into()]),
                    Operation::new("Td", vec![x.into(), (*y).into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ]);
            }
            DrawOp::Rule { x1, x2, y } => operations.extend([
                Operation::new("m", vec![(*x1).into(), (*y).into()]),
                Operation::new("l", vec![(*x2).into(), (*y).into()]),
                Operation::new("S", vec![]),
            ]),
            DrawOp::Logo {
                x,
                y,
                width,
                height,
            } => operations.extend([
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        (*width).into(),
                        0.into(),
                        0.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                ),
                Operation::new("Do", vec![LOGO_RESOURCE.into()]),
                Operation::new("Q", vec![]),
            ]),
        }
    }
    Content { operations }
}

/// PDF text string in UTF-16BE with byte order mark.
fn utf16_text(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend(unit.to_be_bytes());
    }
    bytes
}
