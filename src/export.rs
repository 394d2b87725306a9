use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Document, DocumentError};
use crate::{pdf, record};

/// Paths written by [`generate_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub json: PathBuf,
    pub pdf: PathBuf,
}

/// File stem of a document's exports: `<type>-<number>`, or
/// `<type>-draft` when the document has no number yet.
///
/// Path separators in the number become `_`, so the stem is always a single
/// path component.
pub fn file_stem(doc: &Document) -> String {
    let number = doc.number.as_deref().unwrap_or("draft");
    format!("{}-{}", doc.doc_type.as_str(), number.replace(['/', '\\'], "_"))
}

/// Write the JSON record and the PDF of `doc` side by side in `out_dir`.
pub fn generate_document(
    doc: &Document,
    out_dir: impl AsRef<Path>,
) -> Result<ExportedFiles, DocumentError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;
    let stem = file_stem(doc);
    let files = ExportedFiles {
        json: out_dir.join(format!("{stem}.json")),
        pdf: out_dir.join(format!("{stem}.pdf")),
    };
    record::write_json(doc, &files.json)?;
    pdf::export_pdf(doc, &files.pdf)?;
    Ok(files)
}
