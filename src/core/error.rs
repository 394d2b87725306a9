use thiserror::Error;

/// Errors that can occur while building, exporting or importing documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// A record could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(String),

    /// The configuration file is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// PDF assembly failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
