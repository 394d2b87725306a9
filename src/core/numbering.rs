use super::error::DocumentError;
use super::types::DocumentType;

/// Default zero-padding of document numbers ("D-0001").
pub const DEFAULT_NUMBER_WIDTH: usize = 4;

/// Gapless document number sequence.
///
/// Generates numbers in the format `{prefix}{sequential}`, e.g. "D-0001",
/// "D-0002". The sequence only tracks the next value; persisting it between
/// runs is the caller's job (see `ConfigStore::next_number`).
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    prefix: String,
    next_number: u64,
    zero_pad: usize,
}

impl DocumentNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next_number,
            zero_pad: DEFAULT_NUMBER_WIDTH,
        }
    }

    /// Sequence for a document type, continuing after the last issued value.
    pub fn for_type(doc_type: DocumentType, last_issued: u64) -> Result<Self, DocumentError> {
        let next = last_issued.checked_add(1).ok_or_else(|| {
            DocumentError::Numbering(format!("{} counter is exhausted", doc_type.as_str()))
        })?;
        Ok(Self::starting_at(doc_type.number_prefix(), next))
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next document number.
    pub fn next_number(&mut self) -> String {
        let number = self.peek();
        self.next_number += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        format_number(&self.prefix, self.next_number, self.zero_pad)
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// The last number handed out, 0 if none yet.
    pub fn last_issued(&self) -> u64 {
        self.next_number.saturating_sub(1)
    }
}

/// `prefix` followed by `value` left-padded with zeros to `width` digits.
/// Values wider than `width` are never truncated.
pub fn format_number(prefix: &str, value: u64, width: usize) -> String {
    format!("{prefix}{value:0>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = DocumentNumberSequence::new("D-");
        assert_eq!(seq.next_number(), "D-0001");
        assert_eq!(seq.next_number(), "D-0002");
        assert_eq!(seq.next_number(), "D-0003");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = DocumentNumberSequence::new("D-");
        assert_eq!(seq.peek(), "D-0001");
        assert_eq!(seq.peek(), "D-0001");
        assert_eq!(seq.next_number(), "D-0001");
        assert_eq!(seq.peek(), "D-0002");
        assert_eq!(seq.last_issued(), 1);
    }

    #[test]
    fn starting_at() {
        let mut seq = DocumentNumberSequence::starting_at("F-", 42);
        assert_eq!(seq.next_number(), "F-0042");
        assert_eq!(seq.next_number(), "F-0043");
    }

    #[test]
    fn custom_padding() {
        let mut seq = DocumentNumberSequence::new("F-").with_padding(5);
        assert_eq!(seq.next_number(), "F-00001");
    }

    #[test]
    fn wide_values_are_not_truncated() {
        assert_eq!(format_number("D-", 123_456, 4), "D-123456");
    }

    #[test]
    fn for_type_uses_type_prefix() {
        let mut quotes = DocumentNumberSequence::for_type(DocumentType::Quote, 0).unwrap();
        let mut invoices = DocumentNumberSequence::for_type(DocumentType::Invoice, 9).unwrap();
        assert_eq!(quotes.next_number(), "D-0001");
        assert_eq!(invoices.next_number(), "F-0010");
    }

    #[test]
    fn for_type_rejects_exhausted_counter() {
        assert!(DocumentNumberSequence::for_type(DocumentType::Quote, u64::MAX).is_err());
    }
}
