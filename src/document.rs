//! A decoded ADIF file: header fields plus the QSO records.

use crate::Record;
use serde::Serialize;

/// The result of decoding one ADIF text.
///
/// The header is empty when the input had no `<eoh>` marker. Records keep the
/// order in which they appeared.
///
/// # Examples
///
/// ```rust
/// let doc = adif2cabrillo::parse("<PROGRAMID:4>test<eoh><CALL:4>W1AW<eor>");
/// assert_eq!(doc.header().get_str("PROGRAMID"), Some("test"));
/// assert_eq!(doc.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    header: Record,
    records: Vec<Record>,
}

impl Document {
    pub(crate) fn new(header: Record, records: Vec<Record>) -> Self {
        Document { header, records }
    }

    #[must_use]
    pub fn header(&self) -> &Record {
        &self.header
    }

    /// Returns the QSO records in input order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    /// Number of QSO records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no QSO records were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the document when it holds at least one QSO record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResult`](crate::Error::EmptyResult) otherwise.
    pub fn require_records(self) -> crate::Result<Self> {
        if self.records.is_empty() {
            Err(crate::Error::EmptyResult)
        } else {
            Ok(self)
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
