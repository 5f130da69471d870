//! ADIF decoding.
//!
//! This module turns raw ADIF text into a [`Document`]. Decoding is total: it
//! never returns an error, it simply skips whatever does not look like a tag.
//!
//! ## Overview
//!
//! 1. Every run of whitespace (newlines included) collapses to one space and
//!    the text is trimmed, so tag boundaries do not depend on line breaks.
//! 2. The text is split at the first `<eoh>` (any case) into header and body.
//!    Without a marker the header is empty and everything is body.
//! 3. The body is split on every `<eor>` (any case). The header is scanned as
//!    one record, without `<eor>` splitting.
//! 4. Each segment is scanned for `<NAME:LENGTH>VALUE` tags with
//!    [`TagScanner`]. The value runs up to the next `<`; the declared length is
//!    kept on the [`Tag`] but does not bound the value.
//! 5. Values are trimmed and empty ones dropped, names are uppercased, and
//!    values are typed with [`AdifValue::coerce`] except for the fields in
//!    [`STRING_FIELDS`]. The last occurrence of a name wins.
//! 6. Segments that produced no fields are dropped.
//!
//! ## Usage
//!
//! ```rust
//! use adif2cabrillo::{parse, AdifValue, Number};
//!
//! let doc = parse("<CALL:4>W1AW <FREQ:6>14.250 <BAND:2>20 <eor>");
//! let qso = &doc.records()[0];
//! assert_eq!(qso.get("FREQ"), Some(&AdifValue::Number(Number::Float(14.25))));
//! assert_eq!(qso.get_str("BAND"), Some("20"));
//! ```

use crate::{AdifValue, Document, Record};
use tracing::{debug, trace};

/// End-of-header marker, matched case-insensitively.
pub const END_OF_HEADER: &str = "<eoh>";

/// End-of-record marker, matched case-insensitively.
pub const END_OF_RECORD: &str = "<eor>";

/// Fields that are never coerced to numbers.
///
/// Dates and times must stay strings so that `QSO_DATE` and `TIME_ON` can be
/// combined into a timestamp; `BAND` keeps values such as `20` intact.
pub const STRING_FIELDS: [&str; 5] = ["BAND", "QSO_DATE", "TIME_ON", "QSO_DATE_OFF", "TIME_OFF"];

/// One raw `<NAME:LENGTH>VALUE` token, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub length: &'a str,
    pub value: &'a str,
}

impl Tag<'_> {
    /// The length written in the tag, which may disagree with the value.
    #[must_use]
    pub fn declared_length(&self) -> Option<usize> {
        self.length.parse().ok()
    }
}

/// Lazy left-to-right scanner over the tags of one text segment.
///
/// A `<` that does not open a well-formed tag is skipped and scanning resumes
/// at the following `<`.
///
/// # Examples
///
/// ```rust
/// use adif2cabrillo::de::TagScanner;
///
/// let names: Vec<_> = TagScanner::new("<CALL:4>W1AW <bad> <MODE:2>CW")
///     .map(|tag| tag.name)
///     .collect();
/// assert_eq!(names, vec!["CALL", "MODE"]);
/// ```
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> TagScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        TagScanner { input, position: 0 }
    }

    /// Tries to read a tag whose `<` sits at `start`.
    ///
    /// Returns the tag and the offset just past its value.
    fn match_tag(&self, start: usize) -> Option<(Tag<'a>, usize)> {
        let bytes = self.input.as_bytes();
        let end = bytes.len();

        // NAME: anything but ':' and '>', at least one byte
        let name_start = start + 1;
        let mut pos = name_start;
        while pos < end && bytes[pos] != b':' && bytes[pos] != b'>' {
            pos += 1;
        }
        if pos == name_start || pos >= end || bytes[pos] != b':' {
            return None;
        }
        let name = &self.input[name_start..pos];
        pos += 1;

        let length_start = pos;
        while pos < end && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == length_start || pos >= end || bytes[pos] != b'>' {
            return None;
        }
        let length = &self.input[length_start..pos];
        pos += 1;

        let value_end = self.input[pos..].find('<').map_or(end, |i| pos + i);
        let value = &self.input[pos..value_end];

        Some((Tag { name, length, value }, value_end))
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let start = self.position + self.input[self.position..].find('<')?;
            match self.match_tag(start) {
                Some((tag, next)) => {
                    self.position = next;
                    return Some(tag);
                }
                None => self.position = start + 1,
            }
        }
    }
}

/// Iterator over the text between `<eor>` markers.
///
/// Yields every segment, including empty ones; the caller drops segments that
/// hold no fields.
#[derive(Debug, Clone)]
pub struct RecordSegments<'a> {
    rest: Option<&'a str>,
}

impl<'a> RecordSegments<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        RecordSegments { rest: Some(input) }
    }
}

impl<'a> Iterator for RecordSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match find_marker(rest, END_OF_RECORD) {
            Some(i) => {
                self.rest = Some(&rest[i + END_OF_RECORD.len()..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Decodes ADIF text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// let doc = adif2cabrillo::parse("   <eor>   ");
/// assert!(doc.is_empty());
/// assert!(!doc.has_header());
/// ```
#[must_use]
pub fn parse(input: &str) -> Document {
    let text = collapse_whitespace(input);

    let (header_text, body_text) = match find_marker(&text, END_OF_HEADER) {
        Some(i) => (&text[..i], &text[i + END_OF_HEADER.len()..]),
        None => ("", text.as_str()),
    };

    let header = parse_record(header_text);
    let records: Vec<Record> = RecordSegments::new(body_text)
        .map(parse_record)
        .filter(|record| !record.is_empty())
        .collect();

    debug!(
        header_fields = header.len(),
        records = records.len(),
        "decoded ADIF document"
    );
    Document::new(header, records)
}

/// Scans one segment and builds its record. The result may be empty.
#[must_use]
pub fn parse_record(segment: &str) -> Record {
    let mut record = Record::new();
    for tag in TagScanner::new(segment) {
        match normalize_field(tag.name, tag.value) {
            Some((name, value)) => {
                record.insert(name, value);
            }
            None => trace!(name = tag.name, "skipping tag with empty value"),
        }
    }
    record
}

/// Normalizes a raw name/value pair into a typed field.
///
/// Returns `None` when the value is empty after trimming.
///
/// # Examples
///
/// ```rust
/// use adif2cabrillo::{de::normalize_field, AdifValue};
///
/// assert_eq!(
///     normalize_field(" qso_date ", " 20240601 "),
///     Some(("QSO_DATE".to_string(), AdifValue::from("20240601")))
/// );
/// assert_eq!(normalize_field("CALL", "   "), None);
/// ```
#[must_use]
pub fn normalize_field(name: &str, value: &str) -> Option<(String, AdifValue)> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let name = name.trim().to_uppercase();
    let value = if STRING_FIELDS.contains(&name.as_str()) {
        AdifValue::String(value.to_string())
    } else {
        AdifValue::coerce(value)
    };
    Some((name, value))
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the first case-insensitive occurrence of an ASCII marker.
fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    let needle = marker.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
