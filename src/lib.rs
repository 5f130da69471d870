//! # adif2cabrillo
//!
//! Convert amateur-radio contact logs from ADIF into Cabrillo contest
//! submissions, driven by TOML-configured templates.
//!
//! ## What does it do?
//!
//! ADIF files are sequences of `<NAME:LENGTH>VALUE` tags, optionally preceded
//! by a header that ends with `<eoh>`, with each contact (QSO) closed by
//! `<eor>`. This crate decodes that text into a [`Document`] of ordered,
//! typed [`Record`]s, then renders the records with user templates into the
//! line-oriented Cabrillo format expected by contest robots.
//!
//! ## Key Features
//!
//! - **Tolerant decoder**: malformed tags are skipped, never reported; the
//!   decoder cannot fail
//! - **Typed values**: numeric fields become [`Number`]s, while dates, times
//!   and bands always stay strings
//! - **Ordered records**: fields keep their input order
//! - **Jinja-style templates**: with `lpad`, `rpad` and `date` filters
//!
//! ## Quick Start
//!
//! ```rust
//! use adif2cabrillo::{parse, AdifValue, Number};
//!
//! let adif = "Generated by a logger <ADIF_VER:5>3.1.4 <EOH>
//!     <CALL:4>W1AW <QSO_DATE:8>20240601 <TIME_ON:4>1200 <BAND:3>20m <FREQ:6>14.250 <EOR>";
//!
//! let doc = parse(adif);
//! assert_eq!(doc.header().get_str("ADIF_VER"), Some("3.1.4"));
//!
//! let qso = &doc.records()[0];
//! assert_eq!(qso.get_str("CALL"), Some("W1AW"));
//! assert_eq!(qso.get_str("QSO_DATE"), Some("20240601"));
//! assert_eq!(qso.get("FREQ"), Some(&AdifValue::Number(Number::Float(14.25))));
//! ```
//!
//! ### Rendering Cabrillo
//!
//! ```rust
//! use adif2cabrillo::{from_str, to_string, Config};
//!
//! let config = Config::from_toml_str(r#"
//! [variables]
//! CALLSIGN = "W1AW"
//!
//! [templates]
//! header = "START-OF-LOG: 3.0\nCALLSIGN: {{ CALLSIGN }}"
//! line = "QSO: {{ FREQ|lpad(6) }} {{ MODE }} {{ DATE_TIME }} {{ CALL|rpad(6) }} {{ RST_RCVD }}"
//! footer = "END-OF-LOG:"
//! "#)?;
//!
//! let doc = from_str("<CALL:5>K1ABC<FREQ:4>7030<MODE:2>CW<RST_RCVD:3>599\
//!                     <QSO_DATE:8>20240601<TIME_ON:6>120000<eor>");
//!
//! let cabrillo = to_string(&config, &doc)?;
//! assert_eq!(cabrillo, "START-OF-LOG: 3.0\nCALLSIGN: W1AW\n\n\
//!                       QSO:   7030 CW 2024-06-01 1200 K1ABC  599\n\
//!                       END-OF-LOG:\n");
//! # Ok::<(), adif2cabrillo::Error>(())
//! ```
//!
//! ## Decoding Rules
//!
//! - Whitespace runs collapse to one space before scanning
//! - The first `<eoh>` splits header from body; later ones are body content
//! - The declared `LENGTH` is not used: a value ends at the next `<`
//! - Empty values are dropped; the last occurrence of a field wins
//! - Records without fields (such as trailing text after the final `<eor>`)
//!   are dropped
//!
//! See [`de`] for the details.

pub mod cabrillo;
pub mod config;
pub mod de;
pub mod document;
pub mod error;
pub mod filters;
pub mod map;
pub mod value;

pub use cabrillo::Renderer;
pub use config::{Config, LoggingConfig, Templates};
pub use de::parse;
pub use document::Document;
pub use error::{Error, Result};
pub use map::Record;
pub use value::{AdifValue, Number};

use std::fs;
use std::io;
use std::path::Path;

/// Decodes a string of ADIF text. Same as [`parse`].
///
/// # Examples
///
/// ```rust
/// let doc = adif2cabrillo::from_str("<CALL:4>W1AW<eor><CALL:5>K1ABC<eor>");
/// assert_eq!(doc.len(), 2);
/// ```
#[must_use]
pub fn from_str(s: &str) -> Document {
    parse(s)
}

/// Decodes ADIF bytes.
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD` rather than rejected.
///
/// # Examples
///
/// ```rust
/// let doc = adif2cabrillo::from_slice(b"<NAME:4>J\xfcrg<eor>");
/// assert_eq!(doc.records()[0].get_str("NAME"), Some("J\u{fffd}rg"));
/// ```
#[must_use]
pub fn from_slice(v: &[u8]) -> Document {
    parse(&String::from_utf8_lossy(v))
}

/// Reads all of `reader` and decodes it.
///
/// # Errors
///
/// Returns [`Error::InputUnavailable`] if reading fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::input_unavailable("<reader>", e))?;
    Ok(from_slice(&bytes))
}

/// Reads and decodes an ADIF file.
///
/// # Errors
///
/// Returns [`Error::InputUnavailable`] naming the path if the file is missing
/// or unreadable.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::input_unavailable(path, e))?;
    Ok(from_slice(&bytes))
}

/// Renders a Cabrillo log to a string.
///
/// # Errors
///
/// Returns an error if a template is invalid or a QSO lacks a usable timestamp.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(config: &Config, document: &Document) -> Result<String> {
    Renderer::new(config)?.render_document(document)
}

/// Renders a Cabrillo log to a writer.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, config: &Config, document: &Document) -> Result<()>
where
    W: io::Write,
{
    Renderer::new(config)?.write_document(writer, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "ADIF export\n<ADIF_VER:5>3.1.4\n<EOH>\n\
        <CALL:5>K1ABC <QSO_DATE:8>20240601 <TIME_ON:4>1200 <MODE:2>CW <EOR>\n\
        <CALL:5>N0CAL <QSO_DATE:8>20240601 <TIME_ON:4>1205 <MODE:3>SSB <EOR>\n";

    fn config() -> Config {
        Config::new(Templates::new(
            "START-OF-LOG: 3.0",
            "QSO: {{ MODE|rpad(3) }} {{ DATE_TIME }} {{ CALL }}",
            "END-OF-LOG:",
        ))
    }

    #[test]
    fn test_from_reader() {
        let doc = from_reader(Cursor::new(LOG.as_bytes())).unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.has_header());
    }

    #[test]
    fn test_from_path_missing() {
        match from_path("/nonexistent/adif2cabrillo/log.adi") {
            Err(Error::InputUnavailable { path, .. }) => assert!(path.ends_with("log.adi")),
            other => panic!("Expected InputUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_to_string() {
        let out = to_string(&config(), &from_str(LOG)).unwrap();
        assert_eq!(
            out,
            "START-OF-LOG: 3.0\n\n\
             QSO: CW  2024-06-01 1200 K1ABC\n\
             QSO: SSB 2024-06-01 1205 N0CAL\n\
             END-OF-LOG:\n"
        );
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &config(), &from_str(LOG)).unwrap();
        assert!(String::from_utf8(buffer).unwrap().ends_with("END-OF-LOG:\n"));
    }
}
