//! Cabrillo rendering.
//!
//! The [`Renderer`] turns a decoded [`Document`] into Cabrillo text using the
//! templates of a [`Config`]:
//!
//! 1. the header template, rendered with `[variables]`, then a blank line;
//! 2. the line template, rendered once per QSO record with the record's
//!    fields plus a derived `DATE_TIME` field (`YYYY-MM-DD HHMM`);
//! 3. the footer, written verbatim.
//!
//! Newlines in the line template are replaced by spaces so that one QSO always
//! yields one output line.
//!
//! ## Examples
//!
//! ```rust
//! use adif2cabrillo::{parse, Config, Renderer, Templates};
//!
//! let config = Config::new(Templates::new(
//!     "CALLSIGN: {{ CALLSIGN }}",
//!     "QSO: {{ MODE }} {{ DATE_TIME }} {{ CALL }}",
//!     "END-OF-LOG:",
//! ))
//! .with_variable("CALLSIGN", "W1AW");
//!
//! let doc = parse("<CALL:5>K1ABC<MODE:2>CW<QSO_DATE:8>20240601<TIME_ON:4>1200<eor>");
//! let text = Renderer::new(&config)?.render_document(&doc)?;
//! assert_eq!(
//!     text,
//!     "CALLSIGN: W1AW\n\nQSO: CW 2024-06-01 1200 K1ABC\nEND-OF-LOG:\n"
//! );
//! # Ok::<(), adif2cabrillo::Error>(())
//! ```

use crate::{filters, Config, Document, Error, Record, Result};
use chrono::NaiveDateTime;
use minijinja::Environment;
use std::io::{self, Write};
use tracing::{debug, warn};

const HEADER: &str = "header";
const LINE: &str = "line";

/// Name of the derived timestamp field available to the line template.
pub const DATE_TIME: &str = "DATE_TIME";

/// Renders documents with the templates of one configuration.
pub struct Renderer<'c> {
    config: &'c Config,
    env: Environment<'static>,
}

impl<'c> Renderer<'c> {
    /// Compiles the header and line templates and registers the filters.
    ///
    /// # Errors
    ///
    /// [`Error::Template`] when a template has a syntax error.
    pub fn new(config: &'c Config) -> Result<Self> {
        let mut env = Environment::new();
        filters::register(&mut env);
        env.add_template_owned(HEADER, config.templates.header.clone())?;
        env.add_template_owned(LINE, config.templates.line.replace('\n', " "))?;
        Ok(Renderer { config, env })
    }

    /// Renders the header template with the configuration variables.
    pub fn render_header(&self) -> Result<String> {
        let template = self.env.get_template(HEADER)?;
        Ok(template.render(&self.config.variables)?)
    }

    /// Renders the Cabrillo line for one QSO record.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] or [`Error::InvalidTimestamp`] when the record
    /// has no usable `QSO_DATE`/`TIME_ON`, [`Error::Template`] when rendering
    /// fails.
    pub fn render_line(&self, record: &Record) -> Result<String> {
        let timestamp = qso_timestamp(record)?;

        let mut context = record.clone();
        context.insert(
            DATE_TIME.to_string(),
            timestamp.format("%Y-%m-%d %H%M").to_string().into(),
        );

        let template = self.env.get_template(LINE)?;
        Ok(template.render(&context)?)
    }

    /// The footer text, which is not a template.
    #[must_use]
    pub fn render_footer(&self) -> &str {
        &self.config.templates.footer
    }

    /// Writes the complete Cabrillo log for `document` to `writer`.
    ///
    /// Nothing after the failing QSO is written when a line cannot be
    /// rendered.
    pub fn write_document<W: Write>(&self, mut writer: W, document: &Document) -> Result<()> {
        let header = self.render_header()?;
        write!(writer, "{}\n\n", header)?;

        for (index, record) in document.records().iter().enumerate() {
            let line = match self.render_line(record) {
                Ok(line) => line,
                Err(e) => {
                    warn!(qso = index + 1, error = %e, "cannot render QSO record");
                    return Err(e);
                }
            };
            writeln!(writer, "{}", line)?;
        }

        writeln!(writer, "{}", self.render_footer())?;
        writer.flush()?;

        debug!(qsos = document.len(), "wrote Cabrillo log");
        Ok(())
    }

    /// Renders the complete Cabrillo log to a string.
    pub fn render_document(&self, document: &Document) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_document(&mut buffer, document)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

/// Combines `QSO_DATE` (`YYYYMMDD`) and `TIME_ON` (`HHMM` or `HHMMSS`).
///
/// # Examples
///
/// ```rust
/// use adif2cabrillo::{cabrillo::qso_timestamp, parse};
///
/// let doc = parse("<QSO_DATE:8>20240601<TIME_ON:6>235930<eor>");
/// let ts = qso_timestamp(&doc.records()[0]).unwrap();
/// assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-06-01 23:59:30");
/// ```
pub fn qso_timestamp(record: &Record) -> Result<NaiveDateTime> {
    let date = record
        .get("QSO_DATE")
        .map(ToString::to_string)
        .ok_or_else(|| Error::missing_field("QSO_DATE"))?;
    let time = record
        .get("TIME_ON")
        .map(ToString::to_string)
        .ok_or_else(|| Error::missing_field("TIME_ON"))?;

    let format = if time.len() == 4 {
        "%Y%m%d %H%M"
    } else {
        "%Y%m%d %H%M%S"
    };
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), format)
        .map_err(|_| Error::invalid_timestamp(&date, &time))
}
