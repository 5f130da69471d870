//! Conversion configuration loaded from TOML.
//!
//! The configuration is a plain value built once and borrowed by the
//! [`Renderer`](crate::Renderer). It has three sections:
//!
//! ```toml
//! [variables]
//! CALLSIGN = "W1AW"
//! CONTEST = "ARRL-FD"
//!
//! [templates]
//! header = """
//! START-OF-LOG: 3.0
//! CALLSIGN: {{ CALLSIGN }}
//! CONTEST: {{ CONTEST }}"""
//! line = "QSO: {{ FREQ|lpad(5) }} {{ MODE }} {{ DATE_TIME }} {{ CALL }}"
//! footer = "END-OF-LOG:"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! `variables` and `logging` are optional. `templates` must define `header`,
//! `line` and `footer`; other template keys are ignored.
//!
//! ## Examples
//!
//! ```rust
//! use adif2cabrillo::{Config, Templates};
//!
//! let config = Config::new(Templates::new("START-OF-LOG: 3.0", "QSO: {{ CALL }}", "END-OF-LOG:"))
//!     .with_variable("CALLSIGN", "W1AW")
//!     .with_log_level("debug");
//! assert_eq!(config.logging.level, "debug");
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Names of the templates every configuration must define.
pub const REQUIRED_TEMPLATES: [&str; 3] = ["header", "footer", "line"];

/// The three Cabrillo templates.
#[derive(Clone, Debug, PartialEq)]
pub struct Templates {
    /// Rendered once with the configuration variables.
    pub header: String,
    /// Rendered once per QSO record. Newlines are replaced by spaces first.
    pub line: String,
    /// Written verbatim after the QSO lines.
    pub footer: String,
}

impl Templates {
    pub fn new(header: &str, line: &str, footer: &str) -> Self {
        Templates {
            header: header.to_string(),
            line: line.to_string(),
            footer: footer.to_string(),
        }
    }

    /// Builds the templates from a raw `[templates]` table, reporting every
    /// missing required key at once.
    fn from_table(mut table: BTreeMap<String, String>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_TEMPLATES
            .iter()
            .filter(|name| !table.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingTemplates(missing));
        }

        let mut take = |name: &str| table.remove(name).unwrap_or_default();
        Ok(Templates {
            header: take("header"),
            line: take("line"),
            footer: take("footer"),
        })
    }
}

/// Logging section of the configuration file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `adif2cabrillo=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    variables: toml::Table,
    #[serde(default)]
    templates: BTreeMap<String, String>,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Template configuration for one conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Context for the header template.
    pub variables: toml::Table,
    pub templates: Templates,
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a configuration with no variables and default logging.
    #[must_use]
    pub fn new(templates: Templates) -> Self {
        Config {
            variables: toml::Table::new(),
            templates,
            logging: LoggingConfig::default(),
        }
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::InputUnavailable`] when the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::input_unavailable(path, e))?;
        let config = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            variables = config.variables.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for invalid TOML or non-string templates,
    /// [`Error::MissingTemplates`] when `header`, `line` or `footer` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif2cabrillo::{Config, Error};
    ///
    /// let err = Config::from_toml_str("[templates]\nheader = \"H\"").unwrap_err();
    /// assert!(matches!(err, Error::MissingTemplates(ref names) if names.len() == 2));
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        Ok(Config {
            variables: raw.variables,
            templates: Templates::from_table(raw.templates)?,
            logging: raw.logging,
        })
    }

    /// Adds or replaces a header variable.
    #[must_use]
    pub fn with_variable<V: Into<toml::Value>>(mut self, name: &str, value: V) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.logging.level = level.to_string();
        self
    }
}
