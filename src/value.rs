//! Typed field values for ADIF records.
//!
//! Every ADIF field value ends up either as a [`Number`] or as a string. The
//! decoder decides which one by trying a locale-independent decimal parse,
//! except for the date, time and band fields which always stay strings.
//!
//! ## Examples
//!
//! ```rust
//! use adif2cabrillo::{AdifValue, Number};
//!
//! let freq = AdifValue::coerce("14.250");
//! assert_eq!(freq, AdifValue::Number(Number::Float(14.25)));
//!
//! let call = AdifValue::coerce("W1AW");
//! assert_eq!(call.as_str(), Some("W1AW"));
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// A field value as produced by the decoder.
///
/// # Examples
///
/// ```rust
/// use adif2cabrillo::AdifValue;
///
/// let rst = AdifValue::coerce("599");
/// assert!(rst.is_number());
/// assert_eq!(rst.as_i64(), Some(599));
///
/// let band = AdifValue::from("20");
/// assert!(band.is_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AdifValue {
    Number(Number),
    String(String),
}

/// A numeric field value.
///
/// Whole numbers that fit an `i64` are kept as integers so that values like
/// `RST_SENT = 599` render without a fractional part.
///
/// # Examples
///
/// ```rust
/// use adif2cabrillo::Number;
///
/// assert_eq!(Number::parse("7"), Some(Number::Integer(7)));
/// assert_eq!(Number::parse("7.030"), Some(Number::Float(7.03)));
/// assert_eq!(Number::parse("NaN"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Parses a trimmed decimal string.
    ///
    /// Accepts an optional sign, digits, a `.` decimal point and an exponent.
    /// Non-finite results such as `inf`, `nan` or an overflowing `1e400` are
    /// rejected, so those values stay strings.
    #[must_use]
    pub fn parse(text: &str) -> Option<Number> {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Integer(i));
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::Float(f)),
            _ => None,
        }
    }

    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Converts this number to an `i64` when it has no fractional part.
    ///
    /// ```rust
    /// use adif2cabrillo::Number;
    ///
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl AdifValue {
    /// Types a trimmed value: a number when it parses as one, a string otherwise.
    #[must_use]
    pub fn coerce(text: &str) -> AdifValue {
        match Number::parse(text) {
            Some(n) => AdifValue::Number(n),
            None => AdifValue::String(text.to_string()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, AdifValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, AdifValue::String(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AdifValue::String(s) => Some(s),
            AdifValue::Number(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            AdifValue::Number(n) => Some(*n),
            AdifValue::String(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }
}

impl fmt::Display for AdifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdifValue::Number(n) => write!(f, "{}", n),
            AdifValue::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for AdifValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AdifValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            AdifValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            AdifValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl TryFrom<AdifValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: AdifValue) -> crate::Result<Self> {
        match value {
            AdifValue::Number(n) => Ok(n.as_f64()),
            AdifValue::String(s) => Err(crate::Error::Template(format!(
                "expected number, found {:?}",
                s
            ))),
        }
    }
}

impl From<AdifValue> for String {
    fn from(value: AdifValue) -> Self {
        match value {
            AdifValue::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl From<String> for AdifValue {
    fn from(value: String) -> Self {
        AdifValue::String(value)
    }
}

impl From<&str> for AdifValue {
    fn from(value: &str) -> Self {
        AdifValue::String(value.to_string())
    }
}

impl From<i64> for AdifValue {
    fn from(value: i64) -> Self {
        AdifValue::Number(Number::Integer(value))
    }
}

impl From<f64> for AdifValue {
    fn from(value: f64) -> Self {
        AdifValue::Number(Number::Float(value))
    }
}
