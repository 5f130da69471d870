//! Template filters available to Cabrillo templates.
//!
//! | Filter | Example | Result |
//! |--------|---------|--------|
//! | `lpad(width, fill=" ")` | `{{ 599|lpad(5, "0") }}` | `00599` |
//! | `rpad(width, fill=" ")` | `{{ "CW"|rpad(4) }}` | `CW  ` |
//! | `date` | `{{ "20240601"|date }}` | `2024-06-01` |

use chrono::NaiveDate;
use minijinja::{Environment, Error, ErrorKind, Value};

/// Installs every filter into the environment.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("lpad", lpad);
    env.add_filter("rpad", rpad);
    env.add_filter("date", date);
}

/// Right-justifies the value in a field of `width` characters.
pub fn lpad(value: Value, width: usize, fillchar: Option<String>) -> Result<String, Error> {
    let (text, padding) = padding_for(&value, width, fillchar.as_deref())?;
    Ok(padding + &text)
}

/// Left-justifies the value in a field of `width` characters.
pub fn rpad(value: Value, width: usize, fillchar: Option<String>) -> Result<String, Error> {
    let (text, padding) = padding_for(&value, width, fillchar.as_deref())?;
    Ok(text + &padding)
}

/// Reformats a `YYYYMMDD` date as `YYYY-MM-DD`.
pub fn date(value: String) -> Result<String, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y%m%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("cannot read {:?} as a YYYYMMDD date: {}", value, e),
            )
        })
}

fn padding_for(
    value: &Value,
    width: usize,
    fillchar: Option<&str>,
) -> Result<(String, String), Error> {
    let fill = match fillchar {
        None => ' ',
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::new(
                        ErrorKind::InvalidOperation,
                        "the fill character must be exactly one character long",
                    ))
                }
            }
        }
    };

    let text = value.to_string();
    let missing = width.saturating_sub(text.chars().count());
    Ok((text, std::iter::repeat(fill).take(missing).collect()))
}
