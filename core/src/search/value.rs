//! Typed operands and their wire representation.
//!
//! `Value` is opaque. The `From` impls cannot produce a bad literal and
//! `keyword`/`float` check their input, so a value always renders to a
//! single well-formed token.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::FilterError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// An operand on the right-hand side of a criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct Value(Literal);

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    /// Free text, rendered double-quoted.
    String(String),
    /// Provider constant, rendered bare. Only `[A-Za-z0-9_.-]+`.
    Keyword(String),
    Integer(i64),
    /// Always finite.
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// A provider constant such as a message status, rendered unquoted.
    ///
    /// Only ASCII letters, digits, `_`, `.` and `-` are accepted; anything
    /// else could end the criterion early.
    pub fn keyword(keyword: impl Into<String>) -> Result<Self, FilterError> {
        let keyword = keyword.into();
        let valid = !keyword.is_empty()
            && keyword
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !valid {
            return Err(FilterError::InvalidArgument(format!(
                "{keyword:?} is not a valid keyword"
            )));
        }
        Ok(Self(Literal::Keyword(keyword)))
    }

    /// Keyword known to be valid, e.g. the wire name of a crate enum.
    pub(crate) fn trusted_keyword(keyword: &str) -> Self {
        debug_assert!(Self::keyword(keyword).is_ok(), "{keyword}");
        Self(Literal::Keyword(keyword.to_string()))
    }

    /// Build a float operand. NaN and infinities have no literal in the query
    /// grammar and are rejected.
    pub fn float(value: f64) -> Result<Self, FilterError> {
        if !value.is_finite() {
            return Err(FilterError::InvalidArgument(format!(
                "{value} cannot be used as a filter value"
            )));
        }
        Ok(Self(Literal::Float(value)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Literal::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Literal::Keyword(k) => f.write_str(k),
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Timestamp(ts) => write!(f, "TIMESTAMP \"{}\"", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self(Literal::String(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(Literal::String(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self(Literal::Integer(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self(Literal::Integer(i64::from(value)))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self(Literal::Integer(i64::from(value)))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self(Literal::Boolean(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self(Literal::Timestamp(value))
    }
}
