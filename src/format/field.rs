use crate::error::{ProcessingError, Result};
use std::fmt;
use std::str::FromStr;

/// Fortran edit descriptor letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Decimal,
    Integer,
    String,
    Logical,
}

impl FormatKind {
    pub fn from_char(c: char, format: &str) -> Result<Self> {
        match c {
            'F' => Ok(FormatKind::Decimal),
            'I' => Ok(FormatKind::Integer),
            'A' => Ok(FormatKind::String),
            'L' => Ok(FormatKind::Logical),
            _ => Err(ProcessingError::UnsupportedFormatKind {
                kind: c,
                format: format.to_string(),
            }),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            FormatKind::Decimal => 'F',
            FormatKind::Integer => 'I',
            FormatKind::String => 'A',
            FormatKind::Logical => 'L',
        }
    }
}

/// A fixed-width field layout such as `F20.5`, `I10`, `A40` or `L10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub kind: FormatKind,
    pub width: usize,
    pub decimals: usize,
}

impl FormatSpec {
    pub const fn decimal(width: usize, decimals: usize) -> Self {
        Self {
            kind: FormatKind::Decimal,
            width,
            decimals,
        }
    }

    pub const fn integer(width: usize) -> Self {
        Self {
            kind: FormatKind::Integer,
            width,
            decimals: 0,
        }
    }

    pub const fn string(width: usize) -> Self {
        Self {
            kind: FormatKind::String,
            width,
            decimals: 0,
        }
    }

    pub const fn logical(width: usize) -> Self {
        Self {
            kind: FormatKind::Logical,
            width,
            decimals: 0,
        }
    }

    /// Parse a descriptor like `F13.5`. Unknown letters are rejected here so
    /// that a bad layout never reaches the formatter.
    pub fn parse(format: &str) -> Result<Self> {
        let mut chars = format.chars();
        let kind_char = chars.next().ok_or_else(|| {
            ProcessingError::InvalidFormatSpec("empty format specification".to_string())
        })?;
        let kind = FormatKind::from_char(kind_char, format)?;
        let rest = chars.as_str();

        let parse_number = |s: &str, what: &str| {
            s.parse::<usize>().map_err(|_| {
                ProcessingError::InvalidFormatSpec(format!(
                    "Invalid {} '{}' in format '{}'",
                    what, s, format
                ))
            })
        };

        let (width, decimals) = match kind {
            FormatKind::Decimal => {
                let (width, decimals) = rest.split_once('.').ok_or_else(|| {
                    ProcessingError::InvalidFormatSpec(format!(
                        "Decimal format '{}' needs <width>.<decimals>",
                        format
                    ))
                })?;
                (parse_number(width, "width")?, parse_number(decimals, "precision")?)
            }
            _ => (parse_number(rest, "width")?, 0),
        };

        if width == 0 {
            return Err(ProcessingError::InvalidFormatSpec(format!(
                "Width must be positive in format '{}'",
                format
            )));
        }

        Ok(Self {
            kind,
            width,
            decimals,
        })
    }
}

impl FromStr for FormatSpec {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormatKind::Decimal => write!(f, "F{}.{}", self.width, self.decimals),
            kind => write!(f, "{}{}", kind.as_char(), self.width),
        }
    }
}

/// A scalar on its way into a fixed-width field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Logical(bool),
}

impl FieldValue {
    /// Absent, or the empty string
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Logical(b) => *b,
            FieldValue::Integer(i) => *i == 1,
            FieldValue::Decimal(d) => *d == 1.0,
            FieldValue::Text(s) => matches!(s.as_str(), "T" | "t" | "True" | "true" | "1"),
            FieldValue::Absent => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Logical(b) => f.write_str(if *b { "T" } else { "F" }),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Logical(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

/// Render `value` into exactly `spec.width` characters.
///
/// Numbers that overflow their column keep their leftmost characters. This
/// matches what little_r readers expect from a fixed-column file; the column
/// never grows.
pub fn format_value(value: &FieldValue, spec: &FormatSpec) -> Result<String> {
    let width = spec.width;

    match spec.kind {
        FormatKind::Decimal => {
            if value.is_missing() {
                return Ok(blank(width));
            }
            let number = as_decimal(value, spec)?;
            let rendered = format!("{:>width$.prec$}", number, width = width, prec = spec.decimals);
            Ok(truncate(rendered, width))
        }
        FormatKind::Integer => {
            if value.is_missing() {
                return Ok(blank(width));
            }
            let number = as_integer(value, spec)?;
            let rendered = format!("{:>width$}", number, width = width);
            Ok(truncate(rendered, width))
        }
        FormatKind::String => {
            if matches!(value, FieldValue::Absent) {
                return Ok(blank(width));
            }
            let text: String = value.to_string().chars().take(width).collect();
            Ok(format!("{:<width$}", text, width = width))
        }
        FormatKind::Logical => {
            let flag = if value.is_truthy() { 'T' } else { 'F' };
            Ok(format!("{:>width$}", flag, width = width))
        }
    }
}

fn blank(width: usize) -> String {
    " ".repeat(width)
}

fn truncate(mut rendered: String, width: usize) -> String {
    // Numeric renderings are ASCII, so byte and char offsets agree
    rendered.truncate(width);
    rendered
}

fn incompatible(value: &FieldValue, spec: &FormatSpec) -> ProcessingError {
    ProcessingError::IncompatibleValue {
        value: format!("{:?}", value),
        format: spec.to_string(),
    }
}

fn as_decimal(value: &FieldValue, spec: &FormatSpec) -> Result<f64> {
    match value {
        FieldValue::Decimal(d) => Ok(*d),
        FieldValue::Integer(i) => Ok(*i as f64),
        FieldValue::Text(s) => s.trim().parse::<f64>().map_err(|_| incompatible(value, spec)),
        _ => Err(incompatible(value, spec)),
    }
}

fn as_integer(value: &FieldValue, spec: &FormatSpec) -> Result<i64> {
    match value {
        FieldValue::Integer(i) => Ok(*i),
        FieldValue::Decimal(d) if d.fract() == 0.0 && d.is_finite() => Ok(*d as i64),
        FieldValue::Text(s) => s.trim().parse::<i64>().map_err(|_| incompatible(value, spec)),
        _ => Err(incompatible(value, spec)),
    }
}
