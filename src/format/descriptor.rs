use crate::error::Result;
use crate::format::field::{format_value, FieldValue, FormatSpec};

/// What a field holds when its input value is absent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingPolicy {
    /// Leave the column blank
    Blank,
    /// Write a reserved value such as -888888.0
    Sentinel(f64),
}

/// One column of a little_r record
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub spec: FormatSpec,
    pub missing: MissingPolicy,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, spec: FormatSpec, missing: MissingPolicy) -> Self {
        Self {
            name,
            spec,
            missing,
        }
    }

    pub const fn blank(name: &'static str, spec: FormatSpec) -> Self {
        Self::new(name, spec, MissingPolicy::Blank)
    }

    pub const fn sentinel(name: &'static str, spec: FormatSpec, sentinel: f64) -> Self {
        Self::new(name, spec, MissingPolicy::Sentinel(sentinel))
    }

    pub fn render(&self, value: &FieldValue) -> Result<String> {
        match self.missing {
            MissingPolicy::Sentinel(sentinel) if value.is_missing() => {
                format_value(&FieldValue::Decimal(sentinel), &self.spec)
            }
            _ => format_value(value, &self.spec),
        }
    }
}

/// Render a run of fields into one line
pub fn render_fields(fields: &[(FieldDescriptor, FieldValue)]) -> Result<String> {
    let capacity = fields.iter().map(|(d, _)| d.spec.width).sum();
    let mut line = String::with_capacity(capacity);
    for (descriptor, value) in fields {
        line.push_str(&descriptor.render(value)?);
    }
    Ok(line)
}
