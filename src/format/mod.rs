pub mod descriptor;
pub mod field;

pub use descriptor::{render_fields, FieldDescriptor, MissingPolicy};
pub use field::{format_value, FieldValue, FormatKind, FormatSpec};
