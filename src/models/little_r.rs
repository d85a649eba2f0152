use crate::utils::constants::{END_RECORD, TAIL_RECORD};

/// The four records of one little_r station report.
///
/// Built per observation (or per time window), serialised, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LittleRRecord {
    pub header: String,
    pub data: String,
    pub end_record: String,
    pub tail_record: String,
}

impl LittleRRecord {
    pub fn new(header: String, data: String) -> Self {
        Self {
            header,
            data,
            end_record: END_RECORD.to_string(),
            tail_record: TAIL_RECORD.to_string(),
        }
    }

    pub fn lines(&self) -> [&str; 4] {
        [
            self.header.as_str(),
            self.data.as_str(),
            self.end_record.as_str(),
            self.tail_record.as_str(),
        ]
    }

    /// Records joined by newlines, without a trailing newline
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}
