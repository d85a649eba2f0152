use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination for rendered little_r reports
pub trait ReportSink {
    /// Store `text` verbatim under the relative `path`
    fn persist(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// Writes each report to its own file below a root directory
pub struct FileSink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ReportSink for FileSink {
    fn persist(&mut self, path: &Path, text: &str) -> Result<()> {
        let full_path = self.root.join(path);

        // Create output directory if it doesn't exist
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, text)?;
        debug!("Wrote {} ({} bytes)", full_path.display(), text.len());
        self.written.push(full_path);
        Ok(())
    }
}

/// Keeps reports in memory, keyed by path
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.reports.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.reports.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportSink for MemorySink {
    fn persist(&mut self, path: &Path, text: &str) -> Result<()> {
        self.reports.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}
