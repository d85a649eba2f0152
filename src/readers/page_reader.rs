use crate::error::{ProcessingError, Result};
use crate::models::{Observation, ObservationPage};
use crate::utils::constants::PAGE_EXTENSION;
use crate::utils::time::TimeRange;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Reads saved super observation pages from disk
pub struct PageReader {
    max_workers: usize,
    time_range: Option<TimeRange>,
}

impl PageReader {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            time_range: None,
        }
    }

    /// Only keep observations inside `time_range`, as the API's min/max time would
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = Some(time_range);
        self
    }

    /// Page files at `input`: the file itself, or every page file in a directory
    pub fn find_page_files(input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        if !input.is_dir() {
            return Err(ProcessingError::MissingData(format!(
                "Input path does not exist: {}",
                input.display()
            )));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == PAGE_EXTENSION) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Parse a single page
    pub async fn read_page(path: &Path) -> Result<ObservationPage> {
        let contents = tokio::fs::read_to_string(path).await?;
        let page: ObservationPage = serde_json::from_str(&contents)?;
        Ok(page)
    }

    async fn acquire(permits: Arc<Semaphore>) -> Result<OwnedSemaphorePermit> {
        permits
            .acquire_owned()
            .await
            .map_err(|e| ProcessingError::ReaderShutdown(e.to_string()))
    }

    /// Read every page under `input` concurrently, returning observations in
    /// page order
    pub async fn read_observations(&self, input: &Path) -> Result<Vec<Observation>> {
        let files = Self::find_page_files(input)?;
        debug!("Found {} page file(s) under {}", files.len(), input.display());

        let permits = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();

        for (index, path) in files.into_iter().enumerate() {
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = Self::acquire(permits).await?;
                let page = Self::read_page(&path).await?;
                Ok::<_, ProcessingError>((index, path, page))
            });
        }

        let mut pages = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            pages.push(joined??);
        }
        pages.sort_by_key(|(index, _, _)| *index);

        let mut observations = Vec::new();
        for (_, path, page) in pages {
            if page.observations.is_empty() {
                warn!(
                    "Could not find any observations in page {}",
                    path.display()
                );
            }
            info!(
                "Fetched page with {} observation(s) from {}",
                page.observations.len(),
                path.display()
            );
            if page.has_next_page {
                debug!("Page {} references a further page", path.display());
            }

            observations.extend(
                page.observations
                    .into_iter()
                    .filter(|o| self.time_range.map_or(true, |r| r.contains(o.timestamp))),
            );
        }

        Ok(observations)
    }
}

impl Default for PageReader {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
