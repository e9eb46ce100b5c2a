//! Extraction pipeline orchestration
//!
//! Owns the process-wide binding/detector/formatter instances and runs the
//! per-request pipeline on the blocking thread pool under a timeout.

use std::path::Path;
use std::sync::Arc;

use tokio::time::{timeout, Duration};

use super::binding::DocumentBinding;
use super::detector::TableDetector;
use super::formatter::TableFormatter;
use super::types::{EngineError, Extraction};

pub struct ExtractionService {
    binding: Arc<dyn DocumentBinding>,
    detector: Arc<dyn TableDetector>,
    formatter: Arc<dyn TableFormatter>,
    timeout: Duration,
}

impl ExtractionService {
    pub fn new(
        binding: Arc<dyn DocumentBinding>,
        detector: Arc<dyn TableDetector>,
        formatter: Arc<dyn TableFormatter>,
        timeout: Duration,
    ) -> Self {
        Self {
            binding,
            detector,
            formatter,
            timeout,
        }
    }

    /// Open the document, detect regions on every page in document order,
    /// and format the first detected region only.
    ///
    /// PDF parsing is CPU-bound, so the pipeline runs on the blocking pool.
    /// The timeout keeps a pathological document from stalling the request
    /// forever; the client gets an error even if the blocking task lingers.
    pub async fn extract_first_table(&self, path: &Path) -> Result<Extraction, EngineError> {
        let binding = Arc::clone(&self.binding);
        let detector = Arc::clone(&self.detector);
        let formatter = Arc::clone(&self.formatter);
        let path = path.to_path_buf();

        let result = timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || {
                run_pipeline(
                    binding.as_ref(),
                    detector.as_ref(),
                    formatter.as_ref(),
                    &path,
                )
            }),
        )
        .await;

        match result {
            Ok(joined) => joined.map_err(|e| EngineError::Task(e.to_string()))?,
            Err(_) => Err(EngineError::Timeout(self.timeout.as_secs())),
        }
    }
}

fn run_pipeline(
    binding: &dyn DocumentBinding,
    detector: &dyn TableDetector,
    formatter: &dyn TableFormatter,
    path: &Path,
) -> Result<Extraction, EngineError> {
    let document = binding.open(path)?;

    let mut regions = Vec::new();
    for index in 0..document.page_count() {
        let page = document.page(index)?;
        let found = detector.detect(&page)?;
        if !found.is_empty() {
            tracing::debug!("page {}: {} table region(s)", page.number, found.len());
        }
        regions.extend(found);
    }

    let table = match regions.first() {
        Some(region) => {
            tracing::debug!(
                "formatting first region (page {}, confidence {:.2})",
                region.page(),
                region.confidence()
            );
            Some(formatter.format(region)?)
        }
        None => None,
    };

    let regions_found = regions.len();
    document.close();

    Ok(Extraction {
        regions_found,
        table,
    })
}
