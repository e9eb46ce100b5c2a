//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::engine::ExtractionService;
use crate::ocr::OcrTool;

/// Shared application state
///
/// Holds the process-wide extraction service and OCR tool. Cloning is cheap;
/// every handler sees the same collaborators for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extraction: ExtractionService,
    ocr: Arc<dyn OcrTool>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, extraction: ExtractionService, ocr: Arc<dyn OcrTool>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                extraction,
                ocr,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the table extraction service
    pub fn extraction(&self) -> &ExtractionService {
        &self.inner.extraction
    }

    /// Get the OCR tool
    pub fn ocr(&self) -> &dyn OcrTool {
        self.inner.ocr.as_ref()
    }
}
