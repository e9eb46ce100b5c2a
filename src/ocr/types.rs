//! OCR subprocess error types

use thiserror::Error;

/// Failures reported by the OCR preprocessing step.
///
/// Success is signaled by the subprocess exit code; every failure class is a
/// typed reason rather than a missing output path.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR tool '{0}' was not found")]
    ToolNotFound(String),

    #[error("failed to run OCR tool: {0}")]
    Spawn(String),

    #[error("OCR tool exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),
}
