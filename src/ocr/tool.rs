//! OCR tool interface and the subprocess implementation
//!
//! The external tool is invoked as `<program> --redo-ocr <input> <output>`
//! and signals success through its exit code. The implementation enforces a
//! timeout and kills the child when the request is abandoned.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::types::OcrError;
use crate::config::OcrConfig;

/// Interface to the external OCR command-line tool.
#[async_trait]
pub trait OcrTool: Send + Sync {
    /// Whether the tool can be invoked on this host.
    async fn is_available(&self) -> bool;

    /// Produce an OCR-annotated copy of `input` at `output`.
    ///
    /// The returned path is `output`; the annotated file is only promised to
    /// exist when the subprocess exits zero.
    async fn annotate(&self, input: &Path, output: &Path) -> Result<PathBuf, OcrError>;
}

/// Runs an ocrmypdf-compatible executable in redo-OCR mode.
pub struct OcrMyPdf {
    program: String,
    timeout: Duration,
}

impl OcrMyPdf {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl OcrTool for OcrMyPdf {
    async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn annotate(&self, input: &Path, output: &Path) -> Result<PathBuf, OcrError> {
        tracing::debug!(
            "running '{} --redo-ocr {} {}'",
            self.program,
            input.display(),
            output.display()
        );

        let mut command = Command::new(&self.program);
        command
            .arg("--redo-ocr")
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let run = match timeout(self.timeout, command.output()).await {
            Ok(run) => run,
            Err(_) => return Err(OcrError::Timeout(self.timeout.as_secs())),
        };

        let run = run.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OcrError::ToolNotFound(self.program.clone())
            } else {
                OcrError::Spawn(e.to_string())
            }
        })?;

        if !run.status.success() {
            return Err(OcrError::Failed {
                status: run.status.code().unwrap_or(-1),
                stderr: stderr_summary(&run.stderr),
            });
        }

        Ok(output.to_path_buf())
    }
}

/// Trimmed stderr, capped so error payloads stay readable.
fn stderr_summary(stderr: &[u8]) -> String {
    const MAX_CHARS: usize = 400;
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.chars().count() > MAX_CHARS {
        text.chars().take(MAX_CHARS).collect()
    } else {
        text.to_string()
    }
}

/// Mock tool for handler tests: fails on demand, otherwise copies the input.
#[cfg(test)]
pub struct MockOcr {
    pub fail: bool,
}

#[cfg(test)]
#[async_trait]
impl OcrTool for MockOcr {
    async fn is_available(&self) -> bool {
        true
    }

    async fn annotate(&self, input: &Path, output: &Path) -> Result<PathBuf, OcrError> {
        if self.fail {
            return Err(OcrError::Failed {
                status: 1,
                stderr: "mock OCR failure".to_string(),
            });
        }
        tokio::fs::copy(input, output)
            .await
            .map_err(|e| OcrError::Spawn(e.to_string()))?;
        Ok(output.to_path_buf())
    }
}
