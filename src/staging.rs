//! Request-scoped staging of uploaded PDFs
//!
//! Each upload lands in its own temporary directory. The directory is
//! removed when the guard drops, so staged files are cleaned up on success
//! and on every error path alike.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

/// An uploaded PDF staged on disk for the lifetime of one request.
///
/// Dropping the guard deletes the directory and everything in it, including
/// any OCR output written next to the upload.
pub struct StagedUpload {
    dir: TempDir,
    pdf_path: PathBuf,
}

impl StagedUpload {
    /// Write `data` into a fresh staging directory under `root`, or under
    /// the system temp directory when `root` is unset.
    pub async fn stage(root: Option<&Path>, filename: &str, data: &[u8]) -> io::Result<Self> {
        let dir = match root {
            Some(root) => {
                tokio::fs::create_dir_all(root).await?;
                TempDir::new_in(root)?
            }
            None => TempDir::new()?,
        };

        // Client filenames may carry path components; keep only the last one.
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        let pdf_path = dir.path().join(name);
        tokio::fs::write(&pdf_path, data).await?;

        Ok(Self { dir, pdf_path })
    }

    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }

    /// A unique sibling path for the OCR tool to write its output to.
    pub fn ocr_target(&self) -> PathBuf {
        self.dir.path().join(format!("ocr-{}.pdf", Uuid::new_v4()))
    }
}
