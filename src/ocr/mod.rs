//! OCR preprocessing for scanned PDFs
//!
//! Uploads that carry no text layer go through an external OCR tool before
//! table extraction. The tool is modeled as a trait so handlers stay testable
//! on hosts without the executable installed.

mod tool;
mod types;

#[cfg(test)]
pub use tool::MockOcr;
pub use tool::{OcrMyPdf, OcrTool};
pub use types::OcrError;
