//! Core types for the table extraction engine

use serde_json::{Map, Value};
use thiserror::Error;

/// Text content of one PDF page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-indexed page number.
    pub number: u32,
    /// Page text with one candidate row per line.
    pub text: String,
}

/// A detected table region on a page.
///
/// Callers treat this as opaque: it is produced by a [`TableDetector`] and
/// consumed by a [`TableFormatter`]; only the page number and detection
/// confidence are exposed for logging.
///
/// [`TableDetector`]: super::TableDetector
/// [`TableFormatter`]: super::TableFormatter
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    pub(crate) page: u32,
    pub(crate) rows: Vec<Vec<String>>,
    pub(crate) confidence: f32,
}

impl TableRegion {
    pub(crate) fn new(page: u32, rows: Vec<Vec<String>>, confidence: f32) -> Self {
        Self {
            page,
            rows,
            confidence,
        }
    }

    /// 1-indexed page the region was detected on.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Detection confidence in `0.0..=1.0`.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// A structured table: ordered column names plus row data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FormattedTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Convert to a list of column-keyed records, preserving column order
    /// and row order. Rows shorter than the column list yield empty cells.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (index, column) in self.columns.iter().enumerate() {
                    let cell = row.get(index).cloned().unwrap_or_default();
                    record.insert(column.clone(), Value::String(cell));
                }
                record
            })
            .collect()
    }
}

/// Outcome of one extraction pipeline run.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Total table regions detected across all pages.
    pub regions_found: usize,
    /// The formatted first region, when at least one region was detected.
    pub table: Option<FormattedTable>,
}

/// Errors raised by the extraction pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open document: {0}")]
    Document(#[from] lopdf::Error),

    #[error("failed to read page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("table detection failed on page {page}: {reason}")]
    Detection { page: u32, reason: String },

    #[error("table formatting failed: {0}")]
    Formatting(String),

    #[error("table extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("extraction task failed: {0}")]
    Task(String),
}
