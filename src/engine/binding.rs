//! Document binding: opens a PDF and yields its pages in document order

use std::path::Path;

use lopdf::{Document, ObjectId};

use super::text::page_text;
use super::types::{EngineError, PageText};

/// Opens documents for the extraction pipeline.
pub trait DocumentBinding: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn LoadedDocument>, EngineError>;
}

/// An open document. Pages are addressed by zero-based index but carry their
/// 1-indexed PDF page number. `close` releases the document explicitly;
/// dropping the value has the same effect.
pub trait LoadedDocument: Send {
    fn page_count(&self) -> usize;

    fn page(&self, index: usize) -> Result<PageText, EngineError>;

    fn close(self: Box<Self>);
}

/// Default binding backed by lopdf.
#[derive(Debug, Default)]
pub struct LopdfBinding;

impl LopdfBinding {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBinding for LopdfBinding {
    fn open(&self, path: &Path) -> Result<Box<dyn LoadedDocument>, EngineError> {
        let document = Document::load(path)?;
        // BTreeMap iteration keeps pages in ascending page-number order.
        let pages: Vec<(u32, ObjectId)> = document.get_pages().into_iter().collect();
        Ok(Box::new(LopdfDocument { document, pages }))
    }
}

struct LopdfDocument {
    document: Document,
    pages: Vec<(u32, ObjectId)>,
}

impl LoadedDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageText, EngineError> {
        let (number, page_id) = self.pages.get(index).copied().ok_or(EngineError::Page {
            page: index as u32 + 1,
            reason: "page index out of range".to_string(),
        })?;

        Ok(PageText {
            number,
            text: page_text(&self.document, number, page_id),
        })
    }

    fn close(self: Box<Self>) {}
}
