//! Table extraction engine
//!
//! The HTTP layer talks to three collaborators through trait seams:
//! a [`DocumentBinding`] opens a PDF and yields pages in document order,
//! a [`TableDetector`] finds table regions on each page, and a
//! [`TableFormatter`] turns a region into named columns and rows.
//! [`ExtractionService`] wires the three together and runs the pipeline.
//!
//! The default implementations work on whitespace-aligned text grids
//! extracted with lopdf. They can be swapped without touching the routes.

mod binding;
mod detector;
mod formatter;
mod service;
mod text;
mod types;

pub use binding::{DocumentBinding, LoadedDocument, LopdfBinding};
pub use detector::{GridDetector, TableDetector};
pub use formatter::{GridFormatter, TableFormatter};
pub use service::ExtractionService;
pub use types::{EngineError, Extraction, FormattedTable, PageText, TableRegion};
