//! Shared fixtures for the HTTP integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use tabular_server::config::Config;
use tabular_server::engine::{ExtractionService, GridDetector, GridFormatter, LopdfBinding};
use tabular_server::ocr::{OcrError, OcrTool};
use tabular_server::routes;
use tabular_server::state::AppState;

pub const BOUNDARY: &str = "fixture-boundary";

/// Write a PDF whose pages each show the given lines of text, one text
/// block per page, in a layout the extraction engine can read back.
pub fn write_pdf(path: &Path, pages: &[Vec<&str>]) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = Document::with_version("1.5");

    let pages_id = document.new_object_id();
    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let content = Content {
            operations: text_block(lines),
        };
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document.compress();
    document.save(path)?;
    Ok(())
}

/// One BT..ET block, advancing a line per entry.
fn text_block(lines: &[&str]) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![16.into()]),
        Operation::new("Td", vec![50.into(), 780.into()]),
    ];
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Test double standing in for the OCR subprocess.
pub struct StubOcr {
    pub fail: bool,
}

#[async_trait::async_trait]
impl OcrTool for StubOcr {
    async fn is_available(&self) -> bool {
        true
    }

    async fn annotate(&self, input: &Path, output: &Path) -> Result<PathBuf, OcrError> {
        if self.fail {
            return Err(OcrError::Failed {
                status: 1,
                stderr: "stub OCR failure".to_string(),
            });
        }
        tokio::fs::copy(input, output)
            .await
            .map_err(|e| OcrError::Spawn(e.to_string()))?;
        Ok(output.to_path_buf())
    }
}

/// Build the application with the real extraction engine, staging under
/// `staging_dir` so tests can watch the directory empty out.
pub fn app(staging_dir: &Path, ocr: Arc<dyn OcrTool>) -> Router {
    let mut config = Config::default();
    config.extraction.staging_dir = Some(staging_dir.to_path_buf());

    let extraction = ExtractionService::new(
        Arc::new(LopdfBinding::new()),
        Arc::new(GridDetector::new()),
        Arc::new(GridFormatter::new()),
        Duration::from_secs(5),
    );

    routes::router().with_state(AppState::new(config, extraction, ocr))
}

/// Multipart POST with a single field.
pub fn form_post(uri: &str, field: &str, filename: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(name) => {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n")
                    .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        }
        None => {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{field}\"\r\n").as_bytes(),
            );
            body.extend_from_slice(b"\r\n");
        }
    }
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Multipart POST uploading `bytes` as the `file` field.
pub fn pdf_post(uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    form_post(uri, "file", Some(filename), bytes)
}
