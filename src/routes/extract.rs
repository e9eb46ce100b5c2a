//! Table extraction routes
//!
//! Endpoints accepting a PDF as multipart field `file` and returning the
//! first detected table as column-keyed JSON records. The OCR variant runs
//! the upload through the external OCR tool before extraction, for scanned
//! documents whose embedded text layer is missing or unreliable.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::Extraction;
use crate::error::{AppError, Result};
use crate::staging::StagedUpload;
use crate::state::AppState;

/// Body returned when detection finds nothing.
const NO_TABLES_MESSAGE: &str = "No tables found in the PDF.";

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract-tables", post(extract_tables))
        .route("/extract-tables-ocr", post(extract_tables_ocr))
        // Allow up to 100MB uploads for scanned PDFs
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
}

/// Extraction response body
///
/// Either the records of the first detected table, or a message when the
/// document contains no tables.
#[derive(Serialize)]
#[serde(untagged)]
enum ExtractResponse {
    Tables { tables: Vec<Map<String, Value>> },
    Message { message: String },
}

impl From<Extraction> for ExtractResponse {
    fn from(extraction: Extraction) -> Self {
        match extraction.table {
            Some(table) => Self::Tables {
                tables: table.records(),
            },
            None => Self::Message {
                message: NO_TABLES_MESSAGE.to_string(),
            },
        }
    }
}

/// POST /api/extract-tables
///
/// Extract the first table from an uploaded PDF.
async fn extract_tables(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let staged = receive_upload(&state, multipart).await?;

    let extraction = state
        .extraction()
        .extract_first_table(staged.pdf_path())
        .await?;
    tracing::info!(
        regions = extraction.regions_found,
        "extraction finished for {}",
        staged.pdf_path().display()
    );

    Ok(Json(extraction.into()))
}

/// POST /api/extract-tables-ocr
///
/// Re-run OCR over the uploaded PDF, then extract the first table from the
/// annotated copy. OCR failures abort the request before any extraction.
async fn extract_tables_ocr(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let staged = receive_upload(&state, multipart).await?;

    let annotated = state
        .ocr()
        .annotate(staged.pdf_path(), &staged.ocr_target())
        .await?;
    let extraction = state
        .extraction()
        .extract_first_table(&annotated)
        .await?;
    tracing::info!(
        regions = extraction.regions_found,
        "extraction finished for OCR copy of {}",
        staged.pdf_path().display()
    );

    Ok(Json(extraction.into()))
}

/// Pull the `file` field out of the multipart body and stage it on disk.
///
/// The staging directory lives as long as the returned guard, so the upload
/// and any OCR output are removed whichever way the request ends.
async fn receive_upload(state: &AppState, mut multipart: Multipart) -> Result<StagedUpload> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::Upload(e.to_string())
    })? {
        if field.name() != Some("file") {
            continue;
        }

        // A `file` entry without a filename is a plain form value, not an
        // upload; keep scanning and fall through to the missing-file error.
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        if filename.is_empty() {
            return Err(AppError::EmptyFilename);
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            AppError::Upload(e.to_string())
        })?;
        tracing::debug!("received '{}' ({} bytes)", filename, data.len());

        let staging_root = state.config().extraction.staging_dir.as_deref();
        return Ok(StagedUpload::stage(staging_root, &filename, &data).await?);
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::MissingFile)
}
