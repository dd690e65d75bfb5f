//! CSV upload endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::ingest::ingest_patients_csv;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub patients_processed: usize,
}

/// `POST /upload/patients` — multipart CSV upload of patient rows.
///
/// Expects a `file` part carrying a `.csv` attachment. The whole batch is
/// handed to the ingestion pipeline and committed atomically; any row
/// failure rejects the upload with a 400 naming the offending row.
pub async fn patients_csv(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) = file.ok_or_else(|| {
        ApiError::BadRequest("Missing 'file' field in multipart upload".into())
    })?;

    if !filename.ends_with(".csv") {
        return Err(ApiError::BadRequest("File must be a CSV".into()));
    }

    let mut conn = ctx.lock_db()?;
    let report = ingest_patients_csv(&mut conn, &bytes)?;

    Ok(Json(UploadResponse {
        message: format!(
            "Successfully processed and stored {} patients",
            report.patients_processed
        ),
        patients_processed: report.patients_processed,
    }))
}
