//! Patient lookup and classification endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::classify::{classify_record, Classification};
use crate::db;
use crate::models::PatientRecord;

/// `GET /patients/{patient_id}` — the most recent record for a patient.
pub async fn latest(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    let conn = ctx.lock_db()?;

    db::latest_patient_record(&conn, &patient_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

/// `GET /patients/{patient_id}/classify` — run the outcome model over the
/// patient's latest record.
pub async fn classify(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Classification>, ApiError> {
    let record = {
        let conn = ctx.lock_db()?;
        db::latest_patient_record(&conn, &patient_id)?
    }
    .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let result = classify_record(ctx.model.as_ref(), &record)?;
    Ok(Json(result))
}
