//! Care specialist endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{CareSpecialist, PatientRecord};

/// `POST /care-specialists/` — create a specialist.
///
/// The business identifier is unique; a repeat returns 409.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(specialist): Json<CareSpecialist>,
) -> Result<(StatusCode, Json<CareSpecialist>), ApiError> {
    let conn = ctx.lock_db()?;

    if db::specialist_exists(&conn, &specialist.specialist_id)? {
        return Err(ApiError::Conflict(format!(
            "Care specialist with ID {} already exists",
            specialist.specialist_id
        )));
    }

    db::insert_specialist(&conn, &specialist)?;
    tracing::info!(specialist_id = %specialist.specialist_id, "Care specialist created");

    Ok((StatusCode::CREATED, Json(specialist)))
}

/// `GET /care-specialists/{specialist_id}/patients` — the specialist's
/// patients, one latest record per patient identifier.
pub async fn patients(
    State(ctx): State<ApiContext>,
    Path(specialist_id): Path<String>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let conn = ctx.lock_db()?;

    if db::get_specialist(&conn, &specialist_id)?.is_none() {
        return Err(ApiError::NotFound("Care specialist not found".into()));
    }

    let records = db::latest_records_for_specialist(&conn, &specialist_id)?;
    Ok(Json(records))
}
