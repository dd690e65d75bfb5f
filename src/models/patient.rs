use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp storage format. Fixed-width fractional seconds keep
/// lexicographic order identical to chronological order in SQL.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One snapshot of a patient's clinical state.
///
/// Patient records are append-only: `patient_id` repeats across rows, and
/// each upload inserts a new row with `treatment_cycle` one past the
/// previous maximum. The row with the greatest `created_at` for a given
/// `patient_id` is the current record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Surrogate key, assigned by the store on insert.
    pub id: i64,
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub diagnosis: String,
    pub tumor_location: String,
    pub tumor_stage: String,
    pub treatment_plan: Option<String>,
    pub notes: Option<String>,
    pub specialist_id: String,
    pub treatment_cycle: i64,
    pub biomarkers: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A validated patient row staged for insertion. Carries everything except
/// the surrogate id and timestamp, which the store assigns at commit.
#[derive(Debug, Clone)]
pub struct NewPatientRecord {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub diagnosis: String,
    pub tumor_location: String,
    pub tumor_stage: String,
    pub treatment_plan: Option<String>,
    pub notes: Option<String>,
    pub specialist_id: String,
    pub treatment_cycle: i64,
    pub biomarkers: Option<String>,
}
