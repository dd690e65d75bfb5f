//! CSV ingestion pipeline.
//!
//! Parses an uploaded CSV payload into patient records, validates each row
//! against the store (specialist referential integrity, intra-batch
//! duplicate detection, strict date format), computes the next treatment
//! cycle per patient, and commits the whole batch in one transaction.
//!
//! The batch is all-or-nothing: the first failing row rejects the upload
//! and nothing persists.

use std::collections::HashSet;

use chrono::NaiveDate;
use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, DatabaseError};
use crate::models::NewPatientRecord;

/// Columns every upload must carry. Order is not significant.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "patient_id",
    "first_name",
    "last_name",
    "date_of_birth",
    "gender",
    "diagnosis",
    "tumor_location",
    "tumor_stage",
    "specialist_id",
];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Upload is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("Malformed CSV: {0}")]
    MalformedCsv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Row {row}: missing value for required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("Row {row}: invalid date of birth '{value}' for patient {patient_id}, use YYYY-MM-DD")]
    InvalidDateFormat {
        row: usize,
        patient_id: String,
        value: String,
    },

    #[error("Row {row}: care specialist with ID {specialist_id} not found")]
    SpecialistNotFound { row: usize, specialist_id: String },

    #[error("Row {row}: duplicate patient ID {patient_id} within upload")]
    DuplicatePatientId { row: usize, patient_id: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl IngestError {
    /// Validation failures are the caller's fault; database failures are not.
    pub fn is_validation(&self) -> bool {
        !matches!(self, IngestError::Database(_))
    }
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub patients_processed: usize,
}

/// Resolved positions of the known columns within the header row.
/// The mapping is exhaustive: columns outside this set are ignored, so
/// unexpected input shapes cannot leak into a record.
struct ColumnMap {
    patient_id: usize,
    first_name: usize,
    last_name: usize,
    date_of_birth: usize,
    gender: usize,
    diagnosis: usize,
    tumor_location: usize,
    tumor_stage: usize,
    specialist_id: usize,
    treatment_plan: Option<usize>,
    notes: Option<usize>,
    biomarkers: Option<usize>,
}

fn header_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(IngestError::MissingColumn(name))
}

fn optional_header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        Ok(Self {
            patient_id: header_index(headers, "patient_id")?,
            first_name: header_index(headers, "first_name")?,
            last_name: header_index(headers, "last_name")?,
            date_of_birth: header_index(headers, "date_of_birth")?,
            gender: header_index(headers, "gender")?,
            diagnosis: header_index(headers, "diagnosis")?,
            tumor_location: header_index(headers, "tumor_location")?,
            tumor_stage: header_index(headers, "tumor_stage")?,
            specialist_id: header_index(headers, "specialist_id")?,
            treatment_plan: optional_header_index(headers, "treatment_plan"),
            notes: optional_header_index(headers, "notes"),
            biomarkers: optional_header_index(headers, "biomarkers"),
        })
    }
}

/// A required field: present and non-empty, or the batch is rejected.
fn required_field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    row: usize,
    field: &'static str,
) -> Result<&'r str, IngestError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(IngestError::MissingField { row, field }),
    }
}

/// An optional field: absent or empty collapses to `None`.
fn optional_field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Ingest a CSV payload of patient rows.
///
/// Rows are processed sequentially in file order. Each row is parsed
/// through the fixed column mapping, its date of birth validated as
/// `YYYY-MM-DD`, its specialist resolved against the store, and its
/// patient id checked against the ids already seen in this upload. The
/// next treatment cycle comes from the patient's most recent persisted
/// record (1 when there is none). Validated rows are staged in memory and
/// committed as a single transaction only after every row has passed.
///
/// The caller is expected to hold exclusive access to the connection for
/// the duration of the call; that serializes concurrent uploads and keeps
/// the cycle lookup and the insert atomic with respect to each other.
pub fn ingest_patients_csv(
    conn: &mut Connection,
    payload: &[u8],
) -> Result<IngestReport, IngestError> {
    let text = std::str::from_utf8(payload).map_err(|_| IngestError::InvalidEncoding)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut seen_patient_ids: HashSet<String> = HashSet::new();
    let mut staged: Vec<NewPatientRecord> = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1; // 1-based data-row number for error messages
        let record = result?;

        let patient_id = required_field(&record, columns.patient_id, row, "patient_id")?;
        let first_name = required_field(&record, columns.first_name, row, "first_name")?;
        let last_name = required_field(&record, columns.last_name, row, "last_name")?;
        let dob_raw = required_field(&record, columns.date_of_birth, row, "date_of_birth")?;
        let gender = required_field(&record, columns.gender, row, "gender")?;
        let diagnosis = required_field(&record, columns.diagnosis, row, "diagnosis")?;
        let tumor_location =
            required_field(&record, columns.tumor_location, row, "tumor_location")?;
        let tumor_stage = required_field(&record, columns.tumor_stage, row, "tumor_stage")?;
        let specialist_id = required_field(&record, columns.specialist_id, row, "specialist_id")?;

        let date_of_birth = NaiveDate::parse_from_str(dob_raw, "%Y-%m-%d").map_err(|_| {
            IngestError::InvalidDateFormat {
                row,
                patient_id: patient_id.to_string(),
                value: dob_raw.to_string(),
            }
        })?;

        if !db::specialist_exists(conn, specialist_id)? {
            return Err(IngestError::SpecialistNotFound {
                row,
                specialist_id: specialist_id.to_string(),
            });
        }

        // Repeats within one upload are rejected; repeats across uploads
        // are how a patient advances to the next cycle.
        if !seen_patient_ids.insert(patient_id.to_string()) {
            return Err(IngestError::DuplicatePatientId {
                row,
                patient_id: patient_id.to_string(),
            });
        }

        let treatment_cycle = match db::latest_patient_record(conn, patient_id)? {
            Some(previous) => previous.treatment_cycle + 1,
            None => 1,
        };

        staged.push(NewPatientRecord {
            patient_id: patient_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth,
            gender: gender.to_string(),
            diagnosis: diagnosis.to_string(),
            tumor_location: tumor_location.to_string(),
            tumor_stage: tumor_stage.to_string(),
            treatment_plan: optional_field(&record, columns.treatment_plan),
            notes: optional_field(&record, columns.notes),
            specialist_id: specialist_id.to_string(),
            treatment_cycle,
            biomarkers: optional_field(&record, columns.biomarkers),
        });
    }

    // A valid header with no data rows is a successful zero-row batch.
    let patients_processed = db::insert_patient_batch(conn, &staged)?;
    tracing::info!(patients_processed, "CSV batch committed");

    Ok(IngestReport { patients_processed })
}
