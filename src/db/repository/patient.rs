use chrono::Utc;
use rusqlite::{params, Connection, Row, TransactionBehavior};

use crate::db::DatabaseError;
use crate::models::{NewPatientRecord, PatientRecord, TIMESTAMP_FORMAT};

const PATIENT_COLUMNS: &str =
    "id, patient_id, first_name, last_name, date_of_birth, gender, diagnosis,
     tumor_location, tumor_stage, treatment_plan, notes, specialist_id,
     treatment_cycle, biomarkers, created_at";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        date_of_birth: row.get(4)?,
        gender: row.get(5)?,
        diagnosis: row.get(6)?,
        tumor_location: row.get(7)?,
        tumor_stage: row.get(8)?,
        treatment_plan: row.get(9)?,
        notes: row.get(10)?,
        specialist_id: row.get(11)?,
        treatment_cycle: row.get(12)?,
        biomarkers: row.get(13)?,
        created_at: row.get(14)?,
    })
}

/// Insert a staged batch of patient records inside one transaction.
///
/// Either every record persists or none does: any insert failure rolls the
/// transaction back via the drop guard. Timestamps are assigned here, at
/// commit time, in batch order.
pub fn insert_patient_batch(
    conn: &mut Connection,
    records: &[NewPatientRecord],
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    for record in records {
        let created_at = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
        tx.execute(
            "INSERT INTO patients (patient_id, first_name, last_name, date_of_birth, gender,
             diagnosis, tumor_location, tumor_stage, treatment_plan, notes, specialist_id,
             treatment_cycle, biomarkers, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                record.patient_id,
                record.first_name,
                record.last_name,
                record.date_of_birth,
                record.gender,
                record.diagnosis,
                record.tumor_location,
                record.tumor_stage,
                record.treatment_plan,
                record.notes,
                record.specialist_id,
                record.treatment_cycle,
                record.biomarkers,
                created_at,
            ],
        )?;
    }

    tx.commit()?;
    Ok(records.len())
}

/// The most recent record for a patient identifier, or `None` if the
/// patient has never been ingested. Surrogate id breaks timestamp ties
/// within a batch.
pub fn latest_patient_record(
    conn: &Connection,
    patient_id: &str,
) -> Result<Option<PatientRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE patient_id = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT 1"
    ))?;

    let result = stmt.query_row(params![patient_id], patient_from_row);

    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Latest record per patient identifier among a specialist's rows.
pub fn latest_records_for_specialist(
    conn: &Connection,
    specialist_id: &str,
) -> Result<Vec<PatientRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients AS p
         WHERE p.specialist_id = ?1
           AND p.id = (SELECT q.id FROM patients AS q
                       WHERE q.patient_id = p.patient_id AND q.specialist_id = ?1
                       ORDER BY q.created_at DESC, q.id DESC
                       LIMIT 1)
         ORDER BY p.patient_id"
    ))?;

    let rows = stmt.query_map(params![specialist_id], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Count of all persisted patient rows (history included).
pub fn count_patient_records(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}
