use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::CareSpecialist;

pub fn insert_specialist(
    conn: &Connection,
    specialist: &CareSpecialist,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO care_specialists (specialist_id, first_name, last_name, email, specialization)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            specialist.specialist_id,
            specialist.first_name,
            specialist.last_name,
            specialist.email,
            specialist.specialization,
        ],
    )?;
    Ok(())
}

pub fn get_specialist(
    conn: &Connection,
    specialist_id: &str,
) -> Result<Option<CareSpecialist>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT specialist_id, first_name, last_name, email, specialization
         FROM care_specialists WHERE specialist_id = ?1",
    )?;

    let result = stmt.query_row(params![specialist_id], |row| {
        Ok(CareSpecialist {
            specialist_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            specialization: row.get(4)?,
        })
    });

    match result {
        Ok(specialist) => Ok(Some(specialist)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn specialist_exists(conn: &Connection, specialist_id: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM care_specialists WHERE specialist_id = ?1",
        params![specialist_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn sample_specialist() -> CareSpecialist {
        CareSpecialist {
            specialist_id: "CS001".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@hospital.test".into(),
            specialization: "Oncology".into(),
        }
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let conn = open_memory_database().unwrap();
        insert_specialist(&conn, &sample_specialist()).unwrap();

        let found = get_specialist(&conn, "CS001").unwrap().unwrap();
        assert_eq!(found.email, "john.doe@hospital.test");
        assert_eq!(found.specialization, "Oncology");
    }

    #[test]
    fn get_unknown_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_specialist(&conn, "CS404").unwrap().is_none());
    }

    #[test]
    fn duplicate_specialist_id_rejected() {
        let conn = open_memory_database().unwrap();
        insert_specialist(&conn, &sample_specialist()).unwrap();

        let result = insert_specialist(&conn, &sample_specialist());
        assert!(result.is_err());
    }

    #[test]
    fn exists_reflects_inserts() {
        let conn = open_memory_database().unwrap();
        assert!(!specialist_exists(&conn, "CS001").unwrap());
        insert_specialist(&conn, &sample_specialist()).unwrap();
        assert!(specialist_exists(&conn, "CS001").unwrap());
    }
}
