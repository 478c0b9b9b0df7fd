use super::db::Db;
use crate::libs::error::{Error, Result};
use crate::libs::messages::Message;
use crate::libs::pagination::{Page, PageInfo, PageRequest};
use crate::libs::subject::{Subject, SubjectFilter, SubjectInput, SubjectStatus};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const INSERT_SUBJECT: &str = "INSERT INTO subjects (code, strain, gender, birth_date, source, cage_number, status, notes)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_SUBJECT: &str = "UPDATE subjects SET code = ?2, strain = ?3, gender = ?4, birth_date = ?5,
    source = ?6, cage_number = ?7, status = ?8, notes = ?9, updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const DELETE_RECORDS_OF_SUBJECT: &str = "DELETE FROM records WHERE subject_id = ?1";
const DELETE_SUBJECT: &str = "DELETE FROM subjects WHERE id = ?1";
const SELECT_SUBJECTS: &str = "SELECT id, code, strain, gender, birth_date, source, cage_number, status, notes, created_at, updated_at FROM subjects";
const COUNT_SUBJECTS: &str = "SELECT COUNT(*) FROM subjects";
// Stable total order: newest first, id as tie-break so pages never drift.
const ORDER_SUBJECTS: &str = " ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";
const WHERE_ID: &str = " WHERE id = ?1";

pub struct Subjects {
    conn: Connection,
}

impl Subjects {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Db::open(db_path)?;
        Ok(Subjects { conn: db.conn })
    }

    /// Creates a subject after validating required fields.
    ///
    /// A duplicate code surfaces as a `Conflict`, not a store failure.
    pub fn create(&mut self, input: &SubjectInput) -> Result<i64> {
        let birth_date = input.validate()?;
        let result = self.conn.execute(
            INSERT_SUBJECT,
            params![
                input.code.trim(),
                input.strain.trim(),
                input.gender.trim(),
                birth_date,
                input.source,
                input.cage_number,
                input.status().as_str(),
                input.notes
            ],
        );
        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => Err(Error::Conflict(Message::SubjectCodeTaken(input.code.trim().to_string()))),
            Err(err) => Err(err.into()),
        }
    }

    /// Full-record replacement; partial patches are not supported.
    pub fn update(&mut self, id: i64, input: &SubjectInput) -> Result<()> {
        let birth_date = input.validate()?;
        let result = self.conn.execute(
            UPDATE_SUBJECT,
            params![
                id,
                input.code.trim(),
                input.strain.trim(),
                input.gender.trim(),
                birth_date,
                input.source,
                input.cage_number,
                input.status().as_str(),
                input.notes
            ],
        );
        match result {
            Ok(0) => Err(Error::NotFound(Message::SubjectNotFound(id))),
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(Error::Conflict(Message::SubjectCodeTaken(input.code.trim().to_string()))),
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a subject and all of its records in one transaction.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(DELETE_RECORDS_OF_SUBJECT, params![id])?;
        let affected = tx.execute(DELETE_SUBJECT, params![id])?;
        if affected == 0 {
            // Dropping the transaction rolls back the record deletes.
            return Err(Error::NotFound(Message::SubjectNotFound(id)));
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get(&mut self, id: i64) -> Result<Subject> {
        self.conn
            .query_row(&format!("{}{}", SELECT_SUBJECTS, WHERE_ID), params![id], map_subject)
            .optional()?
            .ok_or(Error::NotFound(Message::SubjectNotFound(id)))
    }

    /// Filtered, paginated listing. The count and the page rows share one
    /// predicate, so the reported total always matches the fetched set.
    pub fn fetch_page(&mut self, filter: &SubjectFilter, page: PageRequest) -> Result<Page<Subject>> {
        let predicate = filter.predicate();
        let total: i64 = self
            .conn
            .query_row(&format!("{}{}", COUNT_SUBJECTS, predicate.where_sql()), params_from_iter(predicate.params().iter()), |row| {
                row.get(0)
            })?;

        let sql = format!("{}{}{}", SELECT_SUBJECTS, predicate.where_sql(), ORDER_SUBJECTS);
        let mut stmt = self.conn.prepare(&sql)?;
        let page_params = predicate.params_with_page(page.limit, page.offset());
        let subject_iter = stmt.query_map(params_from_iter(page_params.iter()), map_subject)?;
        let mut subjects = Vec::new();
        for subject in subject_iter {
            subjects.push(subject?);
        }

        Ok(Page {
            data: subjects,
            pagination: PageInfo::new(page, total),
        })
    }
}

fn map_subject(row: &Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        code: row.get(1)?,
        strain: row.get(2)?,
        gender: row.get(3)?,
        birth_date: row.get(4)?,
        source: row.get(5)?,
        cage_number: row.get(6)?,
        status: SubjectStatus::parse(&row.get::<_, String>(7)?).unwrap_or_default(),
        notes: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}
