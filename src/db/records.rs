use super::db::Db;
use crate::libs::error::{Error, Result};
use crate::libs::messages::Message;
use crate::libs::pagination::{Page, PageInfo, PageRequest};
use crate::libs::record::{medications_from_columns, ExportFilter, Record, RecordFilter, RecordInput};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const INSERT_RECORD: &str = "INSERT INTO records (subject_id, date, time, kind, weight, temperature, medications, notes, results, abnormalities, operator)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_RECORD: &str = "UPDATE records SET subject_id = ?2, date = ?3, time = ?4, kind = ?5, weight = ?6, temperature = ?7,
    medications = ?8, medication = NULL, dosage = NULL, route = NULL, notes = ?9, results = ?10, abnormalities = ?11, operator = ?12,
    updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const DELETE_RECORD: &str = "DELETE FROM records WHERE id = ?1";
const DELETE_RECORDS_IN: &str = "DELETE FROM records WHERE id IN";
// Listings join the owning subject to carry its code and strain.
const SELECT_RECORDS: &str = "SELECT r.id, r.subject_id, r.date, r.time, r.kind, r.weight, r.temperature,
    r.medications, r.medication, r.dosage, r.route, r.notes, r.results, r.abnormalities, r.operator,
    r.created_at, r.updated_at, s.code, s.strain
    FROM records r LEFT JOIN subjects s ON r.subject_id = s.id";
const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM records r LEFT JOIN subjects s ON r.subject_id = s.id";
// Stable total order: event date first, id as tie-break so pages never drift.
const ORDER_RECORDS: &str = " ORDER BY r.date DESC, r.id DESC";
const ORDER_RECORDS_PAGE: &str = " ORDER BY r.date DESC, r.id DESC LIMIT ? OFFSET ?";
const WHERE_ID: &str = " WHERE r.id = ?1";
const WHERE_SUBJECT: &str = " WHERE r.subject_id = ?1";
const SUBJECT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = ?1)";

pub struct Records {
    conn: Connection,
}

impl Records {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Db::open(db_path)?;
        Ok(Records { conn: db.conn })
    }

    /// Creates a record after validating required fields and checking that
    /// the referenced subject exists. Medications are always stored in the
    /// structured list form.
    pub fn create(&mut self, input: &RecordInput) -> Result<i64> {
        let (subject_id, date) = input.validate()?;
        self.ensure_subject(subject_id)?;
        let medications = encode_medications(input)?;
        self.conn.execute(
            INSERT_RECORD,
            params![
                subject_id,
                date,
                input.time,
                input.kind.trim(),
                input.weight,
                input.temperature,
                medications,
                input.notes,
                input.results,
                input.abnormalities,
                input.operator
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Full-record replacement; clears the legacy medication columns so the
    /// structured list is the single source of truth after a rewrite.
    pub fn update(&mut self, id: i64, input: &RecordInput) -> Result<()> {
        let (subject_id, date) = input.validate()?;
        self.ensure_subject(subject_id)?;
        let medications = encode_medications(input)?;
        let affected = self.conn.execute(
            UPDATE_RECORD,
            params![
                id,
                subject_id,
                date,
                input.time,
                input.kind.trim(),
                input.weight,
                input.temperature,
                medications,
                input.notes,
                input.results,
                input.abnormalities,
                input.operator
            ],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(Message::RecordNotFound(id)));
        }
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_RECORD, params![id])?;
        if affected == 0 {
            return Err(Error::NotFound(Message::RecordNotFound(id)));
        }
        Ok(())
    }

    /// Deletes a set of records and reports how many actually existed.
    /// An empty id set is a caller error, not a silent no-op.
    pub fn delete_many(&mut self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Err(Error::Validation(Message::NoRecordIdsProvided));
        }
        let sql = format!("{} ({})", DELETE_RECORDS_IN, vec!["?"; ids.len()].join(", "));
        let deleted = self.conn.execute(&sql, params_from_iter(ids.iter()))?;
        Ok(deleted)
    }

    pub fn get(&mut self, id: i64) -> Result<Record> {
        self.conn
            .query_row(&format!("{}{}", SELECT_RECORDS, WHERE_ID), params![id], map_record)
            .optional()?
            .ok_or(Error::NotFound(Message::RecordNotFound(id)))
    }

    /// Filtered, paginated listing. The count and the page rows share one
    /// predicate, so the reported total always matches the fetched set.
    pub fn fetch_page(&mut self, filter: &RecordFilter, page: PageRequest) -> Result<Page<Record>> {
        let predicate = filter.predicate();
        let total: i64 = self
            .conn
            .query_row(&format!("{}{}", COUNT_RECORDS, predicate.where_sql()), params_from_iter(predicate.params().iter()), |row| {
                row.get(0)
            })?;

        let sql = format!("{}{}{}", SELECT_RECORDS, predicate.where_sql(), ORDER_RECORDS_PAGE);
        let mut stmt = self.conn.prepare(&sql)?;
        let page_params = predicate.params_with_page(page.limit, page.offset());
        let record_iter = stmt.query_map(params_from_iter(page_params.iter()), map_record)?;
        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(Page {
            data: records,
            pagination: PageInfo::new(page, total),
        })
    }

    /// The unpaginated row set for a given export filter; the export
    /// writers render exactly what this returns.
    pub fn fetch_filtered(&mut self, filter: &ExportFilter) -> Result<Vec<Record>> {
        let predicate = filter.predicate();
        let sql = format!("{}{}{}", SELECT_RECORDS, predicate.where_sql(), ORDER_RECORDS);
        let mut stmt = self.conn.prepare(&sql)?;
        let record_iter = stmt.query_map(params_from_iter(predicate.params().iter()), map_record)?;
        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// All records of one subject, newest first. The subject must exist.
    pub fn for_subject(&mut self, subject_id: i64) -> Result<Vec<Record>> {
        self.ensure_subject(subject_id)?;
        let mut stmt = self.conn.prepare(&format!("{}{}{}", SELECT_RECORDS, WHERE_SUBJECT, ORDER_RECORDS))?;
        let record_iter = stmt.query_map(params![subject_id], map_record)?;
        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }

    fn ensure_subject(&self, subject_id: i64) -> Result<()> {
        let exists: bool = self.conn.query_row(SUBJECT_EXISTS, params![subject_id], |row| row.get(0))?;
        if !exists {
            return Err(Error::NotFound(Message::SubjectNotFound(subject_id)));
        }
        Ok(())
    }
}

fn encode_medications(input: &RecordInput) -> Result<Option<String>> {
    let medications = input.normalized_medications();
    if medications.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(&medications)?))
    }
}

fn map_record(row: &Row) -> rusqlite::Result<Record> {
    let medications = medications_from_columns(row.get(7)?, row.get(8)?, row.get(9)?, row.get(10)?);
    Ok(Record {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        date: row.get(2)?,
        time: row.get(3)?,
        kind: row.get(4)?,
        weight: row.get(5)?,
        temperature: row.get(6)?,
        medications,
        notes: row.get(11)?,
        results: row.get(12)?,
        abnormalities: row.get(13)?,
        operator: row.get(14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
        subject_code: row.get(17)?,
        strain: row.get(18)?,
    })
}
