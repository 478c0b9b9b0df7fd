//! Core database connection and schema initialization.
//!
//! [`Db::open`] is the single entry point for obtaining a connection: it
//! opens the file at the given path, switches on foreign-key enforcement
//! and applies the schema idempotently. Repository types wrap this handle
//! rather than sharing a global one, so the database lifecycle is explicit
//! at every call site.

use crate::libs::error::Result;
use crate::msg_debug;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "vivarium.db";

const SCHEMA_SUBJECTS: &str = "CREATE TABLE IF NOT EXISTS subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    strain TEXT NOT NULL,
    gender TEXT NOT NULL,
    birth_date DATE NOT NULL,
    source TEXT,
    cage_number TEXT,
    status TEXT NOT NULL DEFAULT 'alive',
    notes TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id INTEGER NOT NULL,
    date DATE NOT NULL,
    time TIME,
    kind TEXT NOT NULL,
    weight REAL,
    temperature REAL,
    medications TEXT,
    medication TEXT,
    dosage TEXT,
    route TEXT,
    notes TEXT,
    results TEXT,
    abnormalities TEXT,
    operator TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (subject_id) REFERENCES subjects(id) ON DELETE CASCADE
)";

const SCHEMA_INDICES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_subjects_status ON subjects(status)",
    "CREATE INDEX IF NOT EXISTS idx_records_subject_id ON records(subject_id)",
    "CREATE INDEX IF NOT EXISTS idx_records_date ON records(date)",
];

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database at `path`, enforcing foreign keys and ensuring
    /// the schema exists.
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute(SCHEMA_SUBJECTS, [])?;
        conn.execute(SCHEMA_RECORDS, [])?;
        for index in SCHEMA_INDICES {
            conn.execute(index, [])?;
        }
        msg_debug!(format!("database opened at {}", path.display()));
        Ok(Db { conn })
    }
}
