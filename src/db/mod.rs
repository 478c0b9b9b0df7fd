//! Database layer for the vivarium application.
//!
//! Persistence is built on SQLite. Each entity gets a repository type that
//! owns its own connection, opened from an explicit database path rather
//! than a process-global handle. The schema is created idempotently when a
//! connection opens; foreign keys are enforced so records can never
//! outlive their subject.

/// Connection handling and schema initialization.
pub mod db;

/// Experiment record repository.
///
/// CRUD and batch deletion for records, paginated listings joined with the
/// owning subject, and the unpaginated filtered row set used by exports.
pub mod records;

/// Read-only aggregate views.
///
/// Colony overview counts, strain/gender distributions, record-type
/// distribution, the monthly record trend and per-subject weight series.
pub mod stats;

/// Subject repository.
///
/// CRUD for subjects with code-uniqueness conflict detection and the
/// transactional cascade delete of a subject's records.
pub mod subjects;
