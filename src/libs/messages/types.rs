//! Central registry of all user-facing messages.
//!
//! Every piece of text shown to a user (success notes, validation errors,
//! table headers) lives here as a `Message` variant. The `Display`
//! implementation in [`super::display`] turns variants into text, and the
//! `msg_*` macros route them to the console or the tracing subscriber.

#[derive(Debug, Clone)]
pub enum Message {
    // === SUBJECT MESSAGES ===
    SubjectCreated(i64),
    SubjectUpdated(i64),
    SubjectDeleted(i64),
    SubjectNotFound(i64),
    SubjectCodeTaken(String),
    NoSubjectsFound,

    // === RECORD MESSAGES ===
    RecordCreated(i64),
    RecordUpdated(i64),
    RecordDeleted(i64),
    RecordNotFound(i64),
    RecordsDeletedCount(usize),
    NoRecordIdsProvided,
    NoRecordsFound,

    // === VALIDATION MESSAGES ===
    MissingRequiredFields(String), // comma-separated field names
    InvalidDate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    PromptDatabasePath,
    PromptServerHost,
    PromptServerPort,

    // === SERVER MESSAGES ===
    ServerListening(String), // bind address

    // === STATS MESSAGES ===
    OverviewHeader,
    StrainDistributionHeader,
    GenderDistributionHeader,
    RecordTypeHeader,
    MonthlyTrendHeader,
    WeightHistoryHeader(String), // subject code
    NoWeightRecords,

    // === LISTING MESSAGES ===
    PageSummary(i64, i64, i64), // page, total pages, total rows

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // output path
    ExportingRecords(usize), // row count
    NoRecordsToExport,
}
