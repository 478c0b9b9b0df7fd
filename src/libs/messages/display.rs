//! Display implementation for application messages.
//!
//! Converts structured [`Message`] variants into the human-readable text
//! shown on the terminal and in API error responses. Keeping every string
//! in one place makes wording consistent and the full message surface easy
//! to review.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let message = match self {
            // === SUBJECT MESSAGES ===
            Message::SubjectCreated(id) => format!("Subject created with id {}", id),
            Message::SubjectUpdated(id) => format!("Subject {} updated", id),
            Message::SubjectDeleted(id) => format!("Subject {} and its records deleted", id),
            Message::SubjectNotFound(id) => format!("Subject {} not found", id),
            Message::SubjectCodeTaken(code) => format!("Subject code '{}' already exists, choose another code", code),
            Message::NoSubjectsFound => "No subjects found".to_string(),

            // === RECORD MESSAGES ===
            Message::RecordCreated(id) => format!("Record created with id {}", id),
            Message::RecordUpdated(id) => format!("Record {} updated", id),
            Message::RecordDeleted(id) => format!("Record {} deleted", id),
            Message::RecordNotFound(id) => format!("Record {} not found", id),
            Message::RecordsDeletedCount(count) => format!("Deleted {} record(s)", count),
            Message::NoRecordIdsProvided => "No record ids provided".to_string(),
            Message::NoRecordsFound => "No records found".to_string(),

            // === VALIDATION MESSAGES ===
            Message::MissingRequiredFields(fields) => format!("Missing required fields: {}", fields),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration file".to_string(),
            Message::PromptDatabasePath => "Database file path (empty for default)".to_string(),
            Message::PromptServerHost => "Server host".to_string(),
            Message::PromptServerPort => "Server port".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Server listening on http://{}", addr),

            // === STATS MESSAGES ===
            Message::OverviewHeader => "📊 Colony overview".to_string(),
            Message::StrainDistributionHeader => "🧬 Strain distribution".to_string(),
            Message::GenderDistributionHeader => "⚥ Gender distribution".to_string(),
            Message::RecordTypeHeader => "📋 Records by type".to_string(),
            Message::MonthlyTrendHeader => "📅 Monthly record trend".to_string(),
            Message::WeightHistoryHeader(code) => format!("⚖️ Weight history for {}", code),
            Message::NoWeightRecords => "No weighed records for this subject".to_string(),

            // === LISTING MESSAGES ===
            Message::PageSummary(page, total_pages, total) => format!("Page {} of {} ({} total)", page, total_pages, total),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportingRecords(count) => format!("Exporting {} record(s)", count),
            Message::NoRecordsToExport => "No records match the export filter".to_string(),
        };
        write!(f, "{}", message)
    }
}
