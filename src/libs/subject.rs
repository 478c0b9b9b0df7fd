//! Subject (tracked mouse) model, input payload and filter criteria.

use crate::libs::error::{Error, Result};
use crate::libs::filter::Predicate;
use crate::libs::messages::Message;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a subject. Stored as lowercase text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    #[default]
    Alive,
    Deceased,
    Retired,
}

impl SubjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectStatus::Alive => "alive",
            SubjectStatus::Deceased => "deceased",
            SubjectStatus::Retired => "retired",
        }
    }

    /// Parses stored or user-supplied text; unknown values yield `None` so
    /// that filters can treat them as "no constraint".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "alive" => Some(SubjectStatus::Alive),
            "deceased" => Some(SubjectStatus::Deceased),
            "retired" => Some(SubjectStatus::Retired),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub strain: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub source: Option<String>,
    pub cage_number: Option<String>,
    pub status: SubjectStatus,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Payload for subject create and full-record update.
///
/// Wire field names follow the transport contract (`mouse_code` accepted as
/// an alias for `code`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectInput {
    #[serde(alias = "mouse_code")]
    pub code: String,
    #[serde(default)]
    pub strain: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cage_number: Option<String>,
    #[serde(default)]
    pub status: Option<SubjectStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SubjectInput {
    /// Checks required fields and returns the birth date on success.
    ///
    /// Runs before any store access so a bad payload never reaches SQLite.
    pub fn validate(&self) -> Result<NaiveDate> {
        let mut missing = Vec::new();
        if self.code.trim().is_empty() {
            missing.push("code");
        }
        if self.strain.trim().is_empty() {
            missing.push("strain");
        }
        if self.gender.trim().is_empty() {
            missing.push("gender");
        }
        match self.birth_date {
            Some(date) if missing.is_empty() => Ok(date),
            birth_date => {
                if birth_date.is_none() {
                    missing.push("birth_date");
                }
                Err(Error::Validation(Message::MissingRequiredFields(missing.join(", "))))
            }
        }
    }

    pub fn status(&self) -> SubjectStatus {
        self.status.unwrap_or_default()
    }
}

/// Optional listing criteria; every absent dimension matches all rows.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub strain: Option<String>,
}

impl SubjectFilter {
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.search(&["code", "strain", "cage_number"], self.search.as_deref());
        // Unknown status values are not part of the vocabulary: no filter.
        if let Some(status) = self.status.as_deref().and_then(SubjectStatus::parse) {
            predicate.push("status = ?", status.as_str().to_string());
        }
        predicate.eq("gender", self.gender.as_deref());
        predicate.eq("strain", self.strain.as_deref());
        predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_all_missing_fields() {
        let input = SubjectInput::default();
        let err = input.validate().unwrap_err();
        match err {
            Error::Validation(Message::MissingRequiredFields(fields)) => {
                assert_eq!(fields, "code, strain, gender, birth_date");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_status_is_no_filter() {
        let filter = SubjectFilter {
            status: Some("zombie".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.predicate().where_sql(), "");
    }

    #[test]
    fn status_round_trip() {
        for status in [SubjectStatus::Alive, SubjectStatus::Deceased, SubjectStatus::Retired] {
            assert_eq!(SubjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SubjectStatus::parse(""), None);
    }
}
