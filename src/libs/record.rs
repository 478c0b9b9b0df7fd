//! Experiment record model, input payload and filter criteria.
//!
//! A record is one experiment or observation event tied to a subject:
//! weighing, medication administration, behavioral observation, blood draw,
//! dissection, or any other categorical `type`. Administered substances are
//! carried as an ordered list of [`Medication`] entries; rows written by
//! older versions hold a single medication in flat columns and are
//! normalized to the list form on read.

use crate::libs::error::{Error, Result};
use crate::libs::filter::Predicate;
use crate::libs::messages::Message;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One administered substance within a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: Option<f64>,
    pub temperature: Option<f64>,
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
    pub results: Option<String>,
    pub abnormalities: Option<String>,
    pub operator: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    // Joined from the owning subject for listings and exports.
    pub subject_code: Option<String>,
    pub strain: Option<String>,
}

/// Payload for record create and full-record update.
///
/// Wire aliases (`mouse_id`, `experiment_date`, `experiment_type`,
/// `behavior_notes`) keep the original API surface working; the flat
/// `medication`/`dosage`/`route` trio is the legacy single-medication form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordInput {
    #[serde(default, alias = "mouse_id")]
    pub subject_id: Option<i64>,
    #[serde(default, alias = "experiment_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default, rename = "type", alias = "experiment_type")]
    pub kind: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub medications: Option<Vec<Medication>>,
    #[serde(default)]
    pub medication: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default, alias = "behavior_notes")]
    pub notes: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub abnormalities: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

impl RecordInput {
    /// Checks required fields and returns (subject id, date) on success.
    pub fn validate(&self) -> Result<(i64, NaiveDate)> {
        let mut missing = Vec::new();
        if self.kind.trim().is_empty() {
            missing.push("type");
        }
        match (self.subject_id, self.date) {
            (Some(subject_id), Some(date)) if missing.is_empty() => Ok((subject_id, date)),
            (subject_id, date) => {
                if subject_id.is_none() {
                    missing.push("subject_id");
                }
                if date.is_none() {
                    missing.push("date");
                }
                Err(Error::Validation(Message::MissingRequiredFields(missing.join(", "))))
            }
        }
    }

    /// Medication list for storage: the structured list is authoritative
    /// when present and non-empty, otherwise the legacy single-medication
    /// fields form a one-element list.
    pub fn normalized_medications(&self) -> Vec<Medication> {
        if let Some(list) = &self.medications {
            if !list.is_empty() {
                return list.clone();
            }
        }
        match &self.medication {
            Some(name) if !name.trim().is_empty() => vec![Medication {
                name: name.clone(),
                dosage: self.dosage.clone(),
                route: self.route.clone(),
            }],
            _ => Vec::new(),
        }
    }
}

/// Rebuilds the medication list from stored columns, preferring the
/// structured JSON column over the legacy flat columns.
pub fn medications_from_columns(structured: Option<String>, medication: Option<String>, dosage: Option<String>, route: Option<String>) -> Vec<Medication> {
    if let Some(raw) = structured {
        if !raw.trim().is_empty() {
            if let Ok(list) = serde_json::from_str::<Vec<Medication>>(&raw) {
                if !list.is_empty() {
                    return list;
                }
            }
        }
    }
    match medication {
        Some(name) if !name.trim().is_empty() => vec![Medication { name, dosage, route }],
        _ => Vec::new(),
    }
}

/// Optional listing criteria; every absent dimension matches all rows.
///
/// Columns are qualified for the records/subjects join (`r` / `s`).
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub subject_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.search(&["s.code", "r.operator"], self.search.as_deref());
        predicate.eq("r.kind", self.kind.as_deref());
        predicate.eq_id("r.subject_id", self.subject_id);
        predicate.date_from("r.date", self.start_date);
        predicate.date_to("r.date", self.end_date);
        predicate
    }
}

/// Criteria for the unpaginated export row set: date range, subject id set
/// and record type set. Empty sets add no constraint.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subject_ids: Vec<i64>,
    pub kinds: Vec<String>,
}

impl ExportFilter {
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.date_from("r.date", self.start_date);
        predicate.date_to("r.date", self.end_date);
        predicate.any_id("r.subject_id", &self.subject_ids);
        predicate.any_text("r.kind", &self.kinds);
        predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_subject_date_and_type() {
        let err = RecordInput::default().validate().unwrap_err();
        match err {
            Error::Validation(Message::MissingRequiredFields(fields)) => {
                assert_eq!(fields, "type, subject_id, date");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn structured_medications_win_over_legacy() {
        let input = RecordInput {
            medications: Some(vec![Medication {
                name: "ketamine".to_string(),
                dosage: Some("10mg/kg".to_string()),
                route: Some("ip".to_string()),
            }]),
            medication: Some("saline".to_string()),
            ..Default::default()
        };
        let meds = input.normalized_medications();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "ketamine");
    }

    #[test]
    fn legacy_columns_become_single_element_list() {
        let meds = medications_from_columns(None, Some("saline".to_string()), Some("0.5ml".to_string()), Some("sc".to_string()));
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "saline");
        assert_eq!(meds[0].dosage.as_deref(), Some("0.5ml"));

        assert!(medications_from_columns(None, None, None, None).is_empty());
    }

    #[test]
    fn stored_json_wins_over_legacy_columns() {
        let raw = r#"[{"name":"buprenorphine","dosage":"0.1mg/kg","route":"sc"}]"#;
        let meds = medications_from_columns(Some(raw.to_string()), Some("saline".to_string()), None, None);
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "buprenorphine");
    }
}
