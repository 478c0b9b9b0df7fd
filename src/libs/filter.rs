//! Shared predicate builder for filtered listings and exports.
//!
//! Collects optional filter criteria into an `AND`-combined SQL fragment
//! plus owned parameter values. The same [`Predicate`] instance is applied
//! to both the `COUNT(*)` query and the page-fetch query of a listing, so
//! the reported total and the fetched rows are always drawn from the same
//! row set.
//!
//! Absent or empty criteria add no clause: an empty predicate matches every
//! row. Values for fixed vocabularies (e.g. subject status) are parsed
//! before they reach this builder; unknown values are skipped by the caller
//! rather than turned into a never-matching clause.

use chrono::NaiveDate;
use rusqlite::types::Value;

#[derive(Debug, Default)]
pub struct Predicate {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw clause with a single bound parameter.
    pub fn push(&mut self, clause: impl Into<String>, value: impl Into<Value>) {
        self.clauses.push(clause.into());
        self.params.push(value.into());
    }

    /// Case-insensitive substring match across a fixed set of columns.
    ///
    /// The columns are OR-combined into one criterion; a blank term adds
    /// no constraint. SQLite `LIKE` is case-insensitive for ASCII.
    pub fn search(&mut self, columns: &[&str], term: Option<&str>) {
        let term = match term.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return,
        };
        let pattern = format!("%{}%", term);
        let alternatives = columns.iter().map(|c| format!("{} LIKE ?", c)).collect::<Vec<_>>().join(" OR ");
        self.clauses.push(format!("({})", alternatives));
        for _ in columns {
            self.params.push(Value::Text(pattern.clone()));
        }
    }

    /// Exact match on a categorical column; blank values add no constraint.
    pub fn eq(&mut self, column: &str, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.push(format!("{} = ?", column), v.to_string());
        }
    }

    /// Exact match on an integer column.
    pub fn eq_id(&mut self, column: &str, value: Option<i64>) {
        if let Some(v) = value {
            self.push(format!("{} = ?", column), v);
        }
    }

    /// Inclusive lower bound on a date column.
    pub fn date_from(&mut self, column: &str, value: Option<NaiveDate>) {
        if let Some(d) = value {
            self.push(format!("{} >= ?", column), d.format("%Y-%m-%d").to_string());
        }
    }

    /// Inclusive upper bound on a date column.
    pub fn date_to(&mut self, column: &str, value: Option<NaiveDate>) {
        if let Some(d) = value {
            self.push(format!("{} <= ?", column), d.format("%Y-%m-%d").to_string());
        }
    }

    /// `IN (...)` membership on an integer column; an empty set adds no constraint.
    pub fn any_id(&mut self, column: &str, values: &[i64]) {
        if values.is_empty() {
            return;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{} IN ({})", column, placeholders));
        for v in values {
            self.params.push(Value::Integer(*v));
        }
    }

    /// `IN (...)` membership on a text column; an empty set adds no constraint.
    pub fn any_text(&mut self, column: &str, values: &[String]) {
        let values: Vec<&String> = values.iter().filter(|v| !v.trim().is_empty()).collect();
        if values.is_empty() {
            return;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{} IN ({})", column, placeholders));
        for v in values {
            self.params.push(Value::Text(v.to_string()));
        }
    }

    /// Renders the `WHERE` fragment, or an empty string for an empty predicate.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Bound parameter values, in clause order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Parameter values extended with a trailing LIMIT/OFFSET pair, for the
    /// page-fetch variant of a query.
    pub fn params_with_page(&self, limit: i64, offset: i64) -> Vec<Value> {
        let mut params = self.params.clone();
        params.push(Value::Integer(limit));
        params.push(Value::Integer(offset));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_predicate_matches_all() {
        let p = Predicate::new();
        assert_eq!(p.where_sql(), "");
        assert!(p.params().is_empty());
    }

    #[test]
    fn criteria_combine_with_and() {
        let mut p = Predicate::new();
        p.eq("status", Some("alive"));
        p.eq_id("subject_id", Some(7));
        assert_eq!(p.where_sql(), " WHERE status = ? AND subject_id = ?");
        assert_eq!(p.params().len(), 2);
    }

    #[test]
    fn blank_values_add_no_constraint() {
        let mut p = Predicate::new();
        p.search(&["code", "strain"], Some("   "));
        p.eq("gender", Some(""));
        p.eq("strain", None);
        p.any_id("id", &[]);
        assert_eq!(p.where_sql(), "");
    }

    #[test]
    fn search_expands_per_column() {
        let mut p = Predicate::new();
        p.search(&["s.code", "r.operator"], Some("M00"));
        assert_eq!(p.where_sql(), " WHERE (s.code LIKE ? OR r.operator LIKE ?)");
        assert_eq!(p.params().len(), 2);
    }

    #[test]
    fn id_set_renders_placeholders() {
        let mut p = Predicate::new();
        p.any_id("r.id", &[1, 2, 3]);
        assert_eq!(p.where_sql(), " WHERE r.id IN (?, ?, ?)");
        assert_eq!(p.params().len(), 3);
    }
}
