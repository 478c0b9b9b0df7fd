//! Read-only aggregate views over subjects and records.
//!
//! Every method recomputes from live store state at call time; there is no
//! caching layer. Day boundaries for record dates use local time, while
//! `created_at` comparisons stay in UTC to match the stored timestamps.

use super::db::Db;
use crate::libs::error::{Error, Result};
use crate::libs::messages::Message;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;

const COUNT_SUBJECTS: &str = "SELECT COUNT(*) FROM subjects";
const COUNT_SUBJECTS_BY_STATUS: &str = "SELECT COUNT(*) FROM subjects WHERE status = ?1";
const COUNT_SUBJECTS_NEW_MONTH: &str = "SELECT COUNT(*) FROM subjects WHERE created_at >= date('now', '-30 days')";
const COUNT_RECORDS_TODAY: &str = "SELECT COUNT(*) FROM records WHERE date = date('now', 'localtime')";
const COUNT_RECORDS_SINCE: &str = "SELECT COUNT(*) FROM records WHERE date >= date('now', 'localtime', ?1)";
const STRAIN_DISTRIBUTION: &str = "SELECT strain, COUNT(*) AS count,
    ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM subjects), 1) AS percentage
    FROM subjects GROUP BY strain ORDER BY count DESC";
const GENDER_DISTRIBUTION: &str = "SELECT gender, COUNT(*) AS count,
    ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM subjects), 1) AS percentage
    FROM subjects GROUP BY gender ORDER BY count DESC";
const KIND_DISTRIBUTION: &str = "SELECT kind, COUNT(*) AS count FROM records GROUP BY kind ORDER BY count DESC";
const MONTHLY_TREND: &str = "SELECT strftime('%Y-%m', date) AS month, COUNT(*) AS count
    FROM records WHERE date >= date('now', 'localtime', '-6 months')
    GROUP BY month ORDER BY month";
const WEIGHT_HISTORY: &str = "SELECT date, weight FROM records WHERE subject_id = ?1 AND weight IS NOT NULL ORDER BY date ASC, id ASC";
const SUBJECT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = ?1)";

/// Colony overview counters.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_subjects: i64,
    pub alive_subjects: i64,
    pub deceased_subjects: i64,
    pub retired_subjects: i64,
    pub today_records: i64,
    pub week_records: i64,
    pub month_records: i64,
    pub month_new_subjects: i64,
}

/// One group of a categorical distribution with its share of the total,
/// rounded to one decimal place.
#[derive(Debug, Serialize)]
pub struct DistributionSlice {
    pub value: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct KindCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

/// Record count for one year-month bucket. Months without records are
/// omitted, so the series is sparse.
#[derive(Debug, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

pub struct Stats {
    conn: Connection,
}

impl Stats {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Db::open(db_path)?;
        Ok(Stats { conn: db.conn })
    }

    pub fn overview(&mut self) -> Result<Overview> {
        Ok(Overview {
            total_subjects: self.count(COUNT_SUBJECTS)?,
            alive_subjects: self.count_by_status("alive")?,
            deceased_subjects: self.count_by_status("deceased")?,
            retired_subjects: self.count_by_status("retired")?,
            today_records: self.count(COUNT_RECORDS_TODAY)?,
            week_records: self.count_since("-7 days")?,
            month_records: self.count_since("-30 days")?,
            month_new_subjects: self.count(COUNT_SUBJECTS_NEW_MONTH)?,
        })
    }

    /// Subjects grouped by strain; empty when there are no subjects.
    pub fn strain_distribution(&mut self) -> Result<Vec<DistributionSlice>> {
        self.distribution(STRAIN_DISTRIBUTION)
    }

    /// Subjects grouped by gender; empty when there are no subjects.
    pub fn gender_distribution(&mut self) -> Result<Vec<DistributionSlice>> {
        self.distribution(GENDER_DISTRIBUTION)
    }

    /// Records grouped by type, most frequent first.
    pub fn kind_distribution(&mut self) -> Result<Vec<KindCount>> {
        let mut stmt = self.conn.prepare(KIND_DISTRIBUTION)?;
        let iter = stmt.query_map([], |row| {
            Ok(KindCount {
                kind: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        let mut counts = Vec::new();
        for count in iter {
            counts.push(count?);
        }
        Ok(counts)
    }

    /// Records from the last six months bucketed by year-month, ascending.
    pub fn monthly_trend(&mut self) -> Result<Vec<MonthBucket>> {
        let mut stmt = self.conn.prepare(MONTHLY_TREND)?;
        let iter = stmt.query_map([], |row| {
            Ok(MonthBucket {
                month: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        let mut buckets = Vec::new();
        for bucket in iter {
            buckets.push(bucket?);
        }
        Ok(buckets)
    }

    /// (date, weight) pairs for one subject's weighed records, ascending by
    /// date. The subject must exist; a subject without weighed records
    /// yields an empty series.
    pub fn weight_history(&mut self, subject_id: i64) -> Result<Vec<WeightPoint>> {
        let exists: bool = self.conn.query_row(SUBJECT_EXISTS, params![subject_id], |row| row.get(0))?;
        if !exists {
            return Err(Error::NotFound(Message::SubjectNotFound(subject_id)));
        }
        let mut stmt = self.conn.prepare(WEIGHT_HISTORY)?;
        let iter = stmt.query_map(params![subject_id], |row| {
            Ok(WeightPoint {
                date: row.get(0)?,
                weight: row.get(1)?,
            })
        })?;
        let mut points = Vec::new();
        for point in iter {
            points.push(point?);
        }
        Ok(points)
    }

    fn count(&self, sql: &str) -> Result<i64> {
        Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
    }

    fn count_by_status(&self, status: &str) -> Result<i64> {
        Ok(self.conn.query_row(COUNT_SUBJECTS_BY_STATUS, params![status], |row| row.get(0))?)
    }

    fn count_since(&self, modifier: &str) -> Result<i64> {
        Ok(self.conn.query_row(COUNT_RECORDS_SINCE, params![modifier], |row| row.get(0))?)
    }

    fn distribution(&mut self, sql: &str) -> Result<Vec<DistributionSlice>> {
        let mut stmt = self.conn.prepare(sql)?;
        let iter = stmt.query_map([], |row| {
            Ok(DistributionSlice {
                value: row.get(0)?,
                count: row.get(1)?,
                percentage: row.get(2)?,
            })
        })?;
        let mut slices = Vec::new();
        for slice in iter {
            slices.push(slice?);
        }
        Ok(slices)
    }
}
