use crate::db::stats::{DistributionSlice, KindCount, MonthBucket, Overview, WeightPoint};
use crate::libs::export::format_medications;
use crate::libs::record::Record;
use crate::libs::subject::Subject;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn subjects(subjects: &[Subject]) {
        let mut table = Table::new();
        table.add_row(row!["ID", "CODE", "STRAIN", "GENDER", "BIRTH DATE", "CAGE", "STATUS"]);
        for subject in subjects {
            table.add_row(row![
                subject.id,
                subject.code,
                subject.strain,
                subject.gender,
                subject.birth_date,
                subject.cage_number.as_deref().unwrap_or("-"),
                subject.status
            ]);
        }
        table.printstd();
    }

    pub fn records(records: &[Record]) {
        let mut table = Table::new();
        table.add_row(row!["ID", "DATE", "SUBJECT", "TYPE", "WEIGHT", "TEMP", "MEDICATIONS", "OPERATOR"]);
        for record in records {
            table.add_row(row![
                record.id,
                record.date,
                record.subject_code.as_deref().unwrap_or("-"),
                record.kind,
                record.weight.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
                record.temperature.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
                format_medications(&record.medications),
                record.operator.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();
    }

    pub fn overview(overview: &Overview) {
        let mut table = Table::new();
        table.add_row(row!["Total subjects", overview.total_subjects]);
        table.add_row(row!["Alive", overview.alive_subjects]);
        table.add_row(row!["Deceased", overview.deceased_subjects]);
        table.add_row(row!["Retired", overview.retired_subjects]);
        table.add_row(row!["Records today", overview.today_records]);
        table.add_row(row!["Records last 7 days", overview.week_records]);
        table.add_row(row!["Records last 30 days", overview.month_records]);
        table.add_row(row!["New subjects last 30 days", overview.month_new_subjects]);
        table.printstd();
    }

    pub fn distribution(slices: &[DistributionSlice]) {
        let mut table = Table::new();
        table.add_row(row!["VALUE", "COUNT", "%"]);
        for slice in slices {
            table.add_row(row![slice.value, slice.count, format!("{:.1}", slice.percentage)]);
        }
        table.printstd();
    }

    pub fn kinds(counts: &[KindCount]) {
        let mut table = Table::new();
        table.add_row(row!["TYPE", "COUNT"]);
        for count in counts {
            table.add_row(row![count.kind, count.count]);
        }
        table.printstd();
    }

    pub fn trend(buckets: &[MonthBucket]) {
        let mut table = Table::new();
        table.add_row(row!["MONTH", "COUNT"]);
        for bucket in buckets {
            table.add_row(row![bucket.month, bucket.count]);
        }
        table.printstd();
    }

    pub fn weights(points: &[WeightPoint]) {
        let mut table = Table::new();
        table.add_row(row!["DATE", "WEIGHT (g)"]);
        for point in points {
            table.add_row(row![point.date, point.weight]);
        }
        table.printstd();
    }
}
