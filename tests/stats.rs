#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vivarium::db::records::Records;
    use vivarium::db::stats::Stats;
    use vivarium::db::subjects::Subjects;
    use vivarium::libs::error::Error;
    use vivarium::libs::record::RecordInput;
    use vivarium::libs::subject::{SubjectInput, SubjectStatus};

    struct StatsTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("vivarium.db");
            StatsTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    fn create_subject(db_path: &PathBuf, code: &str, strain: &str, gender: &str, status: Option<SubjectStatus>) -> i64 {
        let input = SubjectInput {
            code: code.to_string(),
            strain: strain.to_string(),
            gender: gender.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            status,
            ..Default::default()
        };
        Subjects::new(db_path).unwrap().create(&input).unwrap()
    }

    fn create_record(db_path: &PathBuf, subject_id: i64, date: NaiveDate, kind: &str, weight: Option<f64>) -> i64 {
        let input = RecordInput {
            subject_id: Some(subject_id),
            date: Some(date),
            kind: kind.to_string(),
            weight,
            ..Default::default()
        };
        Records::new(db_path).unwrap().create(&input).unwrap()
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_overview_counts(ctx: &mut StatsTestContext) {
        let a = create_subject(&ctx.db_path, "M001", "C57BL/6", "F", None);
        create_subject(&ctx.db_path, "M002", "C57BL/6", "M", Some(SubjectStatus::Deceased));
        create_subject(&ctx.db_path, "M003", "BALB/c", "F", Some(SubjectStatus::Retired));

        let today = Local::now().date_naive();
        create_record(&ctx.db_path, a, today, "weighing", Some(20.0));
        create_record(&ctx.db_path, a, today - Duration::days(3), "behavior", None);
        create_record(&ctx.db_path, a, today - Duration::days(20), "medication", None);
        create_record(&ctx.db_path, a, today - Duration::days(60), "weighing", Some(18.0));

        let overview = Stats::new(&ctx.db_path).unwrap().overview().unwrap();
        assert_eq!(overview.total_subjects, 3);
        assert_eq!(overview.alive_subjects, 1);
        assert_eq!(overview.deceased_subjects, 1);
        assert_eq!(overview.retired_subjects, 1);
        assert_eq!(overview.today_records, 1);
        assert_eq!(overview.week_records, 2);
        assert_eq!(overview.month_records, 3);
        assert_eq!(overview.month_new_subjects, 3);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_distribution_percentages_sum_to_hundred(ctx: &mut StatsTestContext) {
        for (i, strain) in ["C57BL/6", "C57BL/6", "C57BL/6", "BALB/c"].iter().enumerate() {
            create_subject(&ctx.db_path, &format!("M{:03}", i + 1), strain, if i % 2 == 0 { "F" } else { "M" }, None);
        }

        let mut stats = Stats::new(&ctx.db_path).unwrap();
        let strains = stats.strain_distribution().unwrap();
        assert_eq!(strains.len(), 2);
        // Descending by count.
        assert_eq!(strains[0].value, "C57BL/6");
        assert_eq!(strains[0].count, 3);
        assert_eq!(strains[0].percentage, 75.0);
        assert_eq!(strains[1].percentage, 25.0);
        let sum: f64 = strains.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.2);

        let genders = stats.gender_distribution().unwrap();
        let sum: f64 = genders.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.2);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_distributions_empty_without_subjects(ctx: &mut StatsTestContext) {
        let mut stats = Stats::new(&ctx.db_path).unwrap();
        assert!(stats.strain_distribution().unwrap().is_empty());
        assert!(stats.gender_distribution().unwrap().is_empty());
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_kind_distribution_descending(ctx: &mut StatsTestContext) {
        let id = create_subject(&ctx.db_path, "M001", "C57BL/6", "F", None);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        create_record(&ctx.db_path, id, date, "weighing", Some(20.0));
        create_record(&ctx.db_path, id, date, "weighing", Some(20.5));
        create_record(&ctx.db_path, id, date, "behavior", None);

        let counts = Stats::new(&ctx.db_path).unwrap().kind_distribution().unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].kind, "weighing");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].kind, "behavior");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_monthly_trend_covers_recent_months_only(ctx: &mut StatsTestContext) {
        let id = create_subject(&ctx.db_path, "M001", "C57BL/6", "F", None);
        let today = Local::now().date_naive();
        create_record(&ctx.db_path, id, today, "weighing", Some(20.0));
        create_record(&ctx.db_path, id, today, "behavior", None);
        // Well outside the six-month window.
        create_record(&ctx.db_path, id, today - Duration::days(300), "weighing", Some(17.0));

        let buckets = Stats::new(&ctx.db_path).unwrap().monthly_trend().unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, today.format("%Y-%m").to_string());
        assert_eq!(buckets[0].count, 2);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_weight_history_scenario(ctx: &mut StatsTestContext) {
        let id = create_subject(&ctx.db_path, "M001", "C57BL/6", "F", None);
        create_record(&ctx.db_path, id, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "weighing", Some(20.1));
        create_record(&ctx.db_path, id, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), "weighing", Some(21.3));
        // Unweighed records do not appear in the series.
        create_record(&ctx.db_path, id, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), "behavior", None);

        let mut stats = Stats::new(&ctx.db_path).unwrap();
        let points = stats.weight_history(id).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(points[0].weight, 20.1);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(points[1].weight, 21.3);

        // After deleting the subject the series query reports NotFound.
        Subjects::new(&ctx.db_path).unwrap().delete(id).unwrap();
        let err = stats.weight_history(id).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_weight_history_empty_without_weighings(ctx: &mut StatsTestContext) {
        let id = create_subject(&ctx.db_path, "M001", "C57BL/6", "F", None);
        create_record(&ctx.db_path, id, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "behavior", None);

        let points = Stats::new(&ctx.db_path).unwrap().weight_history(id).unwrap();
        assert!(points.is_empty());
    }
}
