#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vivarium::db::records::Records;
    use vivarium::db::subjects::Subjects;
    use vivarium::libs::pagination::PageRequest;
    use vivarium::libs::record::{RecordFilter, RecordInput};
    use vivarium::libs::subject::{SubjectFilter, SubjectInput};

    struct FilterTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for FilterTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("vivarium.db");
            FilterTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    fn seed_subjects(db_path: &PathBuf, count: usize) -> Vec<i64> {
        let mut subjects = Subjects::new(db_path).unwrap();
        (1..=count)
            .map(|i| {
                let input = SubjectInput {
                    code: format!("M{:03}", i),
                    strain: if i % 2 == 0 { "C57BL/6" } else { "BALB/c" }.to_string(),
                    gender: if i % 2 == 0 { "F" } else { "M" }.to_string(),
                    birth_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    ..Default::default()
                };
                subjects.create(&input).unwrap()
            })
            .collect()
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_empty_filter_matches_everything(ctx: &mut FilterTestContext) {
        seed_subjects(&ctx.db_path, 7);
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();

        let all = subjects.fetch_page(&SubjectFilter::default(), PageRequest::new(None, Some(100))).unwrap();
        assert_eq!(all.pagination.total, 7);
        assert_eq!(all.data.len(), 7);

        // Blank criteria behave exactly like absent ones.
        let blank = SubjectFilter {
            search: Some("".to_string()),
            status: Some("".to_string()),
            gender: None,
            strain: None,
        };
        let filtered = subjects.fetch_page(&blank, PageRequest::new(None, Some(100))).unwrap();
        assert_eq!(filtered.pagination.total, 7);
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_pages_partition_the_result_set(ctx: &mut FilterTestContext) {
        let ids: HashSet<i64> = seed_subjects(&ctx.db_path, 25).into_iter().collect();
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let filter = SubjectFilter::default();

        let mut seen = HashSet::new();
        for page in 1..=3 {
            let result = subjects.fetch_page(&filter, PageRequest::new(Some(page), Some(10))).unwrap();
            assert_eq!(result.pagination.total, 25);
            assert_eq!(result.pagination.total_pages, 3);
            assert_eq!(result.data.len(), if page < 3 { 10 } else { 5 });
            for subject in result.data {
                // No overlap between pages.
                assert!(seen.insert(subject.id));
            }
        }
        // No gaps: the pages together cover every row.
        assert_eq!(seen, ids);

        // A page past the end is an empty result, not an error.
        let past_end = subjects.fetch_page(&filter, PageRequest::new(Some(4), Some(10))).unwrap();
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.pagination.total, 25);
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_total_pages_zero_when_empty(ctx: &mut FilterTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let result = subjects.fetch_page(&SubjectFilter::default(), PageRequest::default()).unwrap();
        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.total_pages, 0);
        assert!(result.data.is_empty());
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_subject_filters(ctx: &mut FilterTestContext) {
        seed_subjects(&ctx.db_path, 10);
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();

        // Search matches by code substring.
        let filter = SubjectFilter {
            search: Some("M00".to_string()),
            ..Default::default()
        };
        let result = subjects.fetch_page(&filter, PageRequest::new(None, Some(100))).unwrap();
        assert_eq!(result.pagination.total, 9); // M001..M009

        // Categorical filters combine with AND.
        let filter = SubjectFilter {
            strain: Some("C57BL/6".to_string()),
            gender: Some("F".to_string()),
            ..Default::default()
        };
        let result = subjects.fetch_page(&filter, PageRequest::new(None, Some(100))).unwrap();
        assert_eq!(result.pagination.total, 5);

        // An unknown status value is not a vocabulary member: no filter.
        let filter = SubjectFilter {
            status: Some("cryostasis".to_string()),
            ..Default::default()
        };
        let result = subjects.fetch_page(&filter, PageRequest::new(None, Some(100))).unwrap();
        assert_eq!(result.pagination.total, 10);
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_record_date_range_is_inclusive(ctx: &mut FilterTestContext) {
        let subject_ids = seed_subjects(&ctx.db_path, 1);
        let mut records = Records::new(&ctx.db_path).unwrap();
        for date in ["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04"] {
            let input = RecordInput {
                subject_id: Some(subject_ids[0]),
                date: Some(date.parse().unwrap()),
                kind: "weighing".to_string(),
                ..Default::default()
            };
            records.create(&input).unwrap();
        }

        let filter = RecordFilter {
            start_date: Some("2024-05-02".parse().unwrap()),
            end_date: Some("2024-05-03".parse().unwrap()),
            ..Default::default()
        };
        let result = records.fetch_page(&filter, PageRequest::default()).unwrap();
        assert_eq!(result.pagination.total, 2);
        let dates: Vec<String> = result.data.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-03", "2024-05-02"]);

        // Each bound works on its own.
        let filter = RecordFilter {
            start_date: Some("2024-05-03".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(records.fetch_page(&filter, PageRequest::default()).unwrap().pagination.total, 2);
    }

    #[test_context(FilterTestContext)]
    #[test]
    fn test_record_search_and_type_filters(ctx: &mut FilterTestContext) {
        let subject_ids = seed_subjects(&ctx.db_path, 2);
        let mut records = Records::new(&ctx.db_path).unwrap();

        let mut input = RecordInput {
            subject_id: Some(subject_ids[0]),
            date: Some("2024-05-01".parse().unwrap()),
            kind: "weighing".to_string(),
            operator: Some("Chen".to_string()),
            ..Default::default()
        };
        records.create(&input).unwrap();
        input.subject_id = Some(subject_ids[1]);
        input.kind = "behavior".to_string();
        input.operator = Some("Novak".to_string());
        records.create(&input).unwrap();

        // Search spans subject code and operator.
        let filter = RecordFilter {
            search: Some("novak".to_string()),
            ..Default::default()
        };
        assert_eq!(records.fetch_page(&filter, PageRequest::default()).unwrap().pagination.total, 1);

        let filter = RecordFilter {
            search: Some("M001".to_string()),
            ..Default::default()
        };
        assert_eq!(records.fetch_page(&filter, PageRequest::default()).unwrap().pagination.total, 1);

        let filter = RecordFilter {
            kind: Some("behavior".to_string()),
            ..Default::default()
        };
        let result = records.fetch_page(&filter, PageRequest::default()).unwrap();
        assert_eq!(result.pagination.total, 1);
        assert_eq!(result.data[0].kind, "behavior");

        let filter = RecordFilter {
            subject_id: Some(subject_ids[0]),
            ..Default::default()
        };
        assert_eq!(records.fetch_page(&filter, PageRequest::default()).unwrap().pagination.total, 1);
    }
}
