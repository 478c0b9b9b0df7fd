#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vivarium::db::records::Records;
    use vivarium::db::subjects::Subjects;
    use vivarium::libs::error::Error;
    use vivarium::libs::record::RecordInput;
    use vivarium::libs::subject::{SubjectInput, SubjectStatus};

    struct SubjectTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for SubjectTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("vivarium.db");
            SubjectTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    fn subject_input(code: &str) -> SubjectInput {
        SubjectInput {
            code: code.to_string(),
            strain: "C57BL/6".to_string(),
            gender: "F".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        }
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_create_and_get(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();

        let id = subjects.create(&subject_input("M001")).unwrap();
        let subject = subjects.get(id).unwrap();

        assert_eq!(subject.code, "M001");
        assert_eq!(subject.strain, "C57BL/6");
        assert_eq!(subject.gender, "F");
        assert_eq!(subject.birth_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        // Status defaults to alive when not provided.
        assert_eq!(subject.status, SubjectStatus::Alive);
        assert!(subject.created_at.is_some());
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_duplicate_code_is_conflict(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();

        subjects.create(&subject_input("M001")).unwrap();
        let err = subjects.create(&subject_input("M001")).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // A unique code still succeeds afterwards.
        let id = subjects.create(&subject_input("M002")).unwrap();
        assert_eq!(subjects.get(id).unwrap().code, "M002");
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_missing_fields_fail_validation(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();

        let input = SubjectInput {
            code: "M001".to_string(),
            ..Default::default()
        };
        let err = subjects.create(&input).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_update_replaces_record(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let id = subjects.create(&subject_input("M001")).unwrap();

        let mut input = subject_input("M001");
        input.cage_number = Some("A-12".to_string());
        input.status = Some(SubjectStatus::Retired);
        subjects.update(id, &input).unwrap();

        let subject = subjects.get(id).unwrap();
        assert_eq!(subject.cage_number.as_deref(), Some("A-12"));
        assert_eq!(subject.status, SubjectStatus::Retired);
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_update_missing_is_not_found(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let err = subjects.update(9999, &subject_input("M001")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_update_to_taken_code_is_conflict(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        subjects.create(&subject_input("M001")).unwrap();
        let id = subjects.create(&subject_input("M002")).unwrap();

        let err = subjects.update(id, &subject_input("M001")).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_delete_missing_is_not_found(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let err = subjects.delete(42).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test_context(SubjectTestContext)]
    #[test]
    fn test_delete_cascades_to_records(ctx: &mut SubjectTestContext) {
        let mut subjects = Subjects::new(&ctx.db_path).unwrap();
        let mut records = Records::new(&ctx.db_path).unwrap();

        let subject_id = subjects.create(&subject_input("M001")).unwrap();
        let mut record_ids = Vec::new();
        for date in ["2024-03-01", "2024-04-01"] {
            let input = RecordInput {
                subject_id: Some(subject_id),
                date: Some(date.parse().unwrap()),
                kind: "weighing".to_string(),
                ..Default::default()
            };
            record_ids.push(records.create(&input).unwrap());
        }

        subjects.delete(subject_id).unwrap();

        assert!(matches!(subjects.get(subject_id).unwrap_err(), Error::NotFound(_)));
        for record_id in record_ids {
            assert!(matches!(records.get(record_id).unwrap_err(), Error::NotFound(_)));
        }
    }
}
