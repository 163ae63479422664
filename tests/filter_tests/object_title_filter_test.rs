extern crate problem_clean;
use problem_clean::filters::{has_object_title_in_test_cases, ObjectTitleFilter, ProblemFilter, RemovalReason, Verdict};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn with_test_cases(test_cases: Value) -> Value {
        json!({
            "title": "T",
            "lastVersion": {"data": {"testCases": test_cases}}
        })
    }

    #[test]
    fn test_object_title_matches() {
        let record = with_test_cases(json!([{"title": {"nested": "x"}}]));
        assert!(has_object_title_in_test_cases(&record));
    }

    #[test]
    fn test_text_title_does_not_match() {
        let record = with_test_cases(json!([{"title": "normal"}]));
        assert!(!has_object_title_in_test_cases(&record));
    }

    #[test]
    fn test_later_object_title_matches() {
        let record = with_test_cases(json!([{"title": "ok"}, {"title": {"x": 1}}]));
        assert!(has_object_title_in_test_cases(&record));
    }

    #[test]
    fn test_non_object_test_cases_skipped() {
        let record = with_test_cases(json!(["loose string", 3, null, [{"title": {}}], {"title": "fine"}]));
        assert!(!has_object_title_in_test_cases(&record));

        let record = with_test_cases(json!(["loose string", {"title": {}}]));
        assert!(has_object_title_in_test_cases(&record));
    }

    #[test]
    fn test_other_title_types_do_not_match() {
        let record = with_test_cases(json!([{"title": ["a"]}, {"title": 5}, {"title": null}, {}]));
        assert!(!has_object_title_in_test_cases(&record));
    }

    #[test]
    fn test_missing_structure_is_permissive() {
        let records = vec![
            json!({"title": "T"}),
            json!({"title": "T", "lastVersion": "v2"}),
            json!({"title": "T", "lastVersion": {}}),
            json!({"title": "T", "lastVersion": {"data": null}}),
            json!({"title": "T", "lastVersion": {"data": {}}}),
            json!({"title": "T", "lastVersion": {"data": {"testCases": {"title": {"x": 1}}}}}),
            json!([1, 2, 3]),
            json!("not a problem"),
        ];
        for record in records {
            assert!(!has_object_title_in_test_cases(&record), "{}", record);
        }
    }

    #[test]
    fn test_empty_test_cases() {
        assert!(!has_object_title_in_test_cases(&with_test_cases(json!([]))));
    }

    #[test]
    fn test_filter_verdicts() {
        let filter = ObjectTitleFilter;
        let mut notes = Vec::new();

        let removed = json!({"title": "T", "lastVersion": {"data": {"testCases": [{"title": "ok"}, {"title": {"x": 1}}]}}});
        assert_eq!(filter.classify(0, &removed, &mut notes), Verdict::Remove(RemovalReason::ObjectTitle));

        let kept = json!({"title": "T"});
        assert_eq!(filter.classify(1, &kept, &mut notes), Verdict::Keep);

        let malformed = json!(42);
        assert_eq!(filter.classify(2, &malformed, &mut notes), Verdict::Keep);

        assert!(notes.is_empty());
    }
}
