extern crate problem_clean;
use problem_clean::io::{load_records, write_records, LoadError};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("problems.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_array() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, r#"[{"title": "A"}, 3, "x"]"#);
        let records = load_records(&path).unwrap();
        assert_eq!(records, vec![json!({"title": "A"}), json!(3), json!("x")]);
    }

    #[test]
    fn test_load_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "[]");
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_records(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, r#"[{"title": "A",]"#);
        let result = load_records(&path);
        assert!(matches!(result, Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_top_level_not_array() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, r#"{"problems": []}"#);
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray(_)));
        assert!(err.to_string().contains("list of problems"));
    }

    #[test]
    fn test_write_then_load_keeps_order_and_keys() {
        let dir = TempDir::new().unwrap();
        let input = r#"[{"zeta": 1, "alpha": {"y": 2, "b": 3}}, {"title": "Ωmega"}]"#;
        let records: Vec<Value> = serde_json::from_str(input).unwrap();
        let output = dir.path().join("out.json");
        write_records(&records, &output, false).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.find("zeta").unwrap() < written.find("alpha").unwrap());
        assert!(written.find("\"y\"").unwrap() < written.find("\"b\"").unwrap());
        assert!(written.contains("Ωmega"));
        assert_eq!(load_records(&output).unwrap(), records);
    }
}
