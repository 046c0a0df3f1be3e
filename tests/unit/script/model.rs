use super::*;

#[test]
fn title_line_is_dropped_and_lines_are_capped() {
    assert_eq!(
        slide_lines_from_content("Title\nLine one\nLine two"),
        vec!["Line one", "Line two"]
    );
    assert_eq!(
        slide_lines_from_content("T\na\nb\nc\nd\ne\nf"),
        vec!["a", "b", "c", "d"]
    );
    assert!(slide_lines_from_content("Only a title").is_empty());
    assert!(slide_lines_from_content("").is_empty());
}

#[test]
fn lines_are_kept_verbatim() {
    assert_eq!(
        slide_lines_from_content("T\n- keep the dash\n\n  indented"),
        vec!["- keep the dash", "", "  indented"]
    );
}

#[test]
fn entries_sort_stably_by_timestamp() {
    let script = Script::from_json_str(
        r#"{
            "entries": [
                { "timestamp": "0_10", "explanation": "b" },
                { "timestamp": "0_00", "explanation": "a" },
                { "timestamp": "0:10", "explanation": "c" }
            ]
        }"#,
    )
    .unwrap();
    let order: Vec<(&str, usize)> = script
        .entries
        .iter()
        .map(|e| (e.explanation.as_str(), e.index))
        .collect();
    assert_eq!(order, vec![("a", 1), ("b", 0), ("c", 2)]);
    assert_eq!(script.timestamps(), vec![0.0, 10.0, 10.0]);
    assert_eq!(script.first_timestamp(), 0.0);
}

#[test]
fn missing_fields_default() {
    let script = Script::from_json_str(r#"{ "entries": [ {} ] }"#).unwrap();
    let e = &script.entries[0];
    assert_eq!(e.timestamp, 0.0);
    assert_eq!(e.explanation, "");
    assert!(e.slide_lines.is_empty());
    assert_eq!(e.slide_number(), 1);
    assert!(script.mp3.is_none());
}

#[test]
fn null_fields_default() {
    let script = Script::from_json_str(
        r#"{ "mp3": null, "entries": [ { "timestamp": null, "explanation": null, "slide_content": null } ] }"#,
    )
    .unwrap();
    let e = &script.entries[0];
    assert_eq!(e.timestamp, 0.0);
    assert_eq!(e.explanation, "");
    assert!(e.slide_lines.is_empty());
    assert!(script.mp3.is_none());
}

#[test]
fn empty_entries_are_input_missing() {
    let err = Script::from_json_str(r#"{ "mp3": "a.mp3", "entries": [] }"#).unwrap_err();
    assert!(err.is_input_missing());
    let err = Script::from_json_str(r#"{}"#).unwrap_err();
    assert!(err.is_input_missing());
}

#[test]
fn blank_mp3_is_treated_as_absent() {
    let script =
        Script::from_json_str(r#"{ "mp3": "  ", "entries": [ { "timestamp": "0_01" } ] }"#)
            .unwrap();
    assert!(script.mp3.is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Script::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SlidecastError::Serde(_)));
}

#[test]
fn missing_file_is_input_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = Script::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_input_missing());
}
