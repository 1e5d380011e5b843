/*!
 * JSON serialization tests for results, options and diffs
 */

use scriptbreak::{
    DiffKind, PanelSnapshot, ParseOptions, ParseResult, ReparseEngine, ScriptFormat,
};

use crate::common::parse_comic;

/// Test a full parse result surviving a JSON round trip
#[test]
fn test_serialization_parseResult_shouldRoundTripThroughJson() {
    let result = parse_comic();
    let json = serde_json::to_string_pretty(&result).unwrap();
    let back: ParseResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

/// Test the serialized shape consumed by embedding applications
#[test]
fn test_serialization_parseResult_shouldUseExpectedFieldNames() {
    let result = parse_comic();
    let value: serde_json::Value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["success"], serde_json::json!(true));
    assert_eq!(value["pages"][0]["page_number"], serde_json::json!(1));
    assert_eq!(
        value["pages"][0]["panels"][0]["panel_number"],
        serde_json::json!(1)
    );
    assert_eq!(
        value["pages"][0]["panels"][0]["dialogue"][0]["character"],
        serde_json::json!("SARAH")
    );
    assert_eq!(
        value["pages"][0]["panels"][0]["dialogue"][0]["kind"],
        serde_json::json!("spoken")
    );
    assert_eq!(
        value["pages"][0]["panels"][0]["aspect_ratio"],
        serde_json::json!("wide")
    );
    assert_eq!(value["characters"][0]["name"], serde_json::json!("SARAH"));
}

/// Test options deserializing from partial JSON with defaults filled in
#[test]
fn test_serialization_parseOptions_shouldFillDefaultsFromPartialJson() {
    let options: ParseOptions = serde_json::from_str(r#"{"format":"tvscript"}"#).unwrap();
    assert_eq!(options.format, Some(ScriptFormat::TvScript));
    assert!(options.warn_duplicate_panels);
    assert!(options.implicit_panels);

    let json = serde_json::to_string(&ParseOptions::default()).unwrap();
    let back: ParseOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ParseOptions::default());
}

/// Test diff lists serializing with lowercase kinds and skipped absents
#[test]
fn test_serialization_panelDiffs_shouldSkipAbsentSnapshots() {
    let engine = ReparseEngine::new(ParseOptions::for_format(ScriptFormat::Comic));
    let existing = vec![PanelSnapshot::new(2, 1, "gone")];
    let diffs = engine
        .reparse("PAGE 1\nPanel 1\nA new opening.", &existing)
        .unwrap();

    let value: serde_json::Value = serde_json::to_value(&diffs).unwrap();
    let added = value
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["kind"] == serde_json::json!("added"))
        .unwrap();
    assert!(added.get("before").is_none());
    assert!(added.get("after").is_some());

    let removed = value
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["kind"] == serde_json::json!("removed"))
        .unwrap();
    assert!(removed.get("after").is_none());
    assert_eq!(removed["before"]["description"], serde_json::json!("gone"));

    let back: Vec<scriptbreak::PanelDiff> = serde_json::from_value(value).unwrap();
    assert_eq!(back, diffs);
    assert_eq!(back[0].kind, DiffKind::Added);
}
