//! End-to-end edit flows: synthesize a patch, encode it, apply it, and look
//! at the document and selection that come out.

use json_edit::json_patch::to_json_patch;
use json_edit::{
    apply_patch, parse_partial_json, remove_all, DocumentState, EditError, Entry, JsonValue,
    PatchSynthesizer, ReorderStrategy, Selection, SynthesizerOptions,
};
use json_edit_pointer::path;
use serde_json::{json, Value};

fn doc(value: Value) -> JsonValue {
    JsonValue::from(value)
}

fn keys(value: &JsonValue) -> Vec<String> {
    value.member_keys()
}

// ── Patch synthesis ───────────────────────────────────────────────────────

#[test]
fn append_entry_to_object() {
    let d = doc(json!({"a": 1}));
    let ops = PatchSynthesizer::new()
        .append(&d, &path![], &[Entry::new("z", JsonValue::from(1))])
        .unwrap();
    assert_eq!(
        to_json_patch(&ops),
        json!([{"op": "add", "path": "/z", "value": 1}])
    );
}

#[test]
fn replace_member_with_entry_of_same_name() {
    let d = doc(json!({"a": 1}));
    let ops = PatchSynthesizer::new()
        .replace(&d, &d, &[path!["a"]], &[Entry::new("a", JsonValue::from(2))])
        .unwrap();
    assert_eq!(
        to_json_patch(&ops),
        json!([
            {"op": "remove", "path": "/a"},
            {"op": "add", "path": "/a", "value": 2},
        ])
    );
}

#[test]
fn insert_before_keeps_member_order() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let ops = PatchSynthesizer::new()
        .insert_before(&d, &d, &path!["b"], &[Entry::new("x", JsonValue::Null)])
        .unwrap();
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(keys(&out), ["a", "x", "b", "c"]);
}

#[test]
fn insert_before_with_legacy_reordering_gives_same_document() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let legacy = PatchSynthesizer::new().with_options(SynthesizerOptions {
        reorder: ReorderStrategy::TrailingKeys,
        ..SynthesizerOptions::default()
    });
    let entries = [Entry::new("x", JsonValue::Null)];

    let legacy_ops = legacy.insert_before(&d, &d, &path!["a"], &entries).unwrap();
    let minimal_ops = PatchSynthesizer::new()
        .insert_before(&d, &d, &path!["a"], &entries)
        .unwrap();

    // x goes first, so every old key has to move either way
    assert_eq!(legacy_ops.len(), 4);
    assert_eq!(minimal_ops.len(), 4);
    let legacy_out = apply_patch(&d, &legacy_ops).unwrap();
    let minimal_out = apply_patch(&d, &minimal_ops).unwrap();
    assert_eq!(keys(&legacy_out), ["x", "a", "b", "c"]);
    assert_eq!(keys(&minimal_out), keys(&legacy_out));
}

#[test]
fn insert_before_follows_recorded_key_order() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let state = DocumentState::new(d.clone()).with_key_order(
        &path![],
        vec!["c".to_string(), "a".to_string(), "b".to_string()],
    );
    let ops = PatchSynthesizer::new()
        .insert_before(state.document(), &state, &path!["a"], &[Entry::new("x", JsonValue::Null)])
        .unwrap();
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(keys(&out), ["c", "x", "a", "b"]);
}

#[test]
fn duplicate_array_element() {
    let d = doc(json!(["a", "b", "c", "d"]));
    let ops = PatchSynthesizer::new().duplicate(&d, &d, &[path![2]]).unwrap();
    assert_eq!(
        to_json_patch(&ops),
        json!([{"op": "copy", "from": "/2", "path": "/3"}])
    );
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(Value::from(&out), json!(["a", "b", "c", "c", "d"]));
}

#[test]
fn duplicate_object_member_lands_next_to_original() {
    let d = doc(json!({"name": "x", "age": 3, "tags": []}));
    let ops = PatchSynthesizer::new().duplicate(&d, &d, &[path!["name"]]).unwrap();
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(keys(&out), ["name", "name (copy)", "age", "tags"]);
    assert_eq!(Value::from(&out)["name (copy)"], json!("x"));
}

#[test]
fn remove_all_goes_from_last_to_first() {
    let ops = remove_all(&[path![0], path![1], path![2]]);
    assert_eq!(
        to_json_patch(&ops),
        json!([
            {"op": "remove", "path": "/2"},
            {"op": "remove", "path": "/1"},
            {"op": "remove", "path": "/0"},
        ])
    );
    let d = doc(json!([1, 2, 3, 4]));
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(Value::from(&out), json!([4]));
}

#[test]
fn rename_keeps_position() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let ops = PatchSynthesizer::new().rename(&path![], &keys(&d), "a", "first");
    let out = apply_patch(&d, &ops).unwrap();
    assert_eq!(keys(&out), ["first", "b", "c"]);
    assert_eq!(Value::from(&out)["first"], json!(1));
}

#[test]
fn synthesis_is_deterministic() {
    let d = doc(json!({"a": 1, "b": {"c": [1, 2]}, "d": null}));
    let synth = PatchSynthesizer::new();
    let entries = [Entry::new("b", JsonValue::from(1)), Entry::new("e", JsonValue::Null)];
    let first = synth.replace(&d, &d, &[path!["a"], path!["d"]], &entries).unwrap();
    let second = synth.replace(&d, &d, &[path!["a"], path!["d"]], &entries).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unsupported_selection_produces_no_patch() {
    let d = doc(json!({"a": 1}));
    let err = PatchSynthesizer::new()
        .insert(&d, &d, &Selection::Key(path!["a"]), &[Entry::value(JsonValue::Null)])
        .unwrap_err();
    assert_eq!(err, EditError::UnsupportedSelection);
}

// ── Paste ─────────────────────────────────────────────────────────────────

#[test]
fn parse_partial_json_examples() {
    assert_eq!(Value::from(&parse_partial_json(r#"{"a":1,"#).unwrap()), json!({"a": 1}));
    assert_eq!(Value::from(&parse_partial_json("1,2,3").unwrap()), json!([1, 2, 3]));
    assert_eq!(parse_partial_json("not json"), Err(EditError::ClipboardParse));
}

#[test]
fn paste_over_value_replaces_it() {
    let d = doc(json!({"a": 1, "b": 2}));
    let selection = Selection::Value(path!["a"]);
    let result = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &selection, "[true, false]")
        .unwrap();
    assert_eq!(
        to_json_patch(&result.operations),
        json!([{"op": "replace", "path": "/a", "value": [true, false]}])
    );
    assert_eq!(result.selection, selection);
}

#[test]
fn paste_members_before_key() {
    let d = doc(json!({"a": 1, "b": 2}));
    let result = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &Selection::Before(path!["b"]), r#""a": 10, "n": 20,"#)
        .unwrap();
    let out = apply_patch(&d, &result.operations).unwrap();
    assert_eq!(keys(&out), ["a", "a (copy)", "n", "b"]);
    assert_eq!(
        result.selection,
        Selection::Multi(vec![path!["a (copy)"], path!["n"]])
    );
}

#[test]
fn paste_list_into_array() {
    let d = doc(json!({"list": [1, 4]}));
    let result = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &Selection::Before(path!["list", 1]), "2, 3")
        .unwrap();
    let out = apply_patch(&d, &result.operations).unwrap();
    assert_eq!(Value::from(&out), json!({"list": [1, 2, 3, 4]}));
    assert_eq!(
        result.selection,
        Selection::Multi(vec![path!["list", 1], path!["list", 2]])
    );
}

#[test]
fn paste_scalar_onto_key_renames_it() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let result = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &Selection::Key(path!["b"]), r#""c""#)
        .unwrap();
    let out = apply_patch(&d, &result.operations).unwrap();
    assert_eq!(keys(&out), ["a", "c (copy)", "c"]);
    assert_eq!(Value::from(&out)["c (copy)"], json!(2));
    assert_eq!(result.selection, Selection::Key(path!["c (copy)"]));
}

#[test]
fn paste_object_onto_key_replaces_member() {
    let d = doc(json!({"a": 1, "b": 2, "c": 3}));
    let result = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &Selection::Key(path!["b"]), r#"{"x": 1, "y": 2}"#)
        .unwrap();
    let out = apply_patch(&d, &result.operations).unwrap();
    assert_eq!(keys(&out), ["a", "x", "y", "c"]);
    assert_eq!(
        result.selection,
        Selection::Multi(vec![path!["x"], path!["y"]])
    );
}

#[test]
fn paste_of_unparseable_text_fails_without_patch() {
    let d = doc(json!({"a": 1}));
    let err = PatchSynthesizer::new()
        .create_paste_operations(&d, &d, &Selection::Append(path![]), "not json")
        .unwrap_err();
    assert_eq!(err, EditError::ClipboardParse);
}
