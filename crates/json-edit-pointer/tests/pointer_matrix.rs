use json_edit_pointer::{
    format_json_pointer, is_child, parent, parse_json_pointer, path, try_parse_json_pointer,
    JsonPointerError, PathStep,
};

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = [
        "",
        "/",
        "/foo",
        "/foo/bar",
        "/a~0b/c~1d",
        "/arr/0",
        "/~0/~1",
        "/New item 0",
    ];

    for pointer in cases {
        let path = parse_json_pointer(pointer);
        let out = format_json_pointer(&path);
        assert_eq!(out, pointer);
    }
}

#[test]
fn parsed_steps_match_built_indices() {
    let parsed = parse_json_pointer("/items/2");
    assert_eq!(parsed, path!["items", 2]);
    assert_eq!(parsed[1].as_index(), Some(2));
    assert!(!parsed[1].is_index());
}

#[test]
fn pointer_validation_and_relationships() {
    assert!(try_parse_json_pointer("/foo/bar").is_ok());
    assert!(try_parse_json_pointer("foo/bar").is_err());

    let p = parse_json_pointer("/foo/bar");
    let q = parse_json_pointer("/foo/bar/baz");
    assert!(is_child(&p, &q));
    assert!(!is_child(&q, &p));

    let parent_path = parent(&p).expect("has parent");
    assert_eq!(parent_path, vec![PathStep::Key("foo".to_string())]);
    assert_eq!(parent(&[]), Err(JsonPointerError::NoParent));
}
