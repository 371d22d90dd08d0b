use tridoc::{Doc, PathExpr};

/// A small storefront document exercised by every query test.
fn store() -> Doc {
    Doc::parse(
        r#"{
            "name": "corner-shop",
            "tags": ["quiet", "cheap"],
            "store": {
                "books": [
                    {"title": "Dune", "price": 9},
                    {"title": "Emma", "price": 12}
                ],
                "empty": []
            }
        }"#,
    )
}

/// Compact text of a document that must be set.
fn compact(doc: &Doc) -> String {
    doc.serialize_compact().expect("document should be set")
}

// ============================================================================
// Tri-state short-circuit
// ============================================================================

#[test]
fn read_with_unset_document_is_unset() {
    assert!(Doc::unset().read(&PathExpr::parse(".a")).is_none());
}

#[test]
fn read_with_unset_path_is_unset() {
    assert!(store().read(&PathExpr::unset()).is_none());
}

// ============================================================================
// Singular paths
// ============================================================================

#[test]
fn read_root_returns_whole_document() {
    let doc = store();
    let found = doc.read(&PathExpr::root()).expect("set operands").unwrap();
    assert_eq!(found.structural_eq(&doc), Some(true));
}

#[test]
fn read_nested_member() {
    let found = store()
        .read(&PathExpr::parse(".store.books[1].title"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#""Emma""#);
}

#[test]
fn read_negative_index_counts_from_the_end() {
    let found = store()
        .read(&PathExpr::parse(".tags[-1]"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#""cheap""#);
}

#[test]
fn read_returns_a_copy_not_a_view() {
    let doc = store();
    let mut found = doc.read(&PathExpr::parse(".name")).expect("set operands").unwrap();
    found.copy_from(&Doc::from("renamed"));
    assert_eq!(compact(&doc.get("name")), r#""corner-shop""#);
}

// ============================================================================
// Structural misses — the error side
// ============================================================================

#[test]
fn out_of_range_index_is_an_error_naming_the_path() {
    let result = store()
        .read(&PathExpr::parse(".tags[999]"))
        .expect("set operands");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("tags[999]"), "message: {err}");
    assert_eq!(err.path(), "$?.tags[999]");
}

#[test]
fn indexing_a_scalar_is_an_error() {
    let result = store()
        .read(&PathExpr::parse(".name[0]"))
        .expect("set operands");
    assert!(result.unwrap_err().to_string().contains("name[0]"));
}

#[test]
fn missing_key_is_an_error() {
    let result = store()
        .read(&PathExpr::parse(".store.cds"))
        .expect("set operands");
    assert!(result.unwrap_err().to_string().contains("$?.store.cds"));
}

#[test]
fn error_side_supports_default_substitution() {
    let fallback = Doc::from("none");
    let found = store()
        .read(&PathExpr::parse(".missing"))
        .expect("set operands")
        .unwrap_or(fallback);
    assert_eq!(compact(&found), r#""none""#);
}

// ============================================================================
// Non-singular paths — wildcard, slice, filter, descent
// ============================================================================

#[test]
fn wildcard_collects_every_element() {
    let found = store()
        .read(&PathExpr::parse(".tags[*]"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#"["quiet","cheap"]"#);
}

#[test]
fn wildcard_over_empty_array_is_degenerate_not_failing() {
    let found = store()
        .read(&PathExpr::parse(".store.empty[*]"))
        .expect("set operands")
        .unwrap();
    assert!(found.is_set());
    assert_eq!(found.array_length(), Some(0));
}

#[test]
fn slice_collects_the_window() {
    let found = store()
        .read(&PathExpr::parse(".tags[0:1]"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#"["quiet"]"#);
}

#[test]
fn filter_selects_matching_elements() {
    let found = store()
        .read(&PathExpr::parse(".store.books[?(@.price < 10)]"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#"[{"title":"Dune","price":9}]"#);
}

#[test]
fn recursive_descent_collects_in_document_order() {
    let found = store()
        .read(&PathExpr::parse("..title"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), r#"["Dune","Emma"]"#);
}

#[test]
fn dashed_key_reads_like_any_other_identifier() {
    let doc = Doc::parse(r#"{"foo-bar": 7}"#);
    let found = doc
        .read(&PathExpr::parse(".foo-bar"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), "7");
}

#[test]
fn quoted_key_addresses_awkward_names() {
    let doc = Doc::parse(r#"{"key with spaces": 1}"#);
    let found = doc
        .read(&PathExpr::parse("['key with spaces']"))
        .expect("set operands")
        .unwrap();
    assert_eq!(compact(&found), "1");
}

// ============================================================================
// Composed paths read the same as parsed ones
// ============================================================================

#[test]
fn concatenated_path_reads_like_its_parsed_equivalent() {
    let path = PathExpr::parse(".store") + PathExpr::parse(".books") + "[0]" + PathExpr::parse(".price");
    let found = store().read(&path).expect("set operands").unwrap();
    assert_eq!(compact(&found), "9");
}

#[test]
fn cloned_path_reads_like_the_original() {
    let path = PathExpr::parse(".store.books[0].title");
    let copy = path.clone();
    let found = store().read(&copy).expect("set operands").unwrap();
    assert_eq!(compact(&found), r#""Dune""#);
}

#[test]
fn flattened_path_reads_like_its_parsed_equivalent() {
    let mut path = PathExpr::root();
    path.pipe(&Doc::parse(r#"[".store",".books"]"#));
    path += "[1].title";
    let found = store().read(&path).expect("set operands").unwrap();
    assert_eq!(compact(&found), r#""Emma""#);
}
