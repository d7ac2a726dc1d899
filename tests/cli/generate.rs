//! Tests for `bwenv generate`.

use crate::support::*;

#[test]
fn test_generate_writes_references() {
    let t = Test::new().with_item("ID1", ITEM_ID1);

    let output = t.generate(&["ID1"]);

    assert_child_printed(&output, "Added 2 environment variables to .env");
    t.assert_env_lines(
        ".env",
        &[
            "F1=\"bwenv://ID1/fields/F1\"",
            "F2=\"bwenv://ID1/fields/F2\"",
        ],
    );
}

#[test]
fn test_generate_never_writes_secret_values() {
    let t = Test::new().with_item("ID1", ITEM_ID1);

    assert_ok(&t.generate(&["ID1"]));

    let content = t.read(".env");
    assert!(!content.contains("secret"));
}

#[test]
fn test_generate_joins_search_terms() {
    let t = Test::new().with_item("my app", ITEM_ID1);

    let output = t.generate(&["my", "app"]);

    assert_ok(&output);
    t.assert_lookups(&["my app"]);
    assert!(t.read(".env").contains("bwenv://ID1/fields/F1"));
}

#[test]
fn test_generate_appends_to_existing_file() {
    let t = Test::new().with_item("ID1", ITEM_ID1);
    t.write(".env", "EXISTING=value");

    assert_ok(&t.generate(&["ID1"]));

    t.assert_env_lines(
        ".env",
        &[
            "EXISTING=value",
            "F1=\"bwenv://ID1/fields/F1\"",
            "F2=\"bwenv://ID1/fields/F2\"",
        ],
    );
}

#[test]
fn test_generate_custom_file() {
    let t = Test::new().with_item("ID1", ITEM_ID1);

    let output = t.generate_with(".env.shared", &["ID1"]);

    assert_ok(&output);
    assert!(t.read(".env.shared").contains("F1=\"bwenv://ID1/fields/F1\""));
    t.assert_no_env_file(".env");
}

#[test]
fn test_generate_item_not_found() {
    let t = Test::new();

    let output = t.generate(&["missing"]);

    assert_refused(&output, "Not found.");
    t.assert_no_env_file(".env");
}

#[test]
fn test_generate_multiple_items_found() {
    let t = Test::new().with_error("dup", AMBIGUOUS);

    let output = t.generate(&["dup"]);

    assert_refused(&output, "More than one result was found");
    assert_refused(&output, "27a7e219-098f-4342-9475-85c98610a985");
    t.assert_no_env_file(".env");
}

#[test]
fn test_generate_missing_fields() {
    let t = Test::new().with_item("BW_ID", ITEM_NO_FIELDS);

    let output = t.generate(&["BW_ID"]);

    assert_refused(&output, "\"fields\" property missing");
    assert_hinted(&output, "bw get item BW_ID");
    t.assert_no_env_file(".env");
}

#[test]
fn test_generate_warns_on_non_portable_names() {
    let t = Test::new().with_item(
        "ID2",
        r#"{"id":"ID2","fields":[{"name":"api key","value":"x"}]}"#,
    );

    let output = t.generate(&["ID2"]);

    assert_ok(&output);
    assert_warned(&output, "\"api key\" is not a portable environment variable name");
    t.assert_env_lines(".env", &["api key=\"bwenv://ID2/fields/api key\""]);
}

#[test]
fn test_generate_name_with_equals_warns_it_will_not_resolve() {
    let t = Test::new().with_item(
        "ID3",
        r#"{"id":"ID3","fields":[{"name":"A=B","value":"x"},{"name":"OK","value":"y"}]}"#,
    );

    let output = t.generate(&["ID3"]);

    assert_ok(&output);
    assert_warned(&output, "\"A=B\" contains '='; its line will not resolve on run");

    let output = t
        .cmd()
        .env_remove("A")
        .args(["run", "sh", "-c", "echo \"[$A] [$OK]\""])
        .output()
        .unwrap();

    assert_child_printed(&output, "[B=\"bwenv://ID3/fields/A=B\"] [y]");
}
