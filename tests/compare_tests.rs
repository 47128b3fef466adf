//! Comprehensive tests for the comparison entry points.
//!
//! Exercises the public API the way a test suite would: real structs of
//! different shapes, compared in order, by identifier, and one-to-one.

use fieldcmp::*;
use serde::Serialize;

// ============================================================================
// SHARED TEST HELPERS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[allow(non_snake_case)]
struct V1 {
    FieldOne: String,
}

#[derive(Debug, Clone, Serialize)]
#[allow(non_snake_case)]
struct V2 {
    FieldOne: String,
    FieldTwo: String,
}

#[derive(Debug, Clone, Serialize)]
#[allow(non_snake_case)]
struct V3 {
    FieldElse: String,
    FieldTwo: String,
}

fn v1(one: &str) -> V1 {
    V1 {
        FieldOne: one.to_string(),
    }
}

fn v2(one: &str, two: &str) -> V2 {
    V2 {
        FieldOne: one.to_string(),
        FieldTwo: two.to_string(),
    }
}

fn v3(other: &str, two: &str) -> V3 {
    V3 {
        FieldElse: other.to_string(),
        FieldTwo: two.to_string(),
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// ORDERED COMPARISON
// ============================================================================

mod slice_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allow_list_restricts_comparison() {
        init_logging();
        assert_slice_cmp(
            &[v1("A"), v1("B"), v1("C")],
            &[v2("A", "C"), v2("B", "B"), v2("C", "A")],
            &[cmp_only(["FieldOne"])],
        );
    }

    #[test]
    fn test_rename_aligns_differently_named_fields() {
        assert_slice_cmp(
            &[v1("A"), v1("B"), v1("C")],
            &[v3("A", "C"), v3("B", "B"), v3("C", "A")],
            &[
                cmp_rename(RenameMap::from([("FieldElse", "FieldOne")])),
                cmp_only(["FieldOne"]),
            ],
        );
    }

    #[test]
    fn test_extra_fields_reported_without_allow_list() {
        let diff = slice_diff(&[v1("A"), v1("B")], &[v2("A", "C"), v2("B", "B")], &[]).unwrap();

        assert_eq!(diff.paths(), vec!["[0].FieldTwo", "[1].FieldTwo"]);
        assert!(diff
            .iter()
            .all(|d| matches!(d.kind, DifferenceKind::Unexpected { .. })));
    }

    #[test]
    fn test_struct_names_allow_list() {
        let only = cmp_only_struct_names(&v1("")).unwrap();
        assert_slice_cmp(&[v1("A")], &[v2("A", "ignored")], &[only]);
    }

    #[test]
    #[should_panic(expected = "records differ")]
    fn test_value_mismatch_fails() {
        assert_slice_cmp(&[v1("A")], &[v2("B", "x")], &[cmp_only(["FieldOne"])]);
    }
}

// ============================================================================
// IDENTIFIER-ALIGNED COMPARISON
// ============================================================================

mod mapped_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyed_by_different_fields_with_rename() {
        init_logging();
        assert_mapped_cmp(
            "FieldOne",
            "FieldTwo",
            &[v2("B", "B"), v2("A", "C"), v2("C", "A")],
            &[v3("B", "B"), v3("A", "C"), v3("C", "A")],
            &[
                cmp_rename(RenameMap::from([("FieldElse", "FieldTwo")])),
                cmp_only(["FieldOne"]),
            ],
        );
    }

    #[test]
    fn test_remaining_fields_compared_after_alignment() {
        // FieldTwo is the key on the real side and gets removed; FieldElse is
        // renamed into its place and compared with the expected FieldTwo
        let expected = [v2("A", "x"), v2("B", "y")];
        let real = [v3("x", "A"), v3("nope", "B")];
        let diff = mapped_diff(
            "FieldOne",
            "FieldTwo",
            &expected,
            &real,
            &[cmp_rename(RenameMap::from([("FieldElse", "FieldTwo")]))],
        )
        .unwrap();

        assert_eq!(diff.paths(), vec![r#"{"B"}.FieldTwo"#]);
        assert_eq!(
            diff.differences()[0].kind,
            DifferenceKind::Changed {
                expected: serde_json::json!("y"),
                actual: serde_json::json!("nope"),
            }
        );
    }

    #[test]
    fn test_unmatched_identifiers_reported() {
        let diff = mapped_diff_strict(
            "FieldOne",
            "FieldOne",
            &[v2("A", "1"), v2("B", "2")],
            &[v2("B", "2"), v2("C", "3")],
            &[],
        )
        .unwrap();
        assert_eq!(diff.paths(), vec![r#"{"A"}"#, r#"{"C"}"#]);
    }

    #[test]
    fn test_duplicate_identifier_is_configuration_error() {
        let err = mapped_diff(
            "FieldOne",
            "FieldOne",
            &[v2("A", "1")],
            &[v2("A", "1"), v2("A", "2")],
            &[],
        )
        .unwrap_err();

        match err {
            CmpError::DuplicateIdentifier { field, value } => {
                assert_eq!(field, "FieldOne");
                assert_eq!(value, "A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_identifier_is_configuration_error() {
        let err = mapped_diff_strict("FieldOne", "FieldOne", &[v2("A", "1")], &[v3("A", "1")], &[])
            .unwrap_err();
        assert!(matches!(err, CmpError::MissingIdentifier { .. }));
    }

    #[test]
    #[should_panic(expected = "Cannot rename field 'FieldElse' to already existing field 'FieldTwo'")]
    fn test_rename_collision_fails_the_test() {
        assert_slice_cmp(
            &[v2("A", "x")],
            &[v3("A", "x")],
            &[cmp_rename(RenameMap::from([("FieldElse", "FieldTwo")]))],
        );
    }
}

// ============================================================================
// SINGLE-PAIR COMPARISON
// ============================================================================

mod untyped_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[derive(Serialize)]
    struct Row {
        id: i64,
        total: Option<i64>,
        label: Option<String>,
    }

    #[derive(Serialize)]
    struct Model {
        id: i64,
        total: i64,
        label: String,
    }

    #[test]
    fn test_nullable_fields_equal_zero_values() {
        let row = Row {
            id: 1,
            total: None,
            label: None,
        };
        let model = Model {
            id: 1,
            total: 0,
            label: String::new(),
        };
        assert_untyped_cmp(&row, &model, &[]);
    }

    #[test]
    fn test_present_optional_equals_value() {
        let row = Row {
            id: 1,
            total: Some(12),
            label: Some("x".to_string()),
        };
        let model = Model {
            id: 1,
            total: 12,
            label: "x".to_string(),
        };
        assert_untyped_cmp(&row, &model, &[]);
    }

    #[test]
    fn test_null_against_non_zero_differs() {
        let row = Row {
            id: 1,
            total: None,
            label: None,
        };
        let model = Model {
            id: 1,
            total: 3,
            label: String::new(),
        };

        let diff = untyped_diff(&row, &model, &[]).unwrap();
        assert_eq!(diff.paths(), vec!["total"]);
    }

    #[test]
    fn test_key_transform_and_ignore() {
        let row = Row {
            id: 1,
            total: Some(1999),
            label: Some("ignored".to_string()),
        };
        let model = Model {
            id: 1,
            total: 19,
            label: "other".to_string(),
        };

        let diff = untyped_diff(
            &row,
            &model,
            &[
                key_transform("total", |cents: i64| if cents > 100 { cents / 100 } else { cents }),
                cmp_ignore(["label"]),
            ],
        )
        .unwrap();
        assert!(diff.is_empty(), "{diff}");
    }

    #[test]
    fn test_maps_compare_like_records() {
        let mut expected = std::collections::BTreeMap::new();
        expected.insert("id".to_string(), json!(1));
        expected.insert("total".to_string(), Value::Null);
        expected.insert("label".to_string(), json!("x"));

        let model = Model {
            id: 1,
            total: 0,
            label: "x".to_string(),
        };
        assert_untyped_cmp(&expected, &model, &[]);
    }
}

// ============================================================================
// VALUE OBJECTS
// ============================================================================

mod valuer_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[derive(Debug, Clone)]
    struct Sku(String);

    impl Valuer for Sku {
        type Error = String;

        fn value(&self) -> Result<Value, String> {
            if self.0.is_empty() {
                return Err("empty sku".to_string());
            }
            Ok(json!(self.0.to_uppercase()))
        }
    }

    #[derive(Serialize)]
    struct Product {
        #[serde(serialize_with = "fieldcmp::valuer::serialize")]
        sku: Sku,
        qty: i64,
    }

    #[derive(Serialize)]
    struct ProductRow {
        #[serde(serialize_with = "fieldcmp::valuer::serialize")]
        sku: Sku,
        qty: i64,
    }

    #[test]
    fn test_value_objects_compared_by_primitive() {
        let expected = [Product {
            sku: Sku("ab-1".to_string()),
            qty: 2,
        }];
        let real = [ProductRow {
            sku: Sku("AB-1".to_string()),
            qty: 2,
        }];
        assert_slice_cmp(&expected, &real, &[valuer_conv()]);
    }

    #[test]
    fn test_value_object_identifiers() {
        let expected = [
            Product {
                sku: Sku("b".to_string()),
                qty: 1,
            },
            Product {
                sku: Sku("a".to_string()),
                qty: 2,
            },
        ];
        let real = [
            ProductRow {
                sku: Sku("A".to_string()),
                qty: 2,
            },
            ProductRow {
                sku: Sku("B".to_string()),
                qty: 1,
            },
        ];
        assert_mapped_cmp("sku", "sku", &expected, &real, &[]);
    }

    #[test]
    fn test_broken_accessor_aborts() {
        let expected = [Product {
            sku: Sku(String::new()),
            qty: 1,
        }];
        let real = [ProductRow {
            sku: Sku("A".to_string()),
            qty: 1,
        }];

        let err = slice_diff(&expected, &real, &[valuer_conv()]).unwrap_err();
        match err {
            CmpError::ValuerFailed { path, message } => {
                assert_eq!(path, "[0].sku");
                assert_eq!(message, "empty sku");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
