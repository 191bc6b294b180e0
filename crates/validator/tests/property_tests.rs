//! Property-based tests for sift-validator.

use proptest::prelude::*;
use sift_validator::prelude::*;

#[derive(Structure)]
struct Range {
    #[validate("between:-50:50")]
    value: i64,
}

#[derive(Structure)]
struct Text {
    #[validate("required,between:2:8")]
    text: String,
}

#[derive(Structure)]
struct Plain {
    name: String,
    count: u32,
    items: Vec<u8>,
}

#[derive(Structure)]
struct Parent {
    #[validate("between:0:9")]
    digit: u8,
    child: Text,
}

// ============================================================================
// INCLUSIVE BOUNDS: between:l:u passes iff l <= x <= u
// ============================================================================

proptest! {
    #[test]
    fn between_int_matches_range(value in -200_i64..200) {
        let validator = StructValidator::new::<Range>().unwrap();
        let ok = validator.validate(&Range { value }).is_ok();
        prop_assert_eq!(ok, (-50..=50).contains(&value));
    }

    #[test]
    fn between_text_matches_length(text in "[a-z]{0,12}") {
        let validator = StructValidator::new::<Text>().unwrap();
        let ok = validator.validate(&Text { text: text.clone() }).is_ok();
        prop_assert_eq!(ok, (2..=8).contains(&text.len()));
    }
}

// ============================================================================
// ZERO TAGS: a struct without tags never fails
// ============================================================================

proptest! {
    #[test]
    fn untagged_struct_always_passes(name in ".*", count in any::<u32>(), items in prop::collection::vec(any::<u8>(), 0..16)) {
        let validator = StructValidator::new::<Plain>().unwrap();
        let ok = validator.validate(&Plain { name, count, items }).is_ok();
        prop_assert!(ok);
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_is_idempotent(digit in any::<u8>(), text in ".{0,12}") {
        let validator = StructValidator::new::<Parent>().unwrap();
        let value = Parent { digit, child: Text { text } };

        let first = validator.validate(&value);
        let second = validator.validate(&value);

        match (first, second) {
            (Ok(()), Ok(())) => {}
            (Err(a), Err(b)) => {
                let a = a.into_result().unwrap();
                let b = b.into_result().unwrap();
                prop_assert_eq!(a.detail(), b.detail());
            }
            _ => prop_assert!(false, "outcomes differ"),
        }
    }

    #[test]
    fn nested_paths_are_prefixed(text in ".{0,12}") {
        let validator = StructValidator::new::<Parent>().unwrap();
        let value = Parent { digit: 0, child: Text { text } };

        if let Err(err) = validator.validate(&value) {
            let result = err.into_result().unwrap();
            let only_child = result.paths().all(|path| path == "child.text");
            prop_assert!(only_child);
        }
    }
}
