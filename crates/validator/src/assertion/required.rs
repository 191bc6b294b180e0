use crate::assertion::{Assertion, AssertionOutcome};
use crate::error::ResolveError;
use crate::reflect::FieldValue;
use crate::registry::ConstraintArgs;
use crate::result::ViolationRecord;

const MESSAGE: &str = "the value is required";

/// Requires a value to be present.
///
/// Optional values must be `Some`; text, sequences and maps must be
/// non-empty. Numbers and booleans count as present even when zero, and so do
/// fixed-size arrays and nested structs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required;

impl Required {
    /// Registry constructor. Arguments are ignored and every kind is accepted.
    pub(crate) fn construct(_: &ConstraintArgs<'_>) -> Result<Box<dyn Assertion>, ResolveError> {
        Ok(Box::new(Required))
    }

    fn violation() -> AssertionOutcome {
        AssertionOutcome::violation(ViolationRecord::new("required", MESSAGE, MESSAGE))
    }
}

impl Assertion for Required {
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
        match value {
            FieldValue::Optional(None) => Self::violation(),
            FieldValue::Text(text) if text.is_empty() => Self::violation(),
            FieldValue::Sequence(0) | FieldValue::Mapping(0) => Self::violation(),
            _ => AssertionOutcome::Pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_text(FieldValue::Text(""))]
    #[case::empty_sequence(FieldValue::Sequence(0))]
    #[case::empty_mapping(FieldValue::Mapping(0))]
    #[case::none(FieldValue::Optional(None))]
    fn missing(#[case] value: FieldValue<'static>) {
        match Required.check(&value) {
            AssertionOutcome::Violation(violation) => {
                let record = violation.as_record().unwrap();
                assert_eq!(record.code(), "required");
                assert_eq!(record.message(), "the value is required");
                assert!(record.values().is_empty());
            }
            other => panic!("expected a violation, got {other:?}"),
        }
    }

    #[rstest]
    #[case::zero_int(FieldValue::Int(0))]
    #[case::zero_uint(FieldValue::Uint(0))]
    #[case::zero_float(FieldValue::Float(0.0))]
    #[case::false_bool(FieldValue::Bool(false))]
    #[case::empty_array(FieldValue::Array(0))]
    #[case::text(FieldValue::Text("x"))]
    #[case::sequence(FieldValue::Sequence(2))]
    #[case::opaque(FieldValue::Opaque)]
    fn present(#[case] value: FieldValue<'static>) {
        assert!(Required.check(&value).is_pass());
    }

    #[test]
    fn some_is_present_even_if_empty() {
        let inner = String::new();
        assert!(Required.check(&FieldValue::Optional(Some(&inner))).is_pass());
    }
}
