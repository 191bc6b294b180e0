//! The built, immutable struct validator.

use std::any::{Any, TypeId};

use crate::assertion::{Assertion, AssertionOutcome};
use crate::error::{BuildError, MissingField, TypeMismatch, ValidateError, ValueMismatch};
use crate::reflect::{FieldValue, Structure};
use crate::registry::Registry;
use crate::result::ValidationResult;
use crate::structure::StructType;

/// Resolved assertions for one field.
#[derive(Debug)]
pub struct FieldSpec {
    name: String,
    alias: String,
    assertions: Vec<Box<dyn Assertion>>,
}

impl FieldSpec {
    pub(crate) fn new(
        name: impl Into<String>,
        alias: impl Into<String>,
        assertions: Vec<Box<dyn Assertion>>,
    ) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            assertions,
        }
    }

    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path segment used in results.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Assertions in tag order, a nested validator last.
    pub fn assertions(&self) -> &[Box<dyn Assertion>] {
        &self.assertions
    }
}

/// Validates values of exactly one struct type.
///
/// Built once per type, then shared; validating never mutates it.
///
/// # Examples
///
/// ```rust,ignore
/// let validator = StructValidator::new::<Signup>()?;
///
/// match validator.validate(&signup) {
///     Ok(()) => {}
///     Err(ValidateError::Invalid(result)) => return Err(ErrorResponse::from_api_error(&result)),
///     Err(err @ ValidateError::TypeMismatch(_)) => panic!("{err}"),
/// }
/// ```
#[derive(Debug)]
pub struct StructValidator {
    name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    fields: Vec<FieldSpec>,
}

impl StructValidator {
    /// Builds a validator for `T` with the built-in constraints.
    pub fn new<T: Structure>() -> Result<Self, BuildError> {
        Registry::new().build::<T>()
    }

    pub(crate) fn from_parts(structure: &StructType, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: structure.name(),
            type_name: structure.type_name(),
            type_id: structure.type_id(),
            fields,
        }
    }

    /// Short name of the bound type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields that carry at least one assertion, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field spec by declared name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Runs every assertion of every field and collects all violations.
    pub fn validate(&self, value: &dyn Structure) -> Result<(), ValidateError> {
        if Any::type_id(value.as_any()) != self.type_id {
            return Err(TypeMismatch {
                expected: self.type_name,
                found: value.type_name(),
            }
            .into());
        }

        let mut result = ValidationResult::new();

        for spec in &self.fields {
            let Some(field) = value.field(&spec.name) else {
                result.push(
                    spec.alias.as_str(),
                    crate::Violation::opaque(MissingField {
                        type_name: self.type_name,
                        field: spec.name.clone(),
                    }),
                );
                continue;
            };

            for assertion in &spec.assertions {
                match assertion.check(&field) {
                    AssertionOutcome::Pass => {}
                    AssertionOutcome::Violation(violation) => {
                        result.push(spec.alias.as_str(), violation);
                    }
                    AssertionOutcome::Nested(nested) => {
                        result.merge_nested(&spec.alias, nested);
                    }
                }
            }
        }

        tracing::trace!(
            type_name = self.type_name,
            failing = result.len(),
            "validated value"
        );

        if result.is_empty() {
            Ok(())
        } else {
            Err(result.into())
        }
    }
}

/// A nested validator runs as the last assertion of a struct field.
impl Assertion for StructValidator {
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
        let FieldValue::Struct(nested) = value else {
            return AssertionOutcome::opaque(ValueMismatch {
                constraint: "struct",
                found: value.describe(),
            });
        };

        match self.validate(*nested) {
            Ok(()) => AssertionOutcome::Pass,
            Err(ValidateError::Invalid(result)) => AssertionOutcome::Nested(result),
            Err(ValidateError::TypeMismatch(err)) => AssertionOutcome::opaque(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use crate::reflect::Reflect;
    use crate::structure::FieldDef;
    use pretty_assertions::assert_eq;

    struct Login {
        email: String,
        attempts: u32,
    }

    impl Structure for Login {
        fn structure() -> StructType {
            StructType::new::<Self>("Login")
                .field(FieldDef::new("email", Kind::Text).validate("required").serial("login_email"))
                .field(FieldDef::new("attempts", u32::kind()).validate("between:0:5"))
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "email" => Some(self.email.reflect()),
                "attempts" => Some(self.attempts.reflect()),
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    // Describes a field it never hands out.
    struct Forgetful;

    impl Structure for Forgetful {
        fn structure() -> StructType {
            StructType::new::<Self>("Forgetful").field(FieldDef::new("ghost", Kind::Text).validate("required"))
        }

        fn field(&self, _: &str) -> Option<FieldValue<'_>> {
            None
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn valid_value_passes() {
        let validator = StructValidator::new::<Login>().unwrap();
        let login = Login {
            email: "a@b.c".into(),
            attempts: 5,
        };
        assert!(validator.validate(&login).is_ok());
    }

    #[test]
    fn collects_every_field() {
        let validator = StructValidator::new::<Login>().unwrap();
        let login = Login {
            email: String::new(),
            attempts: 6,
        };

        let err = validator.validate(&login).unwrap_err();
        let result = err.as_result().unwrap();
        assert_eq!(result.paths().collect::<Vec<_>>(), ["attempts", "login_email"]);
        assert_eq!(result.codes("login_email"), ["required"]);
        assert_eq!(result.codes("attempts"), ["between"]);
    }

    #[test]
    fn rejects_other_types() {
        let validator = StructValidator::new::<Login>().unwrap();
        let err = validator.validate(&Forgetful).unwrap_err();

        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("Forgetful"));
    }

    #[test]
    fn missing_field_is_opaque() {
        let validator = StructValidator::new::<Forgetful>().unwrap();
        let err = validator.validate(&Forgetful).unwrap_err();
        assert_eq!(err.as_result().unwrap().codes("ghost"), ["unknown"]);
    }

    #[test]
    fn exposes_field_specs() {
        let validator = StructValidator::new::<Login>().unwrap();
        assert_eq!(validator.name(), "Login");
        assert_eq!(validator.fields().len(), 2);

        let email = validator.field("email").unwrap();
        assert_eq!(email.alias(), "login_email");
        assert_eq!(email.assertions().len(), 1);
    }

    #[test]
    fn validators_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StructValidator>();
        assert_send_sync::<Registry>();
    }
}
