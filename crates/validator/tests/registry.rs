//! Registry extension, configuration and hand-written descriptions.

use std::any::Any;

use pretty_assertions::assert_eq;
use serde_json::json;
use sift_validator::assertion;
use sift_validator::prelude::*;
use sift_validator::{IntWidth, LengthMode};

// ============================================================================
// CUSTOM CONSTRAINTS
// ============================================================================

#[derive(Debug)]
struct MultipleOf(i64);

impl Assertion for MultipleOf {
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
        match value {
            FieldValue::Int(n) if n % self.0 != 0 => AssertionOutcome::violation(
                ViolationRecord::new(
                    "multiple_of",
                    format!("the value must be a multiple of {} (is {n})", self.0),
                    "the value must be a multiple of {factor} (is {actual})",
                )
                .with_value("factor", self.0)
                .with_value("actual", *n),
            ),
            _ => AssertionOutcome::Pass,
        }
    }
}

fn multiple_of(args: &ConstraintArgs<'_>) -> Result<Box<dyn Assertion>, ResolveError> {
    if !matches!(args.kind(), Kind::Int(_)) {
        return Err(ResolveError::unsupported(args.name(), args.kind()));
    }
    let factor: i64 = args
        .raw()
        .parse()
        .map_err(|_| ResolveError::malformed(args.name(), args.raw(), "expected an integer"))?;
    if factor == 0 {
        return Err(ResolveError::malformed(args.name(), args.raw(), "factor must not be zero"));
    }
    Ok(Box::new(MultipleOf(factor)))
}

#[derive(Structure)]
struct Batch {
    #[validate("between:1:100,multiple_of:5")]
    size: i32,
}

#[derive(Structure)]
#[allow(dead_code)]
struct Misplaced {
    #[validate("multiple_of:5")]
    label: String,
}

#[test]
fn custom_constraints_run_alongside_builtins() {
    let mut registry = Registry::new();
    registry.register("multiple_of", multiple_of);
    assert!(registry.contains("multiple_of"));

    let validator = registry.build::<Batch>().unwrap();
    assert!(validator.validate(&Batch { size: 25 }).is_ok());

    let err = validator.validate(&Batch { size: 102 }).unwrap_err();
    let result = err.as_result().unwrap();
    assert_eq!(result.codes("size"), ["between", "multiple_of"]);

    let record = result.get("size").unwrap()[1].as_record().unwrap();
    assert_eq!(record.message(), "the value must be a multiple of 5 (is 102)");
    assert_eq!(record.render(record.template()), record.message());
}

#[test]
fn custom_constructor_errors_fail_the_build() {
    let mut registry = Registry::new();
    registry.register("multiple_of", multiple_of);

    let err = registry.build::<Misplaced>().unwrap_err();
    assert!(err.is_unsupported_kind());
    assert_eq!(
        err.to_string(),
        "cannot build validator for `registry::Misplaced`, field `label`: \
         constraint `multiple_of` does not support text fields"
    );
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = Registry::without_builtins(RegistryConfig::default());
    let err = registry.build::<Batch>().unwrap_err();
    assert!(err.is_unknown_constraint());
}

#[test]
fn closures_can_be_registered() {
    #[derive(Structure)]
    struct Even {
        #[validate("even")]
        n: i64,
    }

    let mut registry = Registry::new();
    registry.register("even", |_| {
        let even: Box<dyn Assertion> = Box::new(assertion::from_fn("even", |value| match value {
            FieldValue::Int(n) if n % 2 != 0 => {
                AssertionOutcome::violation(ViolationRecord::new("even", "odd", "odd"))
            }
            _ => AssertionOutcome::Pass,
        }));
        Ok(even)
    });

    let validator = registry.build::<Even>().unwrap();
    assert!(validator.validate(&Even { n: 2 }).is_ok());
    assert!(validator.validate(&Even { n: 3 }).is_err());
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Structure)]
struct Handle {
    #[validate("between:1:4")]
    handle: String,
}

#[test]
fn length_mode_comes_from_config() {
    let config: RegistryConfig = serde_json::from_value(json!({ "length_mode": "chars" })).unwrap();
    assert_eq!(config.length_mode, LengthMode::Chars);

    let turtle = Handle {
        handle: "żółw".into(),
    };

    let by_chars = Registry::with_config(config).build::<Handle>().unwrap();
    assert!(by_chars.validate(&turtle).is_ok());

    let by_bytes = Registry::new().build::<Handle>().unwrap();
    let err = by_bytes.validate(&turtle).unwrap_err();
    let record = err.as_result().unwrap().get("handle").unwrap()[0]
        .as_record()
        .unwrap()
        .clone();
    assert_eq!(record.message(), "length must be between 1 and 4 (is 7)");
}

// ============================================================================
// MANUAL DESCRIPTIONS
// ============================================================================

struct Account {
    owner: String,
    balance: i16,
    limits: Limits,
}

#[derive(Structure)]
struct Limits {
    #[validate("between:0:10")]
    daily: u8,
}

impl Structure for Account {
    fn structure() -> StructType {
        StructType::new::<Self>("Account")
            .field(
                FieldDef::new("owner", Kind::Text)
                    .validate(" required , between:2:16 ")
                    .serial("owner_name,omitempty"),
            )
            .field(FieldDef::new("balance", Kind::Int(IntWidth::I16)).validate("between:-100:100"))
            .field(FieldDef::new("limits", Kind::structure::<Limits>()))
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "owner" => Some(self.owner.reflect()),
            "balance" => Some(self.balance.reflect()),
            "limits" => Some(self.limits.reflect()),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn hand_written_descriptions_validate() {
    let validator = StructValidator::new::<Account>().unwrap();

    let account = Account {
        owner: String::new(),
        balance: -101,
        limits: Limits { daily: 11 },
    };
    let err = validator.validate(&account).unwrap_err();
    let result = err.as_result().unwrap();

    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        ["balance", "limits.daily", "owner_name"]
    );
    assert_eq!(result.codes("owner_name"), ["required", "between"]);
}

#[test]
fn bounds_respect_field_width() {
    #[allow(dead_code)]
    struct Tiny {
        level: i8,
    }

    impl Structure for Tiny {
        fn structure() -> StructType {
            StructType::new::<Self>("Tiny")
                .field(FieldDef::new("level", Kind::Int(IntWidth::I8)).validate("between:0:200"))
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            (name == "level").then(|| self.level.reflect())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let err = StructValidator::new::<Tiny>().unwrap_err();
    assert!(err.is_malformed_arguments());
    assert_eq!(err.type_name, std::any::type_name::<Tiny>());
}
