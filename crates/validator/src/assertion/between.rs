use std::fmt::Display;
use std::str::FromStr;

use crate::assertion::{Assertion, AssertionOutcome};
use crate::config::LengthMode;
use crate::error::{ResolveError, ValueMismatch};
use crate::kind::{FloatWidth, IntWidth, Kind, UintWidth};
use crate::reflect::FieldValue;
use crate::registry::ConstraintArgs;
use crate::result::ViolationRecord;

const NAME: &str = "between";
const VALUE_TEMPLATE: &str = "the value must be between {min} and {max} (is {actual})";
const LENGTH_TEMPLATE: &str = "length must be between {min} and {max} (is {actual})";

/// Inclusive range check, `between:<lower>:<upper>`.
///
/// Numbers are compared by value, text and containers by length. Bounds are
/// parsed for the field's exact width, so `between:0:300` is rejected on a
/// `u8` field. A range with `upper < lower` is accepted and never satisfied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Between {
    Int { lower: i64, upper: i64 },
    Uint { lower: u64, upper: u64 },
    Float { lower: f64, upper: f64, width: FloatWidth },
    Length { lower: u64, upper: u64, mode: LengthMode },
}

impl Between {
    /// Registry constructor.
    pub(crate) fn construct(args: &ConstraintArgs<'_>) -> Result<Box<dyn Assertion>, ResolveError> {
        let raw = args.raw();
        let between = match args.kind() {
            Kind::Int(width) => {
                let (lower, upper) = match width {
                    IntWidth::I8 => widen(bounds::<i8>(raw)?),
                    IntWidth::I16 => widen(bounds::<i16>(raw)?),
                    IntWidth::I32 => widen(bounds::<i32>(raw)?),
                    IntWidth::I64 => bounds::<i64>(raw)?,
                    IntWidth::Isize => {
                        let (lower, upper) = bounds::<isize>(raw)?;
                        (lower as i64, upper as i64)
                    }
                };
                Between::Int { lower, upper }
            }
            Kind::Uint(width) => {
                let (lower, upper) = match width {
                    UintWidth::U8 => widen(bounds::<u8>(raw)?),
                    UintWidth::U16 => widen(bounds::<u16>(raw)?),
                    UintWidth::U32 => widen(bounds::<u32>(raw)?),
                    UintWidth::U64 => bounds::<u64>(raw)?,
                    UintWidth::Usize => {
                        let (lower, upper) = bounds::<usize>(raw)?;
                        (lower as u64, upper as u64)
                    }
                };
                Between::Uint { lower, upper }
            }
            Kind::Float(width) => {
                let (lower, upper) = match width {
                    FloatWidth::F32 => widen(bounds::<f32>(raw)?),
                    FloatWidth::F64 => bounds::<f64>(raw)?,
                };
                if lower.is_nan() || upper.is_nan() {
                    return Err(ResolveError::malformed(NAME, raw, "bounds must not be NaN"));
                }
                Between::Float {
                    lower,
                    upper,
                    width: *width,
                }
            }
            Kind::Text | Kind::Sequence | Kind::Mapping | Kind::Array(_) => {
                let (lower, upper) = bounds::<u64>(raw)?;
                Between::Length {
                    lower,
                    upper,
                    mode: args.config().length_mode,
                }
            }
            kind @ (Kind::Bool | Kind::Optional(_) | Kind::Struct(_) | Kind::Opaque(_)) => {
                return Err(ResolveError::unsupported(NAME, kind));
            }
        };

        Ok(Box::new(between))
    }
}

/// Parses `lower:upper` as two values of `T`.
fn bounds<T>(raw: &str) -> Result<(T, T), ResolveError>
where
    T: FromStr,
    T::Err: Display,
{
    let mut parts = raw.split(':');
    let (Some(lower), Some(upper), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ResolveError::malformed(NAME, raw, "expected `lower:upper`"));
    };

    let parse = |part: &str| {
        part.trim().parse::<T>().map_err(|err| {
            ResolveError::malformed(
                NAME,
                raw,
                format!("`{part}` is not a valid {}: {err}", std::any::type_name::<T>()),
            )
        })
    };

    Ok((parse(lower)?, parse(upper)?))
}

fn widen<T: Into<W>, W>((lower, upper): (T, T)) -> (W, W) {
    (lower.into(), upper.into())
}

/// JSON value of a float at its declared width.
///
/// `f32` goes through its shortest decimal form so `0.1_f32` is `0.1`, not
/// the widened `0.10000000149011612`.
fn float_value(value: f64, width: FloatWidth) -> serde_json::Value {
    match width {
        FloatWidth::F32 => {
            let narrow = value as f32;
            narrow
                .to_string()
                .parse::<f64>()
                .map_or(serde_json::Value::Null, serde_json::Value::from)
        }
        FloatWidth::F64 => serde_json::Value::from(value),
    }
}

fn out_of_range<T>(template: &'static str, message: String, lower: T, upper: T, actual: T) -> AssertionOutcome
where
    T: Into<serde_json::Value>,
{
    AssertionOutcome::violation(
        ViolationRecord::new(NAME, message, template)
            .with_value("min", lower)
            .with_value("max", upper)
            .with_value("actual", actual),
    )
}

impl Assertion for Between {
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
        match (*self, *value) {
            (Between::Int { lower, upper }, FieldValue::Int(actual)) => {
                if (lower..=upper).contains(&actual) {
                    return AssertionOutcome::Pass;
                }
                let message = format!("the value must be between {lower} and {upper} (is {actual})");
                out_of_range(VALUE_TEMPLATE, message, lower, upper, actual)
            }
            (Between::Uint { lower, upper }, FieldValue::Uint(actual)) => {
                if (lower..=upper).contains(&actual) {
                    return AssertionOutcome::Pass;
                }
                let message = format!("the value must be between {lower} and {upper} (is {actual})");
                out_of_range(VALUE_TEMPLATE, message, lower, upper, actual)
            }
            (Between::Float { lower, upper, width }, FieldValue::Float(actual)) => {
                // NaN compares false both ways and passes.
                if actual < lower || actual > upper {
                    let message = format!(
                        "the value must be between {lower:.6} and {upper:.6} (is {actual:.6})"
                    );
                    return out_of_range(
                        VALUE_TEMPLATE,
                        message,
                        float_value(lower, width),
                        float_value(upper, width),
                        float_value(actual, width),
                    );
                }
                AssertionOutcome::Pass
            }
            (Between::Length { lower, upper, mode }, value) => {
                let actual: u64 = match value {
                    FieldValue::Text(text) => mode.measure(text) as u64,
                    FieldValue::Sequence(len) | FieldValue::Array(len) | FieldValue::Mapping(len) => {
                        len as u64
                    }
                    other => return mismatch(&other),
                };
                if (lower..=upper).contains(&actual) {
                    return AssertionOutcome::Pass;
                }
                let message = format!("length must be between {lower} and {upper} (is {actual})");
                out_of_range(LENGTH_TEMPLATE, message, lower, upper, actual)
            }
            (_, value) => mismatch(&value),
        }
    }
}

fn mismatch(value: &FieldValue<'_>) -> AssertionOutcome {
    AssertionOutcome::opaque(ValueMismatch {
        constraint: NAME,
        found: value.describe(),
    })
}
