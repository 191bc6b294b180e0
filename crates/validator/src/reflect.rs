//! Read-only reflection over struct fields.
//!
//! [`Reflect`] maps a Rust type to its declared [`Kind`] and lets the engine
//! peek at a value without knowing its concrete type. [`Structure`] is the
//! struct-level counterpart: it describes the fields and hands out each one by
//! name. Both are normally generated by `#[derive(Structure)]`.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::kind::{FloatWidth, IntWidth, Kind, UintWidth};
use crate::structure::StructType;

/// A borrowed view of one field value.
///
/// Integers and floats are widened to 64 bits; containers only expose their
/// length, which is all the built-in constraints need.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(&'a str),
    Sequence(usize),
    Array(usize),
    Mapping(usize),
    Optional(Option<&'a dyn Reflect>),
    Struct(&'a dyn Structure),
    Opaque,
}

impl FieldValue<'_> {
    /// Short name of the value's shape, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Array(_) => "array",
            Self::Mapping(_) => "mapping",
            Self::Optional(_) => "optional",
            Self::Struct(_) => "struct",
            Self::Opaque => "opaque value",
        }
    }

    /// Length of text or containers, `None` for everything else.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.len()),
            Self::Sequence(len) | Self::Array(len) | Self::Mapping(len) => Some(*len),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Sequence(len) => f.debug_tuple("Sequence").field(len).finish(),
            Self::Array(len) => f.debug_tuple("Array").field(len).finish(),
            Self::Mapping(len) => f.debug_tuple("Mapping").field(len).finish(),
            Self::Optional(inner) => f
                .debug_tuple("Optional")
                .field(&inner.map(|value| value.reflect()))
                .finish(),
            Self::Struct(inner) => f.debug_tuple("Struct").field(&inner.type_name()).finish(),
            Self::Opaque => f.write_str("Opaque"),
        }
    }
}

/// A type whose values the engine can inspect.
pub trait Reflect {
    /// The declared kind of the type.
    fn kind() -> Kind
    where
        Self: Sized;

    /// A borrowed view of the value.
    fn reflect(&self) -> FieldValue<'_>;
}

/// A struct with a field description.
///
/// # Examples
///
/// Implementing it by hand for a type that cannot use the derive:
///
/// ```rust,ignore
/// impl Structure for Login {
///     fn structure() -> StructType {
///         StructType::new::<Self>("Login")
///             .field(FieldDef::new("email", Kind::Text).validate("required"))
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
///         match name {
///             "email" => Some(self.email.reflect()),
///             _ => None,
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Structure: Any {
    /// Describes the struct's fields.
    fn structure() -> StructType
    where
        Self: Sized;

    /// Returns the field with the given declared name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Upcast used for the runtime type check.
    fn as_any(&self) -> &dyn Any;

    /// Full type name, used in mismatch errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! reflect_number {
    ($($ty:ty => $kind:expr, $variant:ident;)*) => {
        $(
            impl Reflect for $ty {
                fn kind() -> Kind {
                    $kind
                }

                fn reflect(&self) -> FieldValue<'_> {
                    FieldValue::$variant((*self).into())
                }
            }
        )*
    };
}

reflect_number! {
    i8 => Kind::Int(IntWidth::I8), Int;
    i16 => Kind::Int(IntWidth::I16), Int;
    i32 => Kind::Int(IntWidth::I32), Int;
    i64 => Kind::Int(IntWidth::I64), Int;
    u8 => Kind::Uint(UintWidth::U8), Uint;
    u16 => Kind::Uint(UintWidth::U16), Uint;
    u32 => Kind::Uint(UintWidth::U32), Uint;
    u64 => Kind::Uint(UintWidth::U64), Uint;
    f32 => Kind::Float(FloatWidth::F32), Float;
    f64 => Kind::Float(FloatWidth::F64), Float;
}

impl Reflect for isize {
    fn kind() -> Kind {
        Kind::Int(IntWidth::Isize)
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i64)
    }
}

impl Reflect for usize {
    fn kind() -> Kind {
        Kind::Uint(UintWidth::Usize)
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Uint(*self as u64)
    }
}

impl Reflect for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl Reflect for char {
    fn kind() -> Kind {
        Kind::Opaque("char")
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Opaque
    }
}

// ============================================================================
// TEXT
// ============================================================================

impl Reflect for String {
    fn kind() -> Kind {
        Kind::Text
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Reflect for Box<str> {
    fn kind() -> Kind {
        Kind::Text
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Reflect for Cow<'_, str> {
    fn kind() -> Kind {
        Kind::Text
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

// ============================================================================
// CONTAINERS
// ============================================================================

impl<T> Reflect for Vec<T> {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.len())
    }
}

impl<T> Reflect for VecDeque<T> {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.len())
    }
}

impl<T, S> Reflect for HashSet<T, S> {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.len())
    }
}

impl<T> Reflect for BTreeSet<T> {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.len())
    }
}

impl<T, const N: usize> Reflect for [T; N] {
    fn kind() -> Kind {
        Kind::Array(N)
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Array(N)
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S> {
    fn kind() -> Kind {
        Kind::Mapping
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Mapping(self.len())
    }
}

impl<K, V> Reflect for BTreeMap<K, V> {
    fn kind() -> Kind {
        Kind::Mapping
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Mapping(self.len())
    }
}

// ============================================================================
// WRAPPERS
// ============================================================================

impl<T: Reflect> Reflect for Option<T> {
    fn kind() -> Kind {
        Kind::Optional(Box::new(T::kind()))
    }

    fn reflect(&self) -> FieldValue<'_> {
        FieldValue::Optional(self.as_ref().map(|value| value as &dyn Reflect))
    }
}

// Owning pointers are never null, so they are transparent.
impl<T: Reflect> Reflect for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> FieldValue<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> FieldValue<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> FieldValue<'_> {
        (**self).reflect()
    }
}
