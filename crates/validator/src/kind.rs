//! Declared value kinds of struct fields.
//!
//! Constraint constructors branch on [`Kind`] instead of inspecting values at
//! runtime, so a constraint that cannot apply to a field is rejected while the
//! validator is being built.

use std::any::TypeId;
use std::fmt;

use crate::reflect::Structure;
use crate::structure::StructType;

/// Width of a signed integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

/// Width of an unsigned integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

/// Width of a floating-point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

/// The declared kind of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// `bool`
    Bool,
    /// Signed integers.
    Int(IntWidth),
    /// Unsigned integers.
    Uint(UintWidth),
    /// `f32` / `f64`
    Float(FloatWidth),
    /// UTF-8 text.
    Text,
    /// Growable collections: vectors, deques, sets.
    Sequence,
    /// Fixed-size arrays of the given length.
    Array(usize),
    /// Key/value maps.
    Mapping,
    /// A value that may be absent.
    Optional(Box<Kind>),
    /// A nested struct with its own field description.
    Struct(StructRef),
    /// Anything the engine cannot look into, named for error messages.
    Opaque(&'static str),
}

impl Kind {
    /// The kind of a nested struct.
    pub fn structure<T: Structure>() -> Self {
        Self::Struct(StructRef::of::<T>())
    }

    /// Whether the kind is a nested struct.
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int(width) => f.write_str(match width {
                IntWidth::I8 => "i8",
                IntWidth::I16 => "i16",
                IntWidth::I32 => "i32",
                IntWidth::I64 => "i64",
                IntWidth::Isize => "isize",
            }),
            Self::Uint(width) => f.write_str(match width {
                UintWidth::U8 => "u8",
                UintWidth::U16 => "u16",
                UintWidth::U32 => "u32",
                UintWidth::U64 => "u64",
                UintWidth::Usize => "usize",
            }),
            Self::Float(FloatWidth::F32) => f.write_str("f32"),
            Self::Float(FloatWidth::F64) => f.write_str("f64"),
            Self::Text => f.write_str("text"),
            Self::Sequence => f.write_str("sequence"),
            Self::Array(len) => write!(f, "array[{len}]"),
            Self::Mapping => f.write_str("mapping"),
            Self::Optional(inner) => write!(f, "optional {inner}"),
            Self::Struct(nested) => write!(f, "struct {}", nested.name()),
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

/// A lazy handle to a nested struct's description.
///
/// The description is only produced when a validator is built, which keeps
/// [`Kind`] cheap to construct for self-referencing types.
#[derive(Clone, Copy)]
pub struct StructRef {
    type_id: TypeId,
    name: &'static str,
    describe: fn() -> StructType,
}

impl StructRef {
    /// Refers to the description of `T`.
    pub fn of<T: Structure>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            describe: T::structure,
        }
    }

    /// Full type name of the nested struct.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runtime identity of the nested struct.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Produces the nested struct's description.
    pub fn describe(&self) -> StructType {
        (self.describe)()
    }
}

impl PartialEq for StructRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for StructRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructRef").field(&self.name).finish()
    }
}
