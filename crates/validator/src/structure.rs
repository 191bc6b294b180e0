//! Struct descriptions: field names, kinds and tags.

use std::any::TypeId;
use std::borrow::Cow;

use crate::kind::Kind;
use crate::reflect::Structure;

/// Describes one struct type.
///
/// Built by `#[derive(Structure)]` or by hand with [`StructType::new`] and
/// [`FieldDef`]. A description never changes once it has been produced.
#[derive(Debug, Clone)]
pub struct StructType {
    name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    fields: Vec<FieldDef>,
}

impl StructType {
    /// Starts a description of `T` with no fields.
    pub fn new<T: Structure>(name: &'static str) -> Self {
        Self {
            name,
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Short name of the struct, as written in the source.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full type name of the struct.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Runtime identity of the struct.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// Describes one struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: Cow<'static, str>,
    kind: Kind,
    validate: Option<Cow<'static, str>>,
    serial: Option<Cow<'static, str>>,
}

impl FieldDef {
    /// A field with the given declared name and kind, without tags.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            validate: None,
            serial: None,
        }
    }

    /// Sets the constraint tag, e.g. `"required,between:1:10"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn validate(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.validate = Some(tag.into());
        self
    }

    /// Sets the serialization tag, e.g. `"user_name,omitempty"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn serial(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.serial = Some(tag.into());
        self
    }

    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Constraint tag, if any.
    pub fn validate_tag(&self) -> Option<&str> {
        self.validate.as_deref()
    }

    /// Serialization tag, if any.
    pub fn serial_tag(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Name used in error paths.
    ///
    /// The first comma-separated segment of the serialization tag, or the
    /// declared name when that segment is missing or empty.
    pub fn alias(&self) -> &str {
        self.serial
            .as_deref()
            .and_then(|tag| tag.split(',').next())
            .filter(|alias| !alias.is_empty())
            .unwrap_or(self.name.as_ref())
    }
}
