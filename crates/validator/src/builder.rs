//! Turns struct descriptions into validators.

use crate::assertion::Assertion;
use crate::error::BuildError;
use crate::kind::Kind;
use crate::registry::Registry;
use crate::structure::StructType;
use crate::validator::{FieldSpec, StructValidator};

/// One `name[:args]` entry of a constraint tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintSpec<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

/// Splits a constraint tag into its specs.
///
/// Specs are separated by `,` and trimmed. Each one is split at its first
/// `:` into name and arguments. Only the empty tag has no specs; a blank
/// spec, including a tag of nothing but spaces, comes back with an empty name.
///
/// ```rust,ignore
/// let specs = parse_tag("required, between:1:10");
/// assert_eq!(specs[1], ConstraintSpec { name: "between", args: "1:10" });
/// ```
pub fn parse_tag(tag: &str) -> Vec<ConstraintSpec<'_>> {
    if tag.is_empty() {
        return Vec::new();
    }

    tag.split(',')
        .map(str::trim)
        .map(|spec| match spec.split_once(':') {
            Some((name, args)) => ConstraintSpec { name, args },
            None => ConstraintSpec { name: spec, args: "" },
        })
        .collect()
}

/// Builds [`StructValidator`]s against one registry.
#[derive(Debug, Clone, Copy)]
pub struct SpecBuilder<'r> {
    registry: &'r Registry,
}

impl<'r> SpecBuilder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolves every field's constraints and recurses into nested structs.
    ///
    /// Fails on the first field that cannot be resolved; no partial validator
    /// is returned.
    pub fn build(&self, structure: &StructType) -> Result<StructValidator, BuildError> {
        let mut fields = Vec::new();

        for field in structure.fields() {
            let mut assertions: Vec<Box<dyn Assertion>> = Vec::new();

            for spec in parse_tag(field.validate_tag().unwrap_or_default()) {
                let assertion = self
                    .registry
                    .resolve(spec.name, field.kind(), spec.args)
                    .map_err(|err| BuildError::new(structure.type_name(), field.name(), err))?;
                assertions.push(assertion);
            }

            // Nested structs always run their own validator last.
            if let Kind::Struct(nested) = field.kind() {
                assertions.push(Box::new(self.build(&nested.describe())?));
            }

            if !assertions.is_empty() {
                fields.push(FieldSpec::new(field.name(), field.alias(), assertions));
            }
        }

        tracing::debug!(
            type_name = structure.type_name(),
            fields = fields.len(),
            "built struct validator"
        );

        Ok(StructValidator::from_parts(structure, fields))
    }
}
