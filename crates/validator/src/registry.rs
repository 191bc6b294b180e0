//! Constraint registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assertion::{Assertion, Between, Required};
use crate::builder::SpecBuilder;
use crate::config::RegistryConfig;
use crate::error::{BuildError, ResolveError};
use crate::kind::Kind;
use crate::reflect::Structure;
use crate::structure::StructType;
use crate::validator::StructValidator;

/// Everything a constructor gets to see about one constraint occurrence.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintArgs<'a> {
    name: &'a str,
    kind: &'a Kind,
    raw: &'a str,
    config: &'a RegistryConfig,
}

impl<'a> ConstraintArgs<'a> {
    pub fn new(name: &'a str, kind: &'a Kind, raw: &'a str, config: &'a RegistryConfig) -> Self {
        Self {
            name,
            kind,
            raw,
            config,
        }
    }

    /// Constraint name as written in the tag.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Declared kind of the field the constraint is attached to.
    pub fn kind(&self) -> &'a Kind {
        self.kind
    }

    /// Everything after the first `:`, or `""` when there is none.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn config(&self) -> &'a RegistryConfig {
        self.config
    }
}

/// Turns constraint arguments into an assertion, or rejects them.
pub type Constructor =
    Arc<dyn Fn(&ConstraintArgs<'_>) -> Result<Box<dyn Assertion>, ResolveError> + Send + Sync>;

/// Maps constraint names to constructors.
///
/// Fill it once at startup and share it read-only afterwards; building
/// validators only needs `&Registry`.
///
/// ```rust,ignore
/// let mut registry = Registry::new();
/// registry.register("even", |args| match args.kind() {
///     Kind::Int(_) => Ok(Box::new(Even)),
///     kind => Err(ResolveError::unsupported(args.name(), kind)),
/// });
///
/// let validator = registry.build::<Order>()?;
/// ```
#[derive(Clone)]
pub struct Registry {
    constructors: HashMap<String, Constructor>,
    config: RegistryConfig,
}

impl Registry {
    /// A registry with the built-in constraints and default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// A registry with the built-in constraints.
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut registry = Self::without_builtins(config);
        registry
            .register("required", Required::construct)
            .register("between", Between::construct);
        registry
    }

    /// An empty registry.
    pub fn without_builtins(config: RegistryConfig) -> Self {
        Self {
            constructors: HashMap::new(),
            config,
        }
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&ConstraintArgs<'_>) -> Result<Box<dyn Assertion>, ResolveError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        let replaced = self
            .constructors
            .insert(name.clone(), Arc::new(constructor))
            .is_some();
        tracing::debug!(constraint = %name, replaced, "registered constraint");
        self
    }

    /// Whether a constructor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Builds the assertion for one constraint occurrence.
    pub fn resolve(&self, name: &str, kind: &Kind, raw: &str) -> Result<Box<dyn Assertion>, ResolveError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ResolveError::unknown(name))?;
        constructor(&ConstraintArgs::new(name, kind, raw, &self.config))
    }

    /// Builds a validator for `T`.
    pub fn build<T: Structure>(&self) -> Result<StructValidator, BuildError> {
        self.build_type(&T::structure())
    }

    /// Builds a validator from a description.
    pub fn build_type(&self, structure: &StructType) -> Result<StructValidator, BuildError> {
        SpecBuilder::new(self).build(structure)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("constraints", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{self, AssertionOutcome};
    use crate::kind::IntWidth;

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::new();
        assert_eq!(registry.names(), ["between", "required"]);
        assert!(Registry::without_builtins(RegistryConfig::default())
            .names()
            .is_empty());
    }

    #[test]
    fn unknown_name_fails() {
        let err = Registry::new().resolve("shiny", &Kind::Text, "").unwrap_err();
        assert_eq!(err, ResolveError::unknown("shiny"));
    }

    #[test]
    fn constructor_errors_propagate() {
        let err = Registry::new()
            .resolve("between", &Kind::Bool, "1:2")
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedKind { .. }));
    }

    #[test]
    fn register_replaces() {
        let mut registry = Registry::new();
        registry.register("required", |_| {
            let lenient: Box<dyn Assertion> =
                Box::new(assertion::from_fn("lenient", |_| AssertionOutcome::Pass));
            Ok(lenient)
        });

        let lenient = registry
            .resolve("required", &Kind::Int(IntWidth::I32), "")
            .unwrap();
        assert!(lenient.check(&crate::FieldValue::Optional(None)).is_pass());
        assert_eq!(registry.names().len(), 2);
    }
}
