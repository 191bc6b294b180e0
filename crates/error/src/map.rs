//! Code-indexed lookup of declared errors.

use std::collections::HashMap;

use crate::{ApiError, CodeError};

/// A lookup table from error code to the declared [`CodeError`].
///
/// Useful for turning codes received from another service back into the
/// error values this service declared.
#[derive(Debug, Clone, Default)]
pub struct ErrorMap {
    errors: HashMap<String, CodeError>,
}

impl ErrorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error under its own code, replacing any previous entry.
    pub fn insert(&mut self, error: CodeError) -> &mut Self {
        self.errors.insert(error.code().to_owned(), error);
        self
    }

    /// Returns the error declared for `code`.
    pub fn resolve(&self, code: &str) -> Option<&CodeError> {
        self.errors.get(code)
    }

    /// Number of declared errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error has been declared.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl FromIterator<CodeError> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = CodeError>>(iter: I) -> Self {
        let mut map = Self::new();
        for error in iter {
            map.insert(error);
        }
        map
    }
}
