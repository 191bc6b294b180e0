//! Registry configuration.

use serde::{Deserialize, Serialize};

/// How the length of text is measured by length constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    /// UTF-8 bytes, the same measure as `str::len`.
    #[default]
    Bytes,
    /// Unicode scalar values.
    Chars,
}

impl LengthMode {
    /// Measures `text` according to this mode.
    #[inline]
    pub fn measure(self, text: &str) -> usize {
        match self {
            LengthMode::Bytes => text.len(),
            LengthMode::Chars => text.chars().count(),
        }
    }
}

/// Settings handed to every constraint constructor.
///
/// Deserializable so services can keep it next to the rest of their
/// configuration; missing keys take their defaults.
///
/// ```rust,ignore
/// let config: RegistryConfig = serde_json::from_str(r#"{ "length_mode": "chars" }"#)?;
/// let registry = Registry::with_config(config);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Measure used for text in length constraints.
    pub length_mode: LengthMode,
}
