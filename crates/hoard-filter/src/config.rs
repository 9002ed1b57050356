//! Filter configuration

use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// Default separator between field name and operator in a criterion key
pub const DEFAULT_SEPARATOR: &str = "__";

/// How records are deduplicated across the two filter phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// One identity set for the whole call; no record is yielded twice
    #[default]
    Global,

    /// Operator phase and equality phase deduplicate independently, so a
    /// record matched by both kinds of criteria is yielded twice
    PerPhase,
}

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Separator between field and operator (`field__op`)
    pub separator: String,
    /// Deduplication policy
    pub dedup: DedupPolicy,
}

impl FilterConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With operator separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// With deduplication policy
    #[inline]
    #[must_use]
    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Load configuration from a TOML document
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidConfig`] if the document does not parse
    /// or the result fails [`FilterConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, FilterError> {
        let config: Self =
            toml::from_str(source).map_err(|e| FilterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidConfig`] if the separator is empty.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.separator.is_empty() {
            return Err(FilterError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            dedup: DedupPolicy::Global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FilterConfig::new();
        assert_eq!(config.separator, "__");
        assert_eq!(config.dedup, DedupPolicy::Global);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let config = FilterConfig::new()
            .with_separator("::")
            .with_dedup(DedupPolicy::PerPhase);
        assert_eq!(config.separator, "::");
        assert_eq!(config.dedup, DedupPolicy::PerPhase);
    }

    #[test]
    fn from_toml_partial() {
        let config = FilterConfig::from_toml_str(r#"dedup = "per_phase""#).unwrap();
        assert_eq!(config.separator, "__");
        assert_eq!(config.dedup, DedupPolicy::PerPhase);
    }

    #[test]
    fn from_toml_rejects_empty_separator() {
        let result = FilterConfig::from_toml_str(r#"separator = """#);
        assert!(matches!(result, Err(FilterError::InvalidConfig(_))));
    }

    #[test]
    fn from_toml_rejects_unknown_policy() {
        let result = FilterConfig::from_toml_str(r#"dedup = "sometimes""#);
        assert!(matches!(result, Err(FilterError::InvalidConfig(_))));
    }
}
