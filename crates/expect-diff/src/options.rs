//! Caller configuration.
//!
//! Options are plain data so they can be written by hand or loaded from a
//! reporter's JSON config:
//!
//! ```json
//! {
//!   "matchers": {
//!     "toEqual": { "pattern": "Expected ([\\s\\S]*) to equal ([\\s\\S]*)\\.$", "reverse": true },
//!     "toMatchShape": { "pattern": "Shape ([\\s\\S]*) differs from ([\\s\\S]*)\\.$" }
//!   },
//!   "multiline": false
//! }
//! ```
//!
//! Matchers are merged into the built-in registry by name: an entry named
//! like a built-in replaces it in the built-in's position, other entries are
//! appended after the built-ins in the order they are listed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matchers::{MatcherConfig, MatcherRegistry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Matchers to add to, or override in, the built-in registry.
    pub matchers: IndexMap<String, MatcherConfig>,
    /// Trim whitespace and punctuation around each replaced operand. Meant
    /// for formatters that render operands on lines of their own.
    pub multiline: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_matcher(mut self, name: impl Into<String>, config: MatcherConfig) -> Self {
        self.matchers.insert(name.into(), config);
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// The built-in registry with these options' matchers merged in.
    pub fn registry(&self) -> Result<MatcherRegistry> {
        let mut registry = MatcherRegistry::jasmine();
        registry.extend(&self.matchers)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use crate::formatter::Comparison;

    #[test]
    fn json_defaults() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options, Options::default());

        let options =
            Options::from_json(r#"{"matchers": {"x": {"pattern": "(a)(b)"}}}"#).unwrap();
        let config = &options.matchers["x"];
        assert!(!config.reverse);
        assert_eq!(config.comparison, None);
    }

    #[test]
    fn json_comparison_names() {
        let options = Options::from_json(
            r#"{"matchers": {"x": {"pattern": "(a)(b)", "comparison": "identity"}}}"#,
        )
        .unwrap();
        assert_eq!(options.matchers["x"].comparison, Some(Comparison::Identity));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Options::from_json("{matchers").unwrap_err();
        assert!(matches!(err, DiffError::Config(_)));
    }

    #[test]
    fn override_keeps_position_and_comparison() {
        let options = Options::new()
            .with_matcher("custom", MatcherConfig::new(r"Custom (.*) vs (.*)\.$"))
            .with_matcher("toBe", MatcherConfig::new(r"Got (.*) wanted (.*)\.$"));
        let registry = options.registry().unwrap();
        let names: Vec<&str> = registry.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["toBe", "toEqual", "custom"]);

        let to_be = registry.get("toBe").unwrap();
        assert_eq!(to_be.pattern(), r"Got (.*) wanted (.*)\.$");
        assert!(!to_be.is_reverse());
        assert_eq!(to_be.comparison(), Comparison::Identity);
        assert_eq!(registry.get("custom").unwrap().comparison(), Comparison::Equality);
    }
}
