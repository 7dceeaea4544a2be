//! Scanner configuration.
//!
//! ```toml
//! dialect = "postgres"
//! separator = "\n"
//! prefix = ""
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};

/// Rendering options, deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub dialect: Dialect,

    /// Text between top-level clauses
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Text written before every statement
    #[serde(default)]
    pub prefix: String,
}

fn default_separator() -> String {
    " ".to_string()
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            separator: default_separator(),
            prefix: String::new(),
        }
    }
}

impl ScannerConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml(input: &str) -> QueryResult<Self> {
        let config: ScannerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scanner config");
        let input = std::fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    fn validate(&self) -> QueryResult<()> {
        if self.separator.is_empty() {
            return Err(QueryError::Config(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = ScannerConfig::from_toml("").unwrap();
        assert_eq!(config, ScannerConfig::default());
        assert_eq!(config.separator, " ");
    }

    #[test]
    fn test_parse_full_config() {
        let config = ScannerConfig::from_toml(
            r#"
            dialect = "postgres"
            separator = "\n"
            prefix = "\n"
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::Postgres);
        assert_eq!(config.separator, "\n");
        assert_eq!(config.prefix, "\n");
    }

    #[test]
    fn test_empty_separator_rejected() {
        let err = ScannerConfig::from_toml("separator = \"\"").unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = ScannerConfig::from_toml("dialect = \"oracle\"").unwrap_err();
        assert!(matches!(err, QueryError::Toml(_)));
    }
}
