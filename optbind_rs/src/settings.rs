//! Parser behaviour knobs.
//!
//! Defaults reproduce the classic behaviour; hosts can tighten them in code
//! or load them from a small TOML file.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Settings consulted by both parsing engines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Reject non-numeric integer values instead of reading them as 0.
    pub strict_integers: bool,
    /// Ignore leading whitespace before the `#` / `;` comment check.
    pub trim_before_comment: bool,
    /// Longest accepted config line in bytes; `None` means unbounded.
    pub max_line_len: Option<usize>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            strict_integers: false,
            trim_before_comment: true,
            max_line_len: None,
        }
    }
}

impl ParserSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    /// Returns defaults if the file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = ParserSettings::default();
        assert!(!settings.strict_integers);
        assert!(settings.trim_before_comment);
        assert_eq!(settings.max_line_len, None);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let settings = ParserSettings::load_from_path(&temp.path().join("optbind.toml"));
        assert_eq!(settings, ParserSettings::default());
    }

    #[test]
    fn test_load_valid_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("optbind.toml");
        let mut file = std::fs::File::create(&path).expect("create settings");
        writeln!(
            file,
            r#"
strict_integers = true
trim_before_comment = false
max_line_len = 256
"#
        )
        .expect("write settings");

        let settings = ParserSettings::load_from_path(&path);
        assert!(settings.strict_integers);
        assert!(!settings.trim_before_comment);
        assert_eq!(settings.max_line_len, Some(256));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = ParserSettings::from_toml_str("strict_integers = true").expect("parse");
        assert!(settings.strict_integers);
        assert!(settings.trim_before_comment);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("optbind.toml");
        std::fs::write(&path, "strict_integers = \"very\"").expect("write settings");
        assert_eq!(
            ParserSettings::load_from_path(&path),
            ParserSettings::default()
        );
        assert!(ParserSettings::from_toml_str("strict_integers = \"very\"").is_err());
    }
}
