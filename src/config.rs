//! Generator configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StructgenError;

/// Options controlling generation and emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package name written on the first line of the listing.
    pub package: String,

    /// Emit optional object-typed fields as pointers (`*Address`).
    pub non_required_as_pointer: bool,
}

fn default_package() -> String {
    "main".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            non_required_as_pointer: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, StructgenError> {
        let config: Self =
            toml::from_str(input).map_err(|e| StructgenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StructgenError> {
        let input = fs::read_to_string(path.as_ref()).map_err(|e| {
            StructgenError::Config(format!(
                "failed to read '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&input)
    }

    /// Applies command-line style overrides on top of loaded settings. A
    /// `true` pointer flag turns pointer mode on; `false` leaves it as loaded.
    pub fn with_overrides(mut self, package: Option<&str>, pointers: bool) -> Self {
        if let Some(package) = package {
            self.package = package.to_string();
        }
        if pointers {
            self.non_required_as_pointer = true;
        }
        self
    }

    pub fn validate(&self) -> Result<(), StructgenError> {
        if self.package.trim().is_empty() {
            return Err(StructgenError::Config(
                "package must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GeneratorConfig;
    use test_case::test_case;

    #[test]
    fn defaults_match_plain_output() {
        let config = GeneratorConfig::new();
        assert_eq!(config.package, "main");
        assert!(!config.non_required_as_pointer);
    }

    #[test_case("", "main", false)]
    #[test_case("package = \"models\"", "models", false)]
    #[test_case("non_required_as_pointer = true", "main", true)]
    #[test_case("package = \"api\"\nnon_required_as_pointer = true", "api", true)]
    fn parses_toml(input: &str, package: &str, pointers: bool) {
        let config = GeneratorConfig::from_toml_str(input).unwrap();
        assert_eq!(config.package, package);
        assert_eq!(config.non_required_as_pointer, pointers);
    }

    #[test_case("package = \"\""; "empty package")]
    #[test_case("package = 3"; "wrong value type")]
    #[test_case("package = "; "malformed toml")]
    fn rejects_invalid_toml(input: &str) {
        let err = GeneratorConfig::from_toml_str(input).unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test_case("package = \"models\"", None, false, "models", false; "file only")]
    #[test_case("package = \"models\"", Some("api"), false, "api", false; "flag package wins")]
    #[test_case("", None, true, "main", true; "flag enables pointers")]
    #[test_case("non_required_as_pointer = true", None, false, "main", true; "absent flag keeps file pointers")]
    #[test_case("package = \"models\"\nnon_required_as_pointer = true", Some("api"), true, "api", true; "both flags")]
    fn flags_override_file_settings(
        file: &str,
        package: Option<&str>,
        pointers: bool,
        expected_package: &str,
        expected_pointers: bool,
    ) {
        let config = GeneratorConfig::from_toml_str(file)
            .unwrap()
            .with_overrides(package, pointers);
        assert_eq!(config.package, expected_package);
        assert_eq!(config.non_required_as_pointer, expected_pointers);
    }

    #[test]
    fn empty_package_override_fails_validation() {
        let config = GeneratorConfig::default().with_overrides(Some(" "), false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = GeneratorConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
