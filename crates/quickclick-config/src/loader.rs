//! Tuning loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::tuning::Tuning;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Tuning loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file.
    pub fn load(path: &Path) -> Result<Tuning, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load tuning from a string.
    pub fn load_str(content: &str) -> Result<Tuning, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let tuning: Tuning = toml::from_str(&expanded)?;
        Ok(tuning)
    }

    /// Load from `path` when given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Tuning, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Tuning::default()),
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty() {
        let tuning = ConfigLoader::load_str("").unwrap();
        assert_eq!(tuning.timing.search_debounce_ms, 120);
    }

    #[test]
    fn test_load_sections() {
        let content = r#"
            [timing]
            manual_navigation_ms = 1200

            [highlight]
            candidate_outline = "2px dashed red"

            [panel]
            margin = 12.0
        "#;
        let tuning = ConfigLoader::load_str(content).unwrap();
        assert_eq!(tuning.timing.manual_navigation_ms, 1200);
        assert_eq!(tuning.highlight.candidate_outline, "2px dashed red");
        assert_eq!(tuning.panel.margin, 12.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timing]").unwrap();
        writeln!(file, "mutation_guard_ms = 200").unwrap();

        let tuning = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(tuning.timing.mutation_guard_ms, 200);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/quickclick.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default() {
        let tuning = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(tuning.panel.width, 360.0);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("timing = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("QUICKCLICK_TEST_OUTLINE", "1px solid green");
        }
        let content = "[highlight]\nselected_outline = \"${QUICKCLICK_TEST_OUTLINE}\"";
        let tuning = ConfigLoader::load_str(content).unwrap();
        assert_eq!(tuning.highlight.selected_outline, "1px solid green");
        unsafe {
            std::env::remove_var("QUICKCLICK_TEST_OUTLINE");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${QUICKCLICK_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/quickclick");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/quickclick"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/etc/quickclick"), "/etc/quickclick");
    }
}
