//! Configuration validation.

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate tuning and settings together.
    pub fn validate(tuning: &Tuning, settings: &Settings) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_timing(tuning, &mut result);
        Self::validate_highlight(tuning, &mut result);
        Self::validate_panel(tuning, &mut result);
        Self::validate_settings(settings, &mut result);

        Ok(result)
    }

    fn validate_timing(tuning: &Tuning, result: &mut ValidationResult) {
        let timing = &tuning.timing;
        let delays = [
            ("timing.search_debounce_ms", timing.search_debounce_ms),
            ("timing.manual_search_debounce_ms", timing.manual_search_debounce_ms),
            ("timing.manual_navigation_ms", timing.manual_navigation_ms),
            ("timing.mutation_guard_ms", timing.mutation_guard_ms),
            ("timing.user_interaction_ms", timing.user_interaction_ms),
        ];
        for (path, value) in delays {
            if value == 0 {
                result.add_error(ValidationError::new(path, "delay must be greater than 0"));
            }
        }

        if timing.manual_search_debounce_ms < timing.search_debounce_ms {
            result.add_warning(ValidationWarning::new(
                "timing.manual_search_debounce_ms",
                "manual debounce is shorter than the default debounce; re-searches may override manual selection",
            ));
        }

        if timing.mutation_guard_ms > timing.search_debounce_ms * 4 {
            result.add_warning(ValidationWarning::new(
                "timing.mutation_guard_ms",
                "mutation guard is much longer than the debounce; page updates may be missed",
            ));
        }
    }

    fn validate_highlight(tuning: &Tuning, result: &mut ValidationResult) {
        let highlight = &tuning.highlight;
        if highlight.candidate_outline.trim().is_empty() {
            result.add_error(ValidationError::new(
                "highlight.candidate_outline",
                "candidate outline cannot be empty",
            ));
        }
        if highlight.selected_outline.trim().is_empty() {
            result.add_error(ValidationError::new(
                "highlight.selected_outline",
                "selected outline cannot be empty",
            ));
        }
        if highlight.min_candidate_size < 0.0 {
            result.add_error(ValidationError::new(
                "highlight.min_candidate_size",
                "minimum candidate size cannot be negative",
            ));
        }
    }

    fn validate_panel(tuning: &Tuning, result: &mut ValidationResult) {
        let panel = &tuning.panel;
        if panel.width <= 0.0 || panel.height <= 0.0 {
            result.add_error(ValidationError::new("panel", "panel size must be positive"));
        }
        if panel.margin < 0.0 {
            result.add_error(ValidationError::new("panel.margin", "margin cannot be negative"));
        }
    }

    fn validate_settings(settings: &Settings, result: &mut ValidationResult) {
        if settings.open_key.is_empty() {
            result.add_error(ValidationError::new("openKey", "open key cannot be empty"));
        }
        if settings.open_key.chars().count() > 1
            && settings.open_key.chars().all(|c| c.is_ascii_lowercase())
        {
            result.add_warning(ValidationWarning::new(
                "openKey",
                format!(
                    "'{}' does not look like a key name; named keys are capitalized (e.g. 'Space', 'F2')",
                    settings.open_key
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
