use super::*;

#[test]
fn test_validate_defaults() {
    let result = ConfigValidator::validate(&Tuning::default(), &Settings::default()).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_delay() {
    let mut tuning = Tuning::default();
    tuning.timing.search_debounce_ms = 0;

    let result = ConfigValidator::validate(&tuning, &Settings::default()).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "timing.search_debounce_ms"));
}

#[test]
fn test_validate_short_manual_debounce_warning() {
    let mut tuning = Tuning::default();
    tuning.timing.manual_search_debounce_ms = 50;

    let result = ConfigValidator::validate(&tuning, &Settings::default()).unwrap();
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "timing.manual_search_debounce_ms"));
}

#[test]
fn test_validate_long_guard_warning() {
    let mut tuning = Tuning::default();
    tuning.timing.mutation_guard_ms = 2000;

    let result = ConfigValidator::validate(&tuning, &Settings::default()).unwrap();
    assert!(result.warnings.iter().any(|w| w.path == "timing.mutation_guard_ms"));
}

#[test]
fn test_validate_empty_outline() {
    let mut tuning = Tuning::default();
    tuning.highlight.candidate_outline = "  ".to_string();

    let result = ConfigValidator::validate(&tuning, &Settings::default()).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "highlight.candidate_outline"));
}

#[test]
fn test_validate_panel() {
    let mut tuning = Tuning::default();
    tuning.panel.width = 0.0;
    tuning.panel.margin = -1.0;

    let result = ConfigValidator::validate(&tuning, &Settings::default()).unwrap();
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_empty_open_key() {
    let settings = Settings {
        open_key: String::new(),
        ..Default::default()
    };
    let result = ConfigValidator::validate(&Tuning::default(), &settings).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "openKey"));
}

#[test]
fn test_validate_lowercase_key_name_warning() {
    let settings = Settings {
        open_key: "space".to_string(),
        ..Default::default()
    };
    let result = ConfigValidator::validate(&Tuning::default(), &settings).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "openKey"));
}

#[test]
fn test_validate_named_key_ok() {
    let settings = Settings {
        open_key: "Space".to_string(),
        ..Default::default()
    };
    let result = ConfigValidator::validate(&Tuning::default(), &settings).unwrap();
    assert!(result.warnings.is_empty());
}
