//! User-facing settings.
//!
//! The host owns persistence; the widget only ever sees a fully merged
//! [`Settings`] value. Keys use the camelCase names of the stored blob.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status text language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// Spanish, the primary locale and the lookup fallback.
    #[default]
    Es,
    /// English.
    En,
}

impl Language {
    /// Locale used when a code or a template is missing.
    pub const FALLBACK: Language = Language::Es;

    /// Parse a language code. Unknown codes map to the fallback locale.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "es" => Language::Es,
            _ => Self::FALLBACK,
        }
    }

    /// Wire code of this language.
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Open the panel as soon as the page loads.
    #[serde(default = "default_true")]
    pub auto_open: bool,

    /// Page key that toggles the panel. A space is stored as `"Space"`.
    #[serde(default = "default_open_key")]
    pub open_key: String,

    /// Also match `title`, `aria-label` and `placeholder`.
    #[serde(default)]
    pub include_attrs: bool,

    #[serde(default)]
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_open: default_true(),
            open_key: default_open_key(),
            include_attrs: false,
            language: Language::default(),
        }
    }
}

impl Settings {
    /// Return a copy with every field present in `patch` overridden.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut out = self.clone();
        if let Some(v) = patch.auto_open {
            out.auto_open = v;
        }
        if let Some(ref v) = patch.open_key {
            out.open_key = normalize_key(v);
        }
        if let Some(v) = patch.include_attrs {
            out.include_attrs = v;
        }
        if let Some(v) = patch.language {
            out.language = v;
        }
        out
    }

    /// A patch that writes every field of `self`.
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            auto_open: Some(self.auto_open),
            open_key: Some(self.open_key.clone()),
            include_attrs: Some(self.include_attrs),
            language: Some(self.language),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_open_key() -> String {
    "-".to_string()
}

/// Partial settings update, as written by a settings UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_open: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_attrs: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.auto_open.is_none()
            && self.open_key.is_none()
            && self.include_attrs.is_none()
            && self.language.is_none()
    }
}

/// Normalize a raw key name the way the open-key setting stores it.
pub fn normalize_key(key: &str) -> String {
    if key == " " {
        "Space".to_string()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_open);
        assert_eq!(settings.open_key, "-");
        assert!(!settings.include_attrs);
        assert_eq!(settings.language, Language::Es);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["autoOpen"], true);
        assert_eq!(json["openKey"], "-");
        assert_eq!(json["includeAttrs"], false);
        assert_eq!(json["language"], "es");
    }

    #[test]
    fn test_partial_blob_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"language":"en"}"#).unwrap();
        assert_eq!(settings.language, Language::En);
        assert!(settings.auto_open);
        assert_eq!(settings.open_key, "-");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let settings: Settings = serde_json::from_str(r#"{"language":"fr"}"#).unwrap();
        assert_eq!(settings.language, Language::FALLBACK);
        assert_eq!(Language::from_code(" EN "), Language::En);
    }

    #[test]
    fn test_merged() {
        let patch = SettingsPatch {
            include_attrs: Some(true),
            open_key: Some("q".to_string()),
            ..Default::default()
        };
        let merged = Settings::default().merged(&patch);
        assert!(merged.include_attrs);
        assert_eq!(merged.open_key, "q");
        assert!(merged.auto_open);
    }

    #[test]
    fn test_merged_normalizes_open_key() {
        let patch = SettingsPatch {
            open_key: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(Settings::default().merged(&patch).open_key, "Space");
    }

    #[test]
    fn test_patch_skips_none() {
        let patch = SettingsPatch {
            auto_open: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"autoOpen":false}"#);
        assert!(!patch.is_empty());
        assert!(SettingsPatch::default().is_empty());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" "), "Space");
        assert_eq!(normalize_key("-"), "-");
    }
}
