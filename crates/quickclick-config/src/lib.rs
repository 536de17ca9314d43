//! # QuickClick Config
//!
//! User settings, the settings persistence collaborator, and engine tuning
//! for QuickClick.

mod error;
mod loader;
mod settings;
mod store;
mod tuning;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{normalize_key, Language, Settings, SettingsPatch};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use tuning::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
