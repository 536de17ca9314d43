//! Settings subcommand handlers for QuickClick.

use anyhow::{Context, Result, bail};

use quickclick_config::{Language, Settings, SettingsPatch, SettingsStore, normalize_key};

use crate::cli::SettingsAction;

/// Handle settings subcommands.
pub(crate) fn handle_settings_command<S: SettingsStore>(action: SettingsAction, mut store: S) -> Result<()> {
    match action {
        SettingsAction::Show => {}
        SettingsAction::Set {
            auto_open,
            open_key,
            include_attrs,
            language,
        } => {
            let patch = build_patch(auto_open, open_key, include_attrs, language)?;
            store.set(&patch).context("writing settings")?;
        }
        SettingsAction::Reset => {
            store.reset(&Settings::default()).context("resetting settings")?;
        }
    }

    let settings = store.get(&Settings::default()).context("reading settings")?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn build_patch(
    auto_open: Option<bool>,
    open_key: Option<String>,
    include_attrs: Option<bool>,
    language: Option<String>,
) -> Result<SettingsPatch> {
    let language = match language.as_deref() {
        None => None,
        Some(code) => match code.trim().to_ascii_lowercase().as_str() {
            "es" | "en" => Some(Language::from_code(code)),
            other => bail!("unsupported language '{other}' (expected es or en)"),
        },
    };
    let patch = SettingsPatch {
        auto_open,
        open_key: open_key.map(|k| normalize_key(&k)),
        include_attrs,
        language,
    };
    if patch.is_empty() {
        bail!("nothing to set; pass at least one of --auto-open, --open-key, --include-attrs, --language");
    }
    Ok(patch)
}
