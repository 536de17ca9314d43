//! Localised panel text.

use quickclick_config::Language;

/// A user-visible string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Placeholder,
    Hint,
    Typing,
    NoResults,
    /// `selected` is 1-based.
    Matches { count: usize, selected: usize },
    Activated,
    Nothing,
    Close,
    DragHandle,
}

impl Message {
    fn key(&self) -> &'static str {
        match self {
            Message::Placeholder => "placeholder",
            Message::Hint => "hint",
            Message::Typing => "typing",
            Message::NoResults => "noResults",
            Message::Matches { .. } => "nResults",
            Message::Activated => "activated",
            Message::Nothing => "nothing",
            Message::Close => "close",
            Message::DragHandle => "drag",
        }
    }
}

fn template(lang: Language, key: &str) -> Option<&'static str> {
    let text = match (lang, key) {
        (Language::Es, "placeholder") => "Escribe para buscar elementos clicables...",
        (Language::Es, "hint") => "Pulsa Enter para activar. Tab/↓ para siguiente.",
        (Language::Es, "typing") => "Escribe para buscar...",
        (Language::Es, "noResults") => "No se han encontrado coincidencias.",
        (Language::Es, "nResults") => "{count} coincidencia(s). Seleccionado: {selected}",
        (Language::Es, "activated") => "Elemento activado.",
        (Language::Es, "nothing") => "No hay nada para activar.",
        (Language::Es, "close") => "Cerrar",
        (Language::Es, "drag") => "Arrastrar",

        (Language::En, "placeholder") => "Type to find clickable elements...",
        (Language::En, "hint") => "Press Enter to activate. Tab/↓ for next.",
        (Language::En, "typing") => "Type to search...",
        (Language::En, "noResults") => "No results found.",
        (Language::En, "nResults") => "{count} match(es). Selected: {selected}",
        (Language::En, "activated") => "Element activated.",
        (Language::En, "nothing") => "Nothing to activate.",
        (Language::En, "close") => "Close",
        (Language::En, "drag") => "Drag",

        _ => return None,
    };
    Some(text)
}

/// Render `message` in `lang`, falling back to the primary locale.
pub fn translate(lang: Language, message: &Message) -> String {
    let key = message.key();
    let text = template(lang, key)
        .or_else(|| template(Language::FALLBACK, key))
        .unwrap_or_default();
    match message {
        Message::Matches { count, selected } => text
            .replace("{count}", &count.to_string())
            .replace("{selected}", &selected.to_string()),
        _ => text.to_string(),
    }
}
