//! Messages delivered by the host runtime.

use serde::{Deserialize, Serialize};

/// A runtime message addressed to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// Stored settings changed; reload them.
    #[serde(rename = "settingsUpdated")]
    SettingsUpdated,
}

impl HostMessage {
    /// Decode a wire message. Unrecognised messages yield `None`.
    pub fn parse(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&HostMessage::SettingsUpdated).unwrap();
        assert_eq!(json, r#"{"type":"settingsUpdated"}"#);
        assert_eq!(HostMessage::parse(&json), Some(HostMessage::SettingsUpdated));
    }

    #[test]
    fn test_unknown_messages_ignored() {
        assert_eq!(HostMessage::parse(r#"{"type":"ping"}"#), None);
        assert_eq!(HostMessage::parse("not json"), None);
    }
}
