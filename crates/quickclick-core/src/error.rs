//! Error types.

use quickclick_config::ConfigError;
use thiserror::Error;

use crate::dom::{NodeId, StyleProperty};

/// Per-element document access failures.
///
/// None of these abort a batch: the caller skips the element and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    /// The node was removed from the document.
    #[error("Node {0} is no longer in the document")]
    Detached(NodeId),

    /// The id never belonged to this document.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// The host refused an inline style write.
    #[error("Style write rejected on {node}: {property}")]
    StyleRejected { node: NodeId, property: StyleProperty },

    /// Click delivery threw.
    #[error("Click failed on {node}: {reason}")]
    DispatchFailed { node: NodeId, reason: String },
}

/// Result type for document operations.
pub type DomResult<T> = Result<T, DomError>;

/// Failures while loading or replaying a simulated session.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A step named an element id the page does not have.
    #[error("No element with id '{0}'")]
    UnknownElement(String),

    #[error("Invalid page: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid script: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_display() {
        let err = DomError::Detached(NodeId(7));
        assert_eq!(err.to_string(), "Node #7 is no longer in the document");
    }

    #[test]
    fn test_style_rejected_display() {
        let err = DomError::StyleRejected {
            node: NodeId(3),
            property: StyleProperty::BoxShadow,
        };
        let display = err.to_string();
        assert!(display.contains("#3"));
        assert!(display.contains("box-shadow"));
    }

    #[test]
    fn test_unknown_element_display() {
        let err = SimError::UnknownElement("save".to_string());
        assert_eq!(err.to_string(), "No element with id 'save'");
    }

    #[test]
    fn test_dom_error_is_transparent() {
        let err: SimError = DomError::Detached(NodeId(2)).into();
        assert_eq!(err.to_string(), "Node #2 is no longer in the document");
    }

    #[test]
    fn test_dispatch_failed_display() {
        let err = DomError::DispatchFailed {
            node: NodeId(1),
            reason: "blocked".to_string(),
        };
        assert!(err.to_string().contains("blocked"));
    }
}
