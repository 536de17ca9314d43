//! The `Document` trait: the widget's only view of the page.

use super::dom_types::{BoundingBox, ComputedStyle, NodeId, StyleProperty, ViewportInfo};
use crate::error::DomResult;

/// Read/write surface of a host document.
///
/// Every per-node method fails with [`DomError::Detached`] once the node has
/// left the document. Callers treat any error as "skip this element".
///
/// [`DomError::Detached`]: crate::error::DomError::Detached
pub trait Document {
    /// All connected elements in document (pre-)order.
    fn elements(&self) -> Vec<NodeId>;

    fn is_connected(&self, node: NodeId) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self, node: NodeId) -> DomResult<String>;

    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>>;

    /// Whether a click listener was registered from script.
    fn has_click_listener(&self, node: NodeId) -> DomResult<bool>;

    fn computed_style(&self, node: NodeId) -> DomResult<ComputedStyle>;

    fn bounding_box(&self, node: NodeId) -> DomResult<BoundingBox>;

    /// Rendered text of the element and its rendered descendants.
    fn rendered_text(&self, node: NodeId) -> DomResult<String>;

    /// DOM `contains`: true when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> DomResult<bool>;

    /// Current inline value, empty when unset.
    fn inline_style(&self, node: NodeId, property: StyleProperty) -> DomResult<String>;

    /// Write an inline value; an empty value removes the property.
    fn set_inline_style(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> DomResult<()>;

    fn focus(&mut self, node: NodeId) -> DomResult<()>;

    /// Dispatch a bubbling, cancelable synthetic `click` event.
    fn dispatch_click(&mut self, node: NodeId) -> DomResult<()>;

    /// Invoke the element's own `click()`.
    fn click(&mut self, node: NodeId) -> DomResult<()>;

    fn scroll_into_view(&mut self, node: NodeId) -> DomResult<()>;

    fn viewport(&self) -> ViewportInfo;

    /// Start delivering child-list, attribute and text mutations.
    fn observe_mutations(&mut self);

    fn disconnect_mutations(&mut self);
}
