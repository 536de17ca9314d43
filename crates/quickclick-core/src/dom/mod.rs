//! Host document abstraction.
//!
//! The widget reads computed style, geometry, text and attributes, and writes
//! only the `outline` / `box-shadow` inline styles plus synthetic clicks. A
//! browser host implements [`Document`] over the live DOM; [`Page`] is the
//! in-memory implementation used by the simulator, the CLI and the tests.

mod document;
mod dom_types;
mod page;
mod page_spec;

pub use document::Document;
pub use dom_types::{
    BoundingBox, ComputedStyle, MutationKind, MutationRecord, NodeId, Point, StyleProperty,
    ViewportInfo,
};
pub use page::{ClickRecord, Page};
pub use page_spec::{NodeSpec, PageSpec, StyleSpec};

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
