//! Serializable page snapshots.
//!
//! A [`PageSpec`] describes a page as a tree of [`NodeSpec`]s with explicit
//! geometry and declared style. It is what the CLI reads from JSON and what
//! tests build with the chained constructors below.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dom_types::{BoundingBox, ViewportInfo};

/// Whole-page snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub viewport: ViewportInfo,

    /// The `<body>` subtree.
    pub body: NodeSpec,
}

/// Declared (not computed) style of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

/// One element and its subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,

    /// Own text, rendered before the children's text.
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub attrs: BTreeMap<String, String>,

    /// Layout box; elements without one get [`NodeSpec::DEFAULT_RECT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<BoundingBox>,

    #[serde(default)]
    pub style: StyleSpec,

    /// A click listener registered from script.
    #[serde(default)]
    pub on_click: bool,

    /// Synthetic click dispatch throws.
    #[serde(default)]
    pub block_dispatch: bool,

    /// Direct `click()` throws.
    #[serde(default)]
    pub block_click: bool,

    /// Inline style writes are rejected.
    #[serde(default)]
    pub lock_style: bool,

    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub const DEFAULT_RECT: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 20.0,
    };

    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            text: String::new(),
            attrs: BTreeMap::new(),
            rect: None,
            style: StyleSpec::default(),
            on_click: false,
            block_dispatch: false,
            block_click: false,
            lock_style: false,
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Some(BoundingBox::new(x, y, width, height));
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.style.display = Some(display.into());
        self
    }

    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.style.visibility = Some(visibility.into());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = Some(opacity);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.style.cursor = Some(cursor.into());
        self
    }

    pub fn outline(mut self, outline: impl Into<String>) -> Self {
        self.style.outline = Some(outline.into());
        self
    }

    pub fn box_shadow(mut self, box_shadow: impl Into<String>) -> Self {
        self.style.box_shadow = Some(box_shadow.into());
        self
    }

    pub fn on_click(mut self) -> Self {
        self.on_click = true;
        self
    }

    pub fn block_dispatch(mut self) -> Self {
        self.block_dispatch = true;
        self
    }

    pub fn block_click(mut self) -> Self {
        self.block_click = true;
        self
    }

    pub fn lock_style(mut self) -> Self {
        self.lock_style = true;
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}
