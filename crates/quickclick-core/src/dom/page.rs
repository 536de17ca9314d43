//! In-memory [`Document`] implementation.

use std::collections::{BTreeMap, HashMap};

use super::document::Document;
use super::dom_types::{
    BoundingBox, ComputedStyle, MutationKind, MutationRecord, NodeId, StyleProperty, ViewportInfo,
};
use super::page_spec::{NodeSpec, PageSpec, StyleSpec};
use crate::error::{DomError, DomResult};

/// A click that reached an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    pub target: NodeId,
    /// Dispatched as a synthetic event rather than through `click()`.
    pub synthetic: bool,
}

#[derive(Debug, Clone)]
struct PageNode {
    tag: String,
    text: String,
    attrs: BTreeMap<String, String>,
    rect: BoundingBox,
    style: StyleSpec,
    inline: HashMap<StyleProperty, String>,
    on_click: bool,
    block_dispatch: bool,
    block_click: bool,
    lock_style: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    connected: bool,
}

/// A page held entirely in memory.
///
/// Layout is not computed: every element carries the box it was built with,
/// except that elements under a `display:none` ancestor report an empty box.
/// Node ids index an append-only arena, so removed nodes stay resolvable as
/// `Detached` and ids are never reused.
#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<PageNode>,
    body: NodeId,
    viewport: ViewportInfo,
    observing: bool,
    mutations: Vec<MutationRecord>,
    clicks: Vec<ClickRecord>,
    focused: Option<NodeId>,
    scrolled: Vec<NodeId>,
    style_writes: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(ViewportInfo::default())
    }
}

impl Page {
    /// An empty page whose `<body>` fills the viewport.
    pub fn new(viewport: ViewportInfo) -> Self {
        let body = NodeSpec::new("body");
        Self::build(viewport, &body)
    }

    pub fn from_spec(spec: &PageSpec) -> Self {
        Self::build(spec.viewport.clone(), &spec.body)
    }

    /// Parse a JSON [`PageSpec`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let spec: PageSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    fn build(viewport: ViewportInfo, body: &NodeSpec) -> Self {
        let mut page = Self {
            nodes: Vec::new(),
            body: NodeId(0),
            viewport,
            observing: false,
            mutations: Vec::new(),
            clicks: Vec::new(),
            focused: None,
            scrolled: Vec::new(),
            style_writes: 0,
        };
        let full = BoundingBox::new(
            0.0,
            0.0,
            page.viewport.width as f64,
            page.viewport.height as f64,
        );
        page.body = page.insert(None, body, Some(full));
        page
    }

    fn insert(&mut self, parent: Option<NodeId>, spec: &NodeSpec, fallback: Option<BoundingBox>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut inline = HashMap::new();
        if let Some(ref outline) = spec.style.outline {
            inline.insert(StyleProperty::Outline, outline.clone());
        }
        if let Some(ref shadow) = spec.style.box_shadow {
            inline.insert(StyleProperty::BoxShadow, shadow.clone());
        }
        self.nodes.push(PageNode {
            tag: spec.tag.to_ascii_lowercase(),
            text: spec.text.clone(),
            attrs: spec.attrs.clone(),
            rect: spec
                .rect
                .or(fallback)
                .unwrap_or(NodeSpec::DEFAULT_RECT),
            style: spec.style.clone(),
            inline,
            on_click: spec.on_click,
            block_dispatch: spec.block_dispatch,
            block_click: spec.block_click,
            lock_style: spec.lock_style,
            parent,
            children: Vec::new(),
            connected: true,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        for child in &spec.children {
            self.insert(Some(id), child, None);
        }
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&PageNode> {
        let node = self
            .nodes
            .get(id.0 as usize)
            .ok_or(DomError::UnknownNode(id))?;
        if !node.connected {
            return Err(DomError::Detached(id));
        }
        Ok(node)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut PageNode> {
        let node = self
            .nodes
            .get_mut(id.0 as usize)
            .ok_or(DomError::UnknownNode(id))?;
        if !node.connected {
            return Err(DomError::Detached(id));
        }
        Ok(node)
    }

    fn record(&mut self, target: NodeId, kind: MutationKind) {
        if self.observing {
            self.mutations.push(MutationRecord { target, kind });
        }
    }

    /// Walk from `id` (inclusive) up to the root.
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &PageNode> + '_ {
        let mut next = self.nodes.get(id.0 as usize);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.and_then(|p| self.nodes.get(p.0 as usize));
            Some(current)
        })
    }

    /// Visibility inherits, so the nearest declared value wins.
    fn visibility_hidden(&self, id: NodeId) -> bool {
        self.ancestors(id)
            .find_map(|n| n.style.visibility.as_deref())
            .is_some_and(|v| v == "hidden")
    }

    /// Text of `id` and its rendered descendants. A `visibility:hidden`
    /// element contributes no text of its own but its visible children do.
    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        let node = &self.nodes[id.0 as usize];
        let own = node.text.trim();
        if !own.is_empty() && !self.visibility_hidden(id) {
            out.push(own.to_string());
        }
        for &child in &node.children {
            let child_node = &self.nodes[child.0 as usize];
            if child_node.style.display.as_deref() == Some("none") {
                continue;
            }
            self.collect_text(child, out);
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a subtree under `parent`.
    pub fn append(&mut self, parent: NodeId, spec: &NodeSpec) -> DomResult<NodeId> {
        self.node(parent)?;
        let id = self.insert(Some(parent), spec, None);
        self.record(parent, MutationKind::ChildList);
        Ok(id)
    }

    /// Detach `id` and its subtree.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        let parent = self.node(id)?.parent;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0 as usize];
            node.connected = false;
            stack.extend(node.children.iter().copied());
        }
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.retain(|&c| c != id);
        }
        if self.focused.is_some_and(|f| !self.nodes[f.0 as usize].connected) {
            self.focused = None;
        }
        self.record(parent.unwrap_or(id), MutationKind::ChildList);
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?.text = text.into();
        self.record(id, MutationKind::CharacterData);
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        self.node_mut(id)?.attrs.insert(name.into(), value.into());
        self.record(id, MutationKind::Attributes);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.node_mut(id)?.attrs.remove(name);
        self.record(id, MutationKind::Attributes);
        Ok(())
    }

    /// Change the declared `display` value (`None` restores the default).
    pub fn set_display(&mut self, id: NodeId, display: Option<&str>) -> DomResult<()> {
        self.node_mut(id)?.style.display = display.map(str::to_string);
        self.record(id, MutationKind::Attributes);
        Ok(())
    }

    /// First connected element whose `id` attribute equals `dom_id`.
    pub fn get_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.elements().into_iter().find(|&id| {
            self.nodes[id.0 as usize]
                .attrs
                .get("id")
                .is_some_and(|v| v == dom_id)
        })
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn pending_mutations(&self) -> &[MutationRecord] {
        &self.mutations
    }

    /// Drain the records queued since the last call.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    pub fn clicks(&self) -> &[ClickRecord] {
        &self.clicks
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn scrolled(&self) -> &[NodeId] {
        &self.scrolled
    }

    /// Number of inline style writes performed so far.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl Document for Page {
    fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes[self.body.0 as usize].connected {
            return out;
        }
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id.0 as usize];
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).is_ok()
    }

    fn tag_name(&self, node: NodeId) -> DomResult<String> {
        Ok(self.node(node)?.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.node(node)?.attrs.get(name).cloned())
    }

    fn has_click_listener(&self, node: NodeId) -> DomResult<bool> {
        Ok(self.node(node)?.on_click)
    }

    fn computed_style(&self, node: NodeId) -> DomResult<ComputedStyle> {
        let own = self.node(node)?;
        let defaults = ComputedStyle::default();
        let visibility = self
            .ancestors(node)
            .find_map(|n| n.style.visibility.clone())
            .unwrap_or(defaults.visibility);
        let cursor = self
            .ancestors(node)
            .find_map(|n| n.style.cursor.clone())
            .unwrap_or(defaults.cursor);
        Ok(ComputedStyle {
            display: own.style.display.clone().unwrap_or(defaults.display),
            visibility,
            opacity: own.style.opacity.unwrap_or(defaults.opacity),
            cursor,
        })
    }

    fn bounding_box(&self, node: NodeId) -> DomResult<BoundingBox> {
        let rect = self.node(node)?.rect;
        let not_rendered = self
            .ancestors(node)
            .any(|n| n.style.display.as_deref() == Some("none"));
        if not_rendered {
            return Ok(BoundingBox::default());
        }
        Ok(rect)
    }

    fn rendered_text(&self, node: NodeId) -> DomResult<String> {
        self.node(node)?;
        let mut parts = Vec::new();
        self.collect_text(node, &mut parts);
        Ok(parts.join(" "))
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> DomResult<bool> {
        self.node(ancestor)?;
        self.node(node)?;
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.nodes[id.0 as usize].parent;
        }
        Ok(false)
    }

    fn inline_style(&self, node: NodeId, property: StyleProperty) -> DomResult<String> {
        Ok(self
            .node(node)?
            .inline
            .get(&property)
            .cloned()
            .unwrap_or_default())
    }

    fn set_inline_style(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> DomResult<()> {
        let target = self.node_mut(node)?;
        if target.lock_style {
            return Err(DomError::StyleRejected { node, property });
        }
        if value.is_empty() {
            target.inline.remove(&property);
        } else {
            target.inline.insert(property, value.to_string());
        }
        self.style_writes += 1;
        self.record(node, MutationKind::Attributes);
        Ok(())
    }

    fn focus(&mut self, node: NodeId) -> DomResult<()> {
        self.node(node)?;
        self.focused = Some(node);
        Ok(())
    }

    fn dispatch_click(&mut self, node: NodeId) -> DomResult<()> {
        if self.node(node)?.block_dispatch {
            return Err(DomError::DispatchFailed {
                node,
                reason: "synthetic event rejected".to_string(),
            });
        }
        self.clicks.push(ClickRecord {
            target: node,
            synthetic: true,
        });
        Ok(())
    }

    fn click(&mut self, node: NodeId) -> DomResult<()> {
        if self.node(node)?.block_click {
            return Err(DomError::DispatchFailed {
                node,
                reason: "click() threw".to_string(),
            });
        }
        self.clicks.push(ClickRecord {
            target: node,
            synthetic: false,
        });
        Ok(())
    }

    fn scroll_into_view(&mut self, node: NodeId) -> DomResult<()> {
        self.node(node)?;
        self.scrolled.push(node);
        Ok(())
    }

    fn viewport(&self) -> ViewportInfo {
        self.viewport.clone()
    }

    fn observe_mutations(&mut self) {
        self.observing = true;
    }

    fn disconnect_mutations(&mut self) {
        self.observing = false;
        self.mutations.clear();
    }
}
