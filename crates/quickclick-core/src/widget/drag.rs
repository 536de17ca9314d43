//! The floating panel and pointer handling.

use quickclick_config::{Language, PanelConfig};

use super::QuickClick;
use crate::dom::{BoundingBox, Document, Point, ViewportInfo};
use crate::i18n::{Message, translate};
use crate::timer::Scheduler;

/// Where a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Panel,
    Page,
}

/// Visible panel state.
#[derive(Debug, Clone)]
pub struct Panel {
    geometry: BoundingBox,
    margin: f64,
    input: String,
    status: String,
    placeholder: String,
    close_label: String,
    handle_title: String,
    /// Pointer offset from the top-left corner while dragging.
    drag_offset: Option<Point>,
}

impl Panel {
    pub(super) fn new(viewport: &ViewportInfo, config: &PanelConfig, lang: Language) -> Self {
        let left = viewport.width as f64 / 2.0 - config.center_offset;
        let top = viewport.height as f64 - config.bottom_offset;
        let mut panel = Self {
            geometry: BoundingBox::new(left, top, config.width, config.height),
            margin: config.margin,
            input: String::new(),
            status: String::new(),
            placeholder: String::new(),
            close_label: String::new(),
            handle_title: String::new(),
            drag_offset: None,
        };
        panel.relabel(lang);
        panel
    }

    /// Redraw every fixed label in `lang` and reset the status to the hint.
    pub(super) fn relabel(&mut self, lang: Language) {
        self.placeholder = translate(lang, &Message::Placeholder);
        self.status = translate(lang, &Message::Hint);
        self.close_label = translate(lang, &Message::Close);
        self.handle_title = translate(lang, &Message::DragHandle);
    }

    pub fn geometry(&self) -> BoundingBox {
        self.geometry
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Text of the close button.
    pub fn close_label(&self) -> &str {
        &self.close_label
    }

    /// Tooltip of the drag handle.
    pub fn handle_title(&self) -> &str {
        &self.handle_title
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    pub(super) fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub(super) fn set_status(&mut self, text: String) {
        self.status = text;
    }

    fn move_to(&mut self, left: f64, top: f64, viewport: &ViewportInfo) {
        let max_left = viewport.width as f64 - self.geometry.width - self.margin;
        let max_top = viewport.height as f64 - self.geometry.height - self.margin;
        self.geometry.x = left.min(max_left).max(self.margin);
        self.geometry.y = top.min(max_top).max(self.margin);
    }
}

impl<D: Document, S: Scheduler> QuickClick<D, S> {
    /// Pointer or touch pressed on the drag handle.
    pub fn begin_drag(&mut self, at: Point) {
        if let Some(panel) = self.panel.as_mut() {
            let origin = panel.geometry;
            panel.drag_offset = Some(Point::new(at.x - origin.x, at.y - origin.y));
        }
    }

    /// Follow the pointer, keeping the panel inside the viewport.
    pub fn drag_to(&mut self, at: Point) {
        let viewport = self.doc.viewport();
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let Some(offset) = panel.drag_offset else {
            return;
        };
        panel.move_to(at.x - offset.x, at.y - offset.y, &viewport);
    }

    pub fn end_drag(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.drag_offset = None;
        }
    }

    pub fn on_wheel(&mut self) {
        self.interacting.engage(&mut self.scheduler);
    }

    pub fn on_touch(&mut self) {
        self.interacting.engage(&mut self.scheduler);
    }

    /// Pointer pressed at `at`; presses inside the panel box are the panel's.
    pub fn on_pointer_down_at(&mut self, at: Point) {
        let target = match self.panel.as_ref() {
            Some(panel) if panel.geometry.contains(at) => PointerTarget::Panel,
            _ => PointerTarget::Page,
        };
        self.on_pointer_down(target);
    }

    /// Presses outside an open panel count as page interaction.
    pub fn on_pointer_down(&mut self, target: PointerTarget) {
        if self.panel.is_some() && target == PointerTarget::Page {
            self.interacting.engage(&mut self.scheduler);
        }
    }
}
