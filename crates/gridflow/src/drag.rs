//! Headless drag wiring: turns pointer/scroll samples into [`Layout::move_item`] calls.
//!
//! The session remembers the dragged item and the sample taken when the drag started. Every
//! later sample is measured against that anchor, so the item's target is always "where it was at
//! drag start plus the whole pointer travel", regardless of how many samples arrive in between.

use crate::item::Item;
use crate::layout::{Layout, PointerDelta};

/// Pointer position and scroll offset of the grid's scroll container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl PointerSample {
    pub fn new(pointer_x: f64, pointer_y: f64) -> Self {
        Self {
            pointer_x,
            pointer_y,
            ..Default::default()
        }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    fn horizontal_since(&self, anchor: &PointerSample) -> PointerDelta {
        PointerDelta {
            current_pointer: self.pointer_x,
            last_pointer: anchor.pointer_x,
            current_scroll: self.scroll_x,
            last_scroll: anchor.scroll_x,
        }
    }

    fn vertical_since(&self, anchor: &PointerSample) -> PointerDelta {
        PointerDelta {
            current_pointer: self.pointer_y,
            last_pointer: anchor.pointer_y,
            current_scroll: self.scroll_y,
            last_scroll: anchor.scroll_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { item: Item, anchor: PointerSample },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    editable: bool,
    state: DragState,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DragSession {
    /// A non-editable session never leaves [`DragState::Idle`].
    pub fn new(editable: bool) -> Self {
        Self {
            editable,
            state: DragState::Idle,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_item(&self) -> Option<&Item> {
        match &self.state {
            DragState::Dragging { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Starts dragging `id`. Returns `false` (and stays idle) when the session is not editable or
    /// the layout has no such item.
    pub fn start(&mut self, layout: &Layout, id: &str, sample: PointerSample) -> bool {
        if !self.editable {
            return false;
        }
        let Some(item) = layout.item(id) else {
            tracing::debug!(item = %id, "drag not started: unknown item");
            return false;
        };
        self.state = DragState::Dragging {
            item: item.clone(),
            anchor: sample,
        };
        true
    }

    /// Applies the drag up to `sample`. Idle sessions return `layout` unchanged.
    pub fn drag(&self, layout: &Layout, sample: PointerSample) -> Layout {
        let DragState::Dragging { item, anchor } = &self.state else {
            return layout.clone();
        };
        let columns_to_move = layout.calculate_columns_to_move(sample.horizontal_since(anchor));
        let rows_to_move = layout.calculate_rows_to_move(sample.vertical_since(anchor));
        layout.move_item(item, columns_to_move, rows_to_move)
    }

    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}
