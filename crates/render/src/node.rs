//! Per-node layout state stored in the render arena.

use std::collections::HashMap;

use trellis_geometry::{Constraints, Offset, Size};

use crate::boxes::BoxKind;
use crate::intrinsics::IntrinsicKey;

/// Placement data a parent attaches to its child for the paint pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxParentData {
    pub offset: Offset,
}

/// A render node.
///
/// Holds the box behavior plus everything the layout protocol memoizes:
/// the constraints and size from the last completed layout, the dirty flags
/// and the relayout-boundary decision made on that call.
#[derive(Debug, Clone)]
pub struct RenderNode {
    pub(crate) kind: BoxKind,
    pub(crate) constraints: Option<Constraints>,
    pub(crate) size: Option<Size>,
    pub(crate) parent_data: BoxParentData,
    pub(crate) needs_layout: bool,
    /// Kept apart from `needs_layout`: repainting never forces a relayout.
    pub(crate) needs_paint: bool,
    pub(crate) relayout_boundary: bool,
    /// Set for the duration of this node's own layout call.
    pub(crate) active: bool,
    pub(crate) layout_count: u64,
    pub(crate) intrinsics: HashMap<IntrinsicKey, f32>,
}

impl RenderNode {
    pub(crate) fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            constraints: None,
            size: None,
            parent_data: BoxParentData::default(),
            needs_layout: true,
            needs_paint: true,
            relayout_boundary: false,
            active: false,
            layout_count: 0,
            intrinsics: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &BoxKind {
        &self.kind
    }

    pub fn constraints(&self) -> Option<Constraints> {
        self.constraints
    }

    /// Size from the last completed layout, `None` before the first one.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn parent_data(&self) -> BoxParentData {
        self.parent_data
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    pub fn is_relayout_boundary(&self) -> bool {
        self.relayout_boundary
    }

    /// How many times the sizing algorithm actually ran for this node.
    pub fn layout_count(&self) -> u64 {
        self.layout_count
    }
}
