//! Aligning shift shared by single-child boxes.

use indextree::NodeId;
use trellis_geometry::{Alignment, Offset, Size};

use crate::{LayoutError, RenderTree};

/// Offset that places a `child` inside `parent` at `alignment`.
///
/// `((parent - child) / 2) * (1 + alignment)` per axis. A child larger than
/// its parent gets a negative offset and overflows on both sides.
///
/// # Errors
///
/// Fails with `InvalidAlignment` when a component lies outside `[-1, 1]`.
pub fn aligned_offset(
    node: NodeId,
    alignment: Alignment,
    parent: Size,
    child: Size,
) -> Result<Offset, LayoutError> {
    if !alignment.is_normalized() {
        return Err(LayoutError::InvalidAlignment { node, alignment });
    }
    Ok(alignment.inscribe(parent, child))
}

impl RenderTree {
    /// Position the already laid out `child` of `node`, whose own size is
    /// `size`, and store the offset as the child's placement data.
    pub(crate) fn align_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        alignment: Alignment,
        size: Size,
    ) -> Result<Offset, LayoutError> {
        let child_size = self.size(child)?;
        let offset = aligned_offset(node, alignment, size, child_size)?;
        self.set_child_offset(child, offset)?;
        Ok(offset)
    }
}
