//! Overflow box.
//!
//! Lets its child measure as if nothing constrained it, while the box itself
//! still reports a size inside the constraints its own parent gave it. The
//! child is centered and may paint past the box's bounds.

use indextree::NodeId;
use trellis_geometry::{Alignment, Constraints, Extent, Size};

use crate::intrinsics::IntrinsicDimension;
use crate::{LayoutError, RenderTree};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildOverflowBox {
    alignment: Alignment,
}

impl ChildOverflowBox {
    pub const fn new() -> Self {
        Self {
            alignment: Alignment::CENTER,
        }
    }

    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub(crate) fn perform_layout(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        let Some(child) = tree.first_child(node)? else {
            return constraints
                .biggest()
                .map_err(|source| LayoutError::InvalidConstraints { node, source });
        };

        let child_size = tree.layout(child, Constraints::unbounded(), true)?;
        let size = constraints.constrain(child_size);
        tree.align_child(node, child, self.alignment, size)?;
        Ok(size)
    }

    /// Never asks for a minimum of its own; only the parent's constraints
    /// impose one.
    pub(crate) fn compute_intrinsic(
        tree: &mut RenderTree,
        node: NodeId,
        dimension: IntrinsicDimension,
        extent: Extent,
    ) -> Result<f32, LayoutError> {
        match dimension {
            IntrinsicDimension::MinWidth | IntrinsicDimension::MinHeight => Ok(0.0),
            IntrinsicDimension::MaxWidth | IntrinsicDimension::MaxHeight => {
                tree.child_intrinsic(node, dimension, extent)
            }
        }
    }
}

impl Default for ChildOverflowBox {
    fn default() -> Self {
        Self::new()
    }
}
