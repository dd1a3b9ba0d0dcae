//! Box behaviors.
//!
//! The set of node kinds is closed: each kind lives in its own module and is
//! dispatched from one `match` here, both for layout and for intrinsic queries.

mod align;
mod constrained;
mod leaf;
mod overflow;

use core::fmt;

use indextree::NodeId;
use trellis_geometry::{Constraints, Extent, Size};

use crate::intrinsics::IntrinsicDimension;
use crate::{LayoutError, RenderTree};

pub use align::AlignBox;
pub use constrained::ConstrainedBox;
pub use leaf::{LeafBox, LeafSizing};
pub use overflow::ChildOverflowBox;

/// Layout behavior of a render node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxKind {
    /// Child laid out unconstrained, own size clamped to the incoming constraints.
    ChildOverflow(ChildOverflowBox),
    /// Child laid out loosely and positioned by alignment.
    Align(AlignBox),
    /// Extra constraints enforced on the child.
    Constrained(ConstrainedBox),
    /// No children.
    Leaf(LeafBox),
}

impl BoxKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChildOverflow(_) => "ChildOverflow",
            Self::Align(_) => "Align",
            Self::Constrained(_) => "Constrained",
            Self::Leaf(_) => "Leaf",
        }
    }

    /// Maximum number of children this kind accepts.
    pub const fn child_limit(&self) -> usize {
        match self {
            Self::ChildOverflow(_) | Self::Align(_) | Self::Constrained(_) => 1,
            Self::Leaf(_) => 0,
        }
    }

    /// The size depends on the incoming constraints alone, never on children
    /// or on the kind's own content. Such nodes are always relayout boundaries.
    pub const fn sized_by_parent(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.sized_by_parent(),
            Self::ChildOverflow(_) | Self::Align(_) | Self::Constrained(_) => false,
        }
    }

    pub(crate) fn perform_layout(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        match self {
            Self::ChildOverflow(overflow) => overflow.perform_layout(tree, node, constraints),
            Self::Align(align) => align.perform_layout(tree, node, constraints),
            Self::Constrained(constrained) => constrained.perform_layout(tree, node, constraints),
            Self::Leaf(leaf) => leaf.perform_layout(node, constraints),
        }
    }

    pub(crate) fn compute_intrinsic(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        dimension: IntrinsicDimension,
        extent: Extent,
    ) -> Result<f32, LayoutError> {
        match self {
            Self::ChildOverflow(_) => ChildOverflowBox::compute_intrinsic(tree, node, dimension, extent),
            Self::Align(_) => tree.child_intrinsic(node, dimension, extent),
            Self::Constrained(constrained) => {
                constrained.compute_intrinsic(tree, node, dimension, extent)
            }
            Self::Leaf(leaf) => Ok(leaf.compute_intrinsic(dimension)),
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildOverflow(overflow) => write!(formatter, "ChildOverflow({})", overflow.alignment()),
            Self::Align(align) => {
                write!(formatter, "Align({}", align.alignment())?;
                if let Some(factor) = align.width_factor() {
                    write!(formatter, ", width_factor={factor:.2}")?;
                }
                if let Some(factor) = align.height_factor() {
                    write!(formatter, ", height_factor={factor:.2}")?;
                }
                formatter.write_str(")")
            }
            Self::Constrained(constrained) => write!(formatter, "Constrained({})", constrained.additional()),
            Self::Leaf(leaf) => match leaf.sizing() {
                LeafSizing::Preferred(size) => write!(formatter, "Leaf(preferred {size})"),
                LeafSizing::Fill => formatter.write_str("Leaf(fill)"),
            },
        }
    }
}
