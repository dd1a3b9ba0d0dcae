use indextree::NodeId;
use trellis_geometry::{Constraints, Size};

use crate::intrinsics::IntrinsicDimension;
use crate::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafSizing {
    /// Natural content size, clamped into the constraints.
    Preferred(Size),
    /// As large as the constraints allow; the minimum on unbounded axes.
    Fill,
}

/// A node without children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafBox {
    sizing: LeafSizing,
}

impl LeafBox {
    pub const fn preferred(size: Size) -> Self {
        Self {
            sizing: LeafSizing::Preferred(size),
        }
    }

    pub const fn fill() -> Self {
        Self {
            sizing: LeafSizing::Fill,
        }
    }

    pub const fn sizing(&self) -> LeafSizing {
        self.sizing
    }

    pub const fn sized_by_parent(&self) -> bool {
        matches!(self.sizing, LeafSizing::Fill)
    }

    pub(crate) fn perform_layout(&self, node: NodeId, constraints: Constraints) -> Result<Size, LayoutError> {
        match self.sizing {
            LeafSizing::Preferred(preferred) => {
                if !preferred.is_valid() {
                    return Err(LayoutError::InvalidSize {
                        node,
                        size: preferred,
                        constraints,
                    });
                }
                Ok(constraints.constrain(preferred))
            }
            LeafSizing::Fill => Ok(Size::new(
                constraints.max_width.bounded().unwrap_or(constraints.min_width),
                constraints.max_height.bounded().unwrap_or(constraints.min_height),
            )),
        }
    }

    pub(crate) fn compute_intrinsic(&self, dimension: IntrinsicDimension) -> f32 {
        match self.sizing {
            LeafSizing::Preferred(size) if dimension.is_width() => size.width,
            LeafSizing::Preferred(size) => size.height,
            LeafSizing::Fill => 0.0,
        }
    }
}
