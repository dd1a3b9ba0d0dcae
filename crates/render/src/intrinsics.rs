//! Intrinsic dimension queries.
//!
//! Answered from the box kinds alone, independent of any layout pass, and
//! memoized per node until the node is next marked for layout.

use indextree::NodeId;
use log::trace;
use trellis_geometry::Extent;

use crate::{LayoutError, RenderTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicDimension {
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
}

impl IntrinsicDimension {
    pub const fn is_width(self) -> bool {
        matches!(self, Self::MinWidth | Self::MaxWidth)
    }
}

/// Cache key: the dimension plus the bit pattern of the cross-axis extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct IntrinsicKey {
    dimension: IntrinsicDimension,
    extent_bits: Option<u32>,
}

impl IntrinsicKey {
    fn new(dimension: IntrinsicDimension, extent: Extent) -> Self {
        Self {
            dimension,
            // `+ 0.0` folds -0.0 into 0.0 so both hit the same entry.
            extent_bits: extent.bounded().map(|value| (value + 0.0).to_bits()),
        }
    }
}

impl RenderTree {
    /// Smallest width `node` can take without failing to paint its content
    /// at the given height.
    ///
    /// # Errors
    ///
    /// Fails for unknown nodes and for a negative or non-finite `height`.
    pub fn min_intrinsic_width(&mut self, node: NodeId, height: Extent) -> Result<f32, LayoutError> {
        self.intrinsic(node, IntrinsicDimension::MinWidth, height)
    }

    /// Width beyond which growing `node` no longer reduces its height.
    ///
    /// # Errors
    ///
    /// Fails for unknown nodes and for a negative or non-finite `height`.
    pub fn max_intrinsic_width(&mut self, node: NodeId, height: Extent) -> Result<f32, LayoutError> {
        self.intrinsic(node, IntrinsicDimension::MaxWidth, height)
    }

    /// # Errors
    ///
    /// Fails for unknown nodes and for a negative or non-finite `width`.
    pub fn min_intrinsic_height(&mut self, node: NodeId, width: Extent) -> Result<f32, LayoutError> {
        self.intrinsic(node, IntrinsicDimension::MinHeight, width)
    }

    /// # Errors
    ///
    /// Fails for unknown nodes and for a negative or non-finite `width`.
    pub fn max_intrinsic_height(&mut self, node: NodeId, width: Extent) -> Result<f32, LayoutError> {
        self.intrinsic(node, IntrinsicDimension::MaxHeight, width)
    }

    /// Generic form of the four intrinsic queries.
    ///
    /// # Errors
    ///
    /// Fails for unknown nodes and for a negative or non-finite `extent`.
    pub fn intrinsic(
        &mut self,
        node: NodeId,
        dimension: IntrinsicDimension,
        extent: Extent,
    ) -> Result<f32, LayoutError> {
        match extent {
            Extent::Bounded(value) if !value.is_finite() || value < 0.0 => {
                return Err(LayoutError::InvalidIntrinsicInput { node, extent });
            }
            _ => {}
        }

        let key = IntrinsicKey::new(dimension, extent);
        let entry = self.node(node)?;
        if let Some(cached) = entry.intrinsics.get(&key) {
            return Ok(*cached);
        }
        let kind = entry.kind;

        let value = kind.compute_intrinsic(self, node, dimension, extent)?;
        trace!("{dimension:?} of {node:?} at {extent} = {value}");
        self.node_mut(node)?.intrinsics.insert(key, value);
        Ok(value)
    }

    /// The intrinsic value of the only child of `node`, `0` without one.
    pub(crate) fn child_intrinsic(
        &mut self,
        node: NodeId,
        dimension: IntrinsicDimension,
        extent: Extent,
    ) -> Result<f32, LayoutError> {
        match self.first_child(node)? {
            Some(child) => self.intrinsic(child, dimension, extent),
            None => Ok(0.0),
        }
    }
}
