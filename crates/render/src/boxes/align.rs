use indextree::NodeId;
use trellis_geometry::{Alignment, Constraints, Extent, Size};

use crate::{LayoutError, RenderTree};

/// Positions a single child by alignment inside the space it is given.
///
/// An axis shrink-wraps the child when a factor is set for it or when its
/// maximum is unbounded; otherwise the box expands to the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignBox {
    alignment: Alignment,
    width_factor: Option<f32>,
    height_factor: Option<f32>,
}

impl AlignBox {
    pub const fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            width_factor: None,
            height_factor: None,
        }
    }

    #[must_use]
    pub const fn with_width_factor(mut self, factor: f32) -> Self {
        self.width_factor = Some(factor);
        self
    }

    #[must_use]
    pub const fn with_height_factor(mut self, factor: f32) -> Self {
        self.height_factor = Some(factor);
        self
    }

    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub const fn width_factor(&self) -> Option<f32> {
        self.width_factor
    }

    pub const fn height_factor(&self) -> Option<f32> {
        self.height_factor
    }

    fn validate_factors(&self, node: NodeId) -> Result<(), LayoutError> {
        for factor in [self.width_factor, self.height_factor].into_iter().flatten() {
            if !factor.is_finite() || factor < 0.0 {
                return Err(LayoutError::InvalidFactor { node, factor });
            }
        }
        Ok(())
    }

    pub(crate) fn perform_layout(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        self.validate_factors(node)?;

        let child = tree.first_child(node)?;
        let child_size = match child {
            Some(child) => tree.layout(child, constraints.loosen(), true)?,
            None => Size::ZERO,
        };

        let size = constraints.constrain(Size::new(
            resolve_axis(constraints.max_width, self.width_factor, child_size.width),
            resolve_axis(constraints.max_height, self.height_factor, child_size.height),
        ));
        if let Some(child) = child {
            tree.align_child(node, child, self.alignment, size)?;
        }
        Ok(size)
    }
}

impl Default for AlignBox {
    fn default() -> Self {
        Self::new(Alignment::CENTER)
    }
}

fn resolve_axis(max: Extent, factor: Option<f32>, child: f32) -> f32 {
    match (factor, max) {
        (None, Extent::Bounded(limit)) => limit,
        _ => child * factor.unwrap_or(1.0),
    }
}
