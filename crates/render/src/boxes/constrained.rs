use indextree::NodeId;
use trellis_geometry::{Constraints, Extent, Offset, Size};

use crate::intrinsics::IntrinsicDimension;
use crate::{LayoutError, RenderTree};

const FAB_REGULAR: f32 = 56.0;
const FAB_MINI: f32 = 40.0;
const FAB_EXTENDED_HEIGHT: f32 = 48.0;

/// Imposes extra constraints on its child, clamped into whatever the parent
/// allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstrainedBox {
    additional: Constraints,
}

impl ConstrainedBox {
    pub const fn new(additional: Constraints) -> Self {
        Self { additional }
    }

    /// Regular floating action button: exactly 56x56.
    pub const fn fab_regular() -> Self {
        Self::new(Constraints::tight(Size::new(FAB_REGULAR, FAB_REGULAR)))
    }

    /// Mini floating action button: exactly 40x40.
    pub const fn fab_mini() -> Self {
        Self::new(Constraints::tight(Size::new(FAB_MINI, FAB_MINI)))
    }

    /// Extended floating action button: 48 high, width follows the content.
    pub const fn fab_extended() -> Self {
        Self::new(Constraints::new(
            0.0,
            Extent::Unbounded,
            FAB_EXTENDED_HEIGHT,
            Extent::Bounded(FAB_EXTENDED_HEIGHT),
        ))
    }

    pub const fn additional(&self) -> Constraints {
        self.additional
    }

    pub(crate) fn perform_layout(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        self.additional
            .validate()
            .map_err(|source| LayoutError::InvalidConstraints { node, source })?;
        let enforced = self.additional.enforce(&constraints);

        match tree.first_child(node)? {
            Some(child) => {
                let size = tree.layout(child, enforced, true)?;
                tree.set_child_offset(child, Offset::ZERO)?;
                Ok(size)
            }
            None => Ok(enforced.constrain(Size::ZERO)),
        }
    }

    pub(crate) fn compute_intrinsic(
        &self,
        tree: &mut RenderTree,
        node: NodeId,
        dimension: IntrinsicDimension,
        extent: Extent,
    ) -> Result<f32, LayoutError> {
        let additional = &self.additional;
        if dimension.is_width() {
            if additional.has_tight_width() {
                return Ok(additional.min_width);
            }
            let child = tree.child_intrinsic(node, dimension, extent)?;
            Ok(additional.constrain_width(child))
        } else {
            if additional.has_tight_height() {
                return Ok(additional.min_height);
            }
            let child = tree.child_intrinsic(node, dimension, extent)?;
            Ok(additional.constrain_height(child))
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_geometry::{Constraints, Extent, Offset, Size};

    use crate::boxes::{BoxKind, ConstrainedBox, LeafBox};
    use crate::RenderTree;

    fn fab(preset: ConstrainedBox, content: Size) -> (RenderTree, indextree::NodeId, indextree::NodeId) {
        let mut tree = RenderTree::new();
        let button = tree.create(BoxKind::Constrained(preset));
        let label = tree.create(BoxKind::Leaf(LeafBox::preferred(content)));
        tree.append_child(button, label).unwrap();
        tree.set_root(button).unwrap();
        (tree, button, label)
    }

    #[test]
    fn presets_size_buttons() {
        let viewport = Constraints::loose(Size::new(400.0, 300.0));

        let (mut tree, button, label) = fab(ConstrainedBox::fab_regular(), Size::new(24.0, 24.0));
        assert_eq!(tree.layout(button, viewport, false).unwrap(), Size::new(56.0, 56.0));
        assert_eq!(tree.size(label).unwrap(), Size::new(56.0, 56.0));
        assert_eq!(tree.offset(label).unwrap(), Offset::ZERO);

        let (mut tree, button, _) = fab(ConstrainedBox::fab_mini(), Size::new(24.0, 24.0));
        assert_eq!(tree.layout(button, viewport, false).unwrap(), Size::new(40.0, 40.0));

        let (mut tree, button, _) = fab(ConstrainedBox::fab_extended(), Size::new(120.0, 20.0));
        assert_eq!(tree.layout(button, viewport, false).unwrap(), Size::new(120.0, 48.0));
    }

    #[test]
    fn parent_constraints_win_over_additional() {
        let (mut tree, button, _) = fab(ConstrainedBox::fab_regular(), Size::ZERO);
        let size = tree
            .layout(button, Constraints::tight(Size::new(30.0, 80.0)), false)
            .unwrap();
        assert_eq!(size, Size::new(30.0, 80.0));
    }

    #[test]
    fn childless_box_takes_smallest_enforced_size() {
        let mut tree = RenderTree::new();
        let button = tree.create(BoxKind::Constrained(ConstrainedBox::fab_extended()));
        let size = tree
            .layout(button, Constraints::new(10.0, Extent::Bounded(100.0), 0.0, Extent::Unbounded), false)
            .unwrap();
        assert_eq!(size, Size::new(10.0, 48.0));
    }

    #[test]
    fn intrinsics_prefer_tight_additional_extent() {
        let (mut tree, button, _) = fab(ConstrainedBox::fab_extended(), Size::new(120.0, 20.0));
        assert_eq!(tree.max_intrinsic_width(button, Extent::Unbounded).unwrap(), 120.0);
        assert_eq!(tree.min_intrinsic_height(button, Extent::Unbounded).unwrap(), 48.0);

        let (mut tree, button, _) = fab(ConstrainedBox::fab_mini(), Size::new(120.0, 20.0));
        assert_eq!(tree.max_intrinsic_width(button, Extent::Bounded(10.0)).unwrap(), 40.0);
    }
}
