//! The box layout protocol.

use indextree::NodeId;
use log::{debug, trace, warn};
use trellis_geometry::{Constraints, Size};

use crate::boxes::BoxKind;
use crate::{LayoutError, RenderTree};

impl RenderTree {
    /// Lay out `node` under `constraints` and return its size.
    ///
    /// `parent_uses_size` tells whether the caller reads the returned size;
    /// when it does not, the node becomes a relayout boundary and later
    /// changes beneath it stop there. A clean node asked again with the same
    /// constraints returns its recorded size without running its algorithm.
    ///
    /// # Errors
    ///
    /// Fails on malformed constraints, on re-entry into a node that is
    /// already laying out, on unknown nodes, and when a sizing algorithm
    /// produces a size its constraints do not admit. Errors from descendants
    /// propagate unchanged and abort the pass.
    pub fn layout(
        &mut self,
        node: NodeId,
        constraints: Constraints,
        parent_uses_size: bool,
    ) -> Result<Size, LayoutError> {
        constraints
            .validate()
            .map_err(|source| LayoutError::InvalidConstraints { node, source })?;
        let has_parent = self.parent(node)?.is_some();
        let entry = self.node_mut(node)?;
        if entry.active {
            return Err(LayoutError::Reentrant { node });
        }

        let kind = entry.kind;
        let boundary = !parent_uses_size || kind.sized_by_parent() || constraints.is_tight() || !has_parent;

        match (entry.needs_layout, entry.constraints, entry.size) {
            (false, Some(last), Some(size)) if last == constraints => {
                entry.relayout_boundary = boundary;
                self.stats.cache_hits += 1;
                trace!("{node:?} clean under {constraints}, reusing {size}");
                Ok(size)
            }
            _ => self.run_layout(node, kind, constraints, boundary),
        }
    }

    /// Relayout a queued boundary with the constraints it last received.
    ///
    /// Returns `None` when there was nothing to do: the node is clean again,
    /// or it has never been laid out and its ancestor will reach it.
    pub(crate) fn relayout_dirty_root(&mut self, node: NodeId) -> Result<Option<Size>, LayoutError> {
        let entry = self.node(node)?;
        if !entry.needs_layout {
            trace!("dirty root {node:?} already relaid out");
            return Ok(None);
        }
        let Some(constraints) = entry.constraints else {
            warn!("skipping dirty root {node:?}: never laid out");
            return Ok(None);
        };
        let kind = entry.kind;
        let boundary = entry.relayout_boundary;

        self.stats.dirty_roots += 1;
        debug!("relaying out boundary {node:?} under {constraints}");
        self.run_layout(node, kind, constraints, boundary).map(Some)
    }

    /// Run the sizing algorithm of `node`. Nothing is recorded unless it
    /// succeeds, including the boundary decision.
    fn run_layout(
        &mut self,
        node: NodeId,
        kind: BoxKind,
        constraints: Constraints,
        boundary: bool,
    ) -> Result<Size, LayoutError> {
        self.node_mut(node)?.active = true;
        self.pass_depth += 1;
        let produced = kind.perform_layout(self, node, constraints);
        self.pass_depth -= 1;
        self.node_mut(node)?.active = false;
        let size = produced?;

        if !size.is_valid() || !constraints.is_satisfied_by(size) {
            return Err(LayoutError::InvalidSize {
                node,
                size,
                constraints,
            });
        }

        let entry = self.node_mut(node)?;
        entry.constraints = Some(constraints);
        entry.size = Some(size);
        entry.relayout_boundary = boundary;
        entry.needs_layout = false;
        entry.layout_count += 1;
        let repaint = !entry.needs_paint;
        entry.needs_paint = true;
        if repaint {
            self.paint_queue.push(node);
        }
        self.stats.laid_out += 1;
        trace!("laid out {node:?} ({kind}) under {constraints}: {size}");
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use trellis_geometry::{Axis, Constraints, ConstraintsError, Extent, Size};

    use crate::boxes::{BoxKind, ChildOverflowBox, LeafBox};
    use crate::{LayoutError, RenderTree};

    #[test]
    fn reentrant_layout_is_rejected() {
        let mut tree = RenderTree::new();
        let leaf = tree.create(BoxKind::Leaf(LeafBox::fill()));
        tree.node_mut(leaf).unwrap().active = true;
        assert_eq!(
            tree.layout(leaf, Constraints::unbounded(), false),
            Err(LayoutError::Reentrant { node: leaf })
        );
    }

    #[test]
    fn malformed_constraints_are_rejected_before_dispatch() {
        let mut tree = RenderTree::new();
        let leaf = tree.create(BoxKind::Leaf(LeafBox::fill()));
        let inverted = Constraints::new(10.0, Extent::Bounded(5.0), 0.0, Extent::Unbounded);
        assert_eq!(
            tree.layout(leaf, inverted, false),
            Err(LayoutError::InvalidConstraints {
                node: leaf,
                source: ConstraintsError::Inverted {
                    axis: Axis::Horizontal,
                    min: 10.0,
                    max: 5.0,
                },
            })
        );
        assert_eq!(tree.node(leaf).unwrap().layout_count(), 0);
    }

    #[test]
    fn failed_child_leaves_the_pass() {
        let mut tree = RenderTree::new();
        let overflow = tree.create(BoxKind::ChildOverflow(ChildOverflowBox::new()));
        let leaf = tree.create(BoxKind::Leaf(LeafBox::preferred(Size::new(f32::NAN, 1.0))));
        tree.append_child(overflow, leaf).unwrap();

        let err = tree
            .layout(overflow, Constraints::loose(Size::new(10.0, 10.0)), false)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSize { node, .. } if node == leaf));
        assert!(!tree.is_in_layout());
        assert!(!tree.node(overflow).unwrap().active);
        assert!(tree.node(overflow).unwrap().needs_layout());

        tree.set_kind(leaf, BoxKind::Leaf(LeafBox::preferred(Size::new(4.0, 4.0))))
            .unwrap();
        let size = tree
            .layout(overflow, Constraints::loose(Size::new(10.0, 10.0)), false)
            .unwrap();
        assert_eq!(size, Size::new(4.0, 4.0));
    }

    #[test]
    fn failed_layout_keeps_the_previous_boundary() {
        let mut tree = RenderTree::new();
        let leaf = tree.create(BoxKind::Leaf(LeafBox::preferred(Size::new(-2.0, 1.0))));

        let err = tree.layout(leaf, Constraints::unbounded(), false).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSize { .. }));
        assert!(!tree.node(leaf).unwrap().is_relayout_boundary());
        assert_eq!(tree.constraints(leaf).unwrap(), None);
    }

    #[test]
    fn foreign_id_is_unknown_not_a_panic() {
        let mut big = RenderTree::new();
        for _ in 0..4 {
            big.create(BoxKind::Leaf(LeafBox::fill()));
        }
        let foreign = big.create(BoxKind::Leaf(LeafBox::fill()));

        let mut small = RenderTree::new();
        small.create(BoxKind::Leaf(LeafBox::fill()));
        assert_eq!(
            small.layout(foreign, Constraints::unbounded(), false),
            Err(LayoutError::UnknownNode { node: foreign })
        );
    }

    #[test]
    fn completed_layout_requests_paint() {
        let mut tree = RenderTree::new();
        let leaf = tree.create(BoxKind::Leaf(LeafBox::fill()));
        tree.take_paint_dirty();

        tree.layout(leaf, Constraints::tight(Size::new(3.0, 3.0)), false)
            .unwrap();
        assert_eq!(tree.take_paint_dirty(), vec![leaf]);

        tree.layout(leaf, Constraints::tight(Size::new(3.0, 3.0)), false)
            .unwrap();
        assert!(tree.take_paint_dirty().is_empty());
        assert_eq!(tree.stats().cache_hits, 1);
    }

    #[test]
    fn boundary_follows_the_call_site() {
        let mut tree = RenderTree::new();
        let overflow = tree.create(BoxKind::ChildOverflow(ChildOverflowBox::new()));
        let leaf = tree.create(BoxKind::Leaf(LeafBox::preferred(Size::new(4.0, 4.0))));
        tree.append_child(overflow, leaf).unwrap();
        tree.layout(overflow, Constraints::loose(Size::new(10.0, 10.0)), true)
            .unwrap();

        assert!(tree.node(overflow).unwrap().is_relayout_boundary());
        assert!(!tree.node(leaf).unwrap().is_relayout_boundary());
    }
}
