//! The render arena: structure, dirty tracking and read-only accessors.
//!
//! Children are owned through their parent's child list in the arena. The
//! parent link of a node is only ever followed to propagate invalidation.

use std::collections::{HashSet, VecDeque};
use std::mem;

use indextree::{Arena, NodeId};
use log::{debug, trace};
use smallvec::SmallVec;
use trellis_geometry::{Constraints, Offset, Size};

use crate::boxes::BoxKind;
use crate::node::{BoxParentData, RenderNode};
use crate::pipeline::LayoutStats;
use crate::LayoutError;

/// Child ids of a node; single-child boxes never spill.
pub type ChildIds = SmallVec<[NodeId; 4]>;

/// A tree of render nodes laid out with the box protocol.
pub struct RenderTree {
    pub(crate) arena: Arena<RenderNode>,
    root: Option<NodeId>,
    /// Nesting depth of in-flight layout calls; non-zero means a pass is active.
    pub(crate) pass_depth: usize,
    /// Relayout boundaries waiting for the next flush, in marking order.
    dirty_roots: VecDeque<NodeId>,
    /// Set for O(1) containment checks for the dirty roots queue.
    dirty_root_set: HashSet<NodeId>,
    pub(crate) paint_queue: Vec<NodeId>,
    pub(crate) stats: LayoutStats,
}

impl RenderTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            pass_depth: 0,
            dirty_roots: VecDeque::new(),
            dirty_root_set: HashSet::new(),
            paint_queue: Vec::new(),
            stats: LayoutStats::default(),
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Whether a layout call is currently running on this tree.
    pub fn is_in_layout(&self) -> bool {
        self.pass_depth > 0
    }

    /// Cumulative layout counters.
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Create a detached node. It starts out needing layout and paint.
    pub fn create(&mut self, kind: BoxKind) -> NodeId {
        let node = self.arena.new_node(RenderNode::new(kind));
        self.paint_queue.push(node);
        trace!("created {node:?} as {kind}");
        node
    }

    /// Make `node` the root, detaching it from any previous parent.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active or `node` is not in the tree.
    pub fn set_root(&mut self, node: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        self.node(node)?;
        if let Some(old_parent) = node.parent(&self.arena) {
            node.detach(&mut self.arena);
            self.mark_needs_layout(old_parent)?;
        }
        self.node_mut(node)?.parent_data = BoxParentData::default();
        self.root = Some(node);
        self.requeue_dirty_boundaries(node);
        self.mark_needs_layout(node)
    }

    /// Append `child` as the last child of `parent`, re-parenting it if needed.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active, either node is unknown, `parent` already
    /// holds as many children as its kind accepts, or the link would create a
    /// cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        let kind = self.node(parent)?.kind;
        self.node(child)?;
        let limit = kind.child_limit();
        if parent.children(&self.arena).count() >= limit {
            return Err(LayoutError::ChildLimit {
                node: parent,
                kind: kind.name(),
                limit,
            });
        }

        let old_parent = child.parent(&self.arena);
        parent.checked_append(child, &mut self.arena)?;
        if self.root == Some(child) {
            self.root = None;
        }
        self.node_mut(child)?.parent_data = BoxParentData::default();
        debug!("attached {child:?} under {parent:?}");

        if let Some(old_parent) = old_parent {
            self.mark_needs_layout(old_parent)?;
        }
        self.requeue_dirty_boundaries(child);
        self.mark_needs_layout(parent)
    }

    /// Unlink `node` from its parent while keeping its subtree alive.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active or `node` is not in the tree.
    pub fn detach(&mut self, node: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        self.node(node)?;
        let Some(parent) = node.parent(&self.arena) else {
            return Ok(());
        };
        node.detach(&mut self.arena);
        self.node_mut(node)?.parent_data = BoxParentData::default();
        self.mark_needs_layout(parent)
    }

    /// Destroy `node` and its whole subtree.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active or `node` is not in the tree.
    pub fn remove(&mut self, node: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        self.node(node)?;
        let parent = node.parent(&self.arena);
        let doomed: HashSet<NodeId> = node.descendants(&self.arena).collect();
        node.remove_subtree(&mut self.arena);

        self.dirty_roots.retain(|queued| !doomed.contains(queued));
        self.dirty_root_set.retain(|queued| !doomed.contains(queued));
        self.paint_queue.retain(|queued| !doomed.contains(queued));
        if self.root == Some(node) {
            self.root = None;
        }
        debug!("removed {node:?} ({} nodes)", doomed.len());

        match parent {
            Some(parent) => self.mark_needs_layout(parent),
            None => Ok(()),
        }
    }

    /// Replace the box behavior of `node` and schedule it for layout.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active, `node` is unknown, or it has more children
    /// than the new kind accepts.
    pub fn set_kind(&mut self, node: NodeId, kind: BoxKind) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        self.node(node)?;
        let limit = kind.child_limit();
        if node.children(&self.arena).count() > limit {
            return Err(LayoutError::ChildLimit {
                node,
                kind: kind.name(),
                limit,
            });
        }
        let entry = self.node_mut(node)?;
        if entry.kind.sized_by_parent() != kind.sized_by_parent() {
            // The boundary decision depended on the old kind.
            entry.relayout_boundary = false;
        }
        entry.kind = kind;
        self.mark_needs_layout(node)
    }

    /// Mark `node` as needing layout on the next flush.
    ///
    /// The mark bubbles to the parent until it reaches a relayout boundary,
    /// which is queued as a dirty root. Cached intrinsic dimensions are
    /// dropped on the way; a node that had any also dirties its parent, which
    /// may have consulted them.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active or a node on the path is unknown.
    pub fn mark_needs_layout(&mut self, node: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        let mut current = node;
        loop {
            let entry = self.node_mut(current)?;
            let had_intrinsics = !entry.intrinsics.is_empty();
            entry.intrinsics.clear();
            if entry.needs_layout && !had_intrinsics {
                return Ok(());
            }
            entry.needs_layout = true;
            let boundary = entry.relayout_boundary && entry.size.is_some();

            let parent = current.parent(&self.arena);
            if boundary || parent.is_none() {
                self.enqueue_dirty_root(current);
            }
            match parent {
                Some(next) if !boundary || had_intrinsics => {
                    trace!("{current:?} needs layout, bubbling to {next:?}");
                    current = next;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Mark `node` as needing paint. Layout state is untouched.
    ///
    /// # Errors
    ///
    /// Fails if a pass is active or `node` is unknown.
    pub fn mark_needs_paint(&mut self, node: NodeId) -> Result<(), LayoutError> {
        self.ensure_idle()?;
        let entry = self.node_mut(node)?;
        if !entry.needs_paint {
            entry.needs_paint = true;
            self.paint_queue.push(node);
        }
        Ok(())
    }

    /// Drain the nodes waiting for paint, clearing their paint flags.
    pub fn take_paint_dirty(&mut self) -> Vec<NodeId> {
        let queued = mem::take(&mut self.paint_queue);
        let mut out = Vec::with_capacity(queued.len());
        for node in queued {
            match self.node_mut(node) {
                Ok(entry) if entry.needs_paint => {
                    entry.needs_paint = false;
                    out.push(node);
                }
                _ => {}
            }
        }
        out
    }

    /// Enqueue a node as a dirty root candidate (deduplicated).
    pub(crate) fn enqueue_dirty_root(&mut self, node: NodeId) {
        if self.dirty_root_set.insert(node) {
            debug!("queued {node:?} as a dirty relayout root");
            self.dirty_roots.push_back(node);
        }
    }

    /// Queue every dirty boundary in the subtree of `node` again.
    ///
    /// A boundary marked while its subtree was detached had its queue entry
    /// dropped by the flush, and its clean ancestors short-circuit on reattach.
    fn requeue_dirty_boundaries(&mut self, node: NodeId) {
        let stranded: Vec<NodeId> = node
            .descendants(&self.arena)
            .filter(|id| {
                self.arena.get(*id).is_some_and(|entry| {
                    let data = entry.get();
                    data.needs_layout && data.relayout_boundary && data.size.is_some()
                })
            })
            .collect();
        for id in stranded {
            self.enqueue_dirty_root(id);
        }
    }

    /// Drain the dirty roots, shallowest first.
    pub(crate) fn take_dirty_roots(&mut self) -> Vec<NodeId> {
        self.dirty_root_set.clear();
        let queued: Vec<NodeId> = self.dirty_roots.drain(..).collect();
        let mut roots: Vec<(usize, NodeId)> = queued
            .into_iter()
            .filter(|node| self.contains(*node))
            .map(|node| (node.ancestors(&self.arena).count(), node))
            .collect();
        roots.sort_by_key(|(depth, _)| *depth);
        roots.into_iter().map(|(_, node)| node).collect()
    }

    /// Whether `node` hangs below the current root.
    pub(crate) fn is_attached(&self, node: NodeId) -> bool {
        self.root.is_some() && node.ancestors(&self.arena).last() == self.root
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), LayoutError> {
        if self.is_in_layout() {
            return Err(LayoutError::MutationDuringLayout);
        }
        Ok(())
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.arena.get(node).is_some_and(|entry| !entry.is_removed())
    }

    /// Read-only view of a node's layout state.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownNode` for nodes not in the tree.
    pub fn node(&self, node: NodeId) -> Result<&RenderNode, LayoutError> {
        match self.arena.get(node) {
            Some(entry) if !entry.is_removed() => Ok(entry.get()),
            _ => Err(LayoutError::UnknownNode { node }),
        }
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Result<&mut RenderNode, LayoutError> {
        match self.arena.get_mut(node) {
            Some(entry) if !entry.is_removed() => Ok(entry.get_mut()),
            _ => Err(LayoutError::UnknownNode { node }),
        }
    }

    /// # Errors
    ///
    /// Fails with `UnknownNode` for nodes not in the tree.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, LayoutError> {
        self.node(node)?;
        Ok(node.parent(&self.arena))
    }

    /// # Errors
    ///
    /// Fails with `UnknownNode` for nodes not in the tree.
    pub fn children(&self, node: NodeId) -> Result<ChildIds, LayoutError> {
        self.node(node)?;
        Ok(node.children(&self.arena).collect())
    }

    /// # Errors
    ///
    /// Fails with `UnknownNode` for nodes not in the tree.
    pub fn first_child(&self, node: NodeId) -> Result<Option<NodeId>, LayoutError> {
        self.node(node)?;
        Ok(node.children(&self.arena).next())
    }

    /// Size from the last completed layout of `node`.
    ///
    /// # Errors
    ///
    /// Fails with `SizeUnavailable` before the first layout of `node`.
    pub fn size(&self, node: NodeId) -> Result<Size, LayoutError> {
        self.node(node)?
            .size
            .ok_or(LayoutError::SizeUnavailable { node })
    }

    /// Offset of `node` inside its parent, as placed by the parent's layout.
    ///
    /// # Errors
    ///
    /// Fails with `SizeUnavailable` before the first layout of `node`.
    pub fn offset(&self, node: NodeId) -> Result<Offset, LayoutError> {
        let entry = self.node(node)?;
        if entry.size.is_none() {
            return Err(LayoutError::SizeUnavailable { node });
        }
        Ok(entry.parent_data.offset)
    }

    /// # Errors
    ///
    /// Fails with `UnknownNode` for nodes not in the tree.
    pub fn constraints(&self, node: NodeId) -> Result<Option<Constraints>, LayoutError> {
        Ok(self.node(node)?.constraints)
    }

    pub(crate) fn set_child_offset(&mut self, child: NodeId, offset: Offset) -> Result<(), LayoutError> {
        self.node_mut(child)?.parent_data.offset = offset;
        Ok(())
    }
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}
