//! Frame driver: owns the render tree and flushes pending layout work.

use anyhow::{Context as _, Error as AnyhowError};
use indextree::NodeId;
use log::{debug, info};
use tracing::info_span;
use trellis_geometry::{Constraints, Size};

use crate::config::LayoutConfig;
use crate::{LayoutError, RenderTree};

/// Layout counters. Cumulative on the tree, per flush on the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Sizing algorithms that actually ran.
    pub laid_out: u64,
    /// Layout calls answered from the recorded size.
    pub cache_hits: u64,
    /// Relayout boundaries relaid out from the dirty queue.
    pub dirty_roots: u64,
}

impl LayoutStats {
    /// Counters accumulated since the `earlier` snapshot.
    #[must_use]
    pub const fn since(&self, earlier: Self) -> Self {
        Self {
            laid_out: self.laid_out.saturating_sub(earlier.laid_out),
            cache_hits: self.cache_hits.saturating_sub(earlier.cache_hits),
            dirty_roots: self.dirty_roots.saturating_sub(earlier.dirty_roots),
        }
    }
}

/// Drives layout for one render tree: lays out the root against the
/// viewport and relays out dirty boundaries, once per frame.
pub struct PipelineOwner {
    tree: RenderTree,
    config: LayoutConfig,
    last_stats: LayoutStats,
}

impl PipelineOwner {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            tree: RenderTree::new(),
            config,
            last_stats: LayoutStats::default(),
        }
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Counters of the most recent flush.
    pub fn last_stats(&self) -> LayoutStats {
        self.last_stats
    }

    /// Constraints the root is laid out under: tight on the viewport.
    pub fn root_constraints(&self) -> Constraints {
        Constraints::tight(self.config.viewport)
    }

    /// Resize the viewport, scheduling the root for layout if it changed.
    ///
    /// # Errors
    ///
    /// Fails if called while a layout pass is active.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), LayoutError> {
        if viewport == self.config.viewport {
            return Ok(());
        }
        self.tree.ensure_idle()?;
        debug!("viewport {} -> {viewport}", self.config.viewport);
        self.config.viewport = viewport;
        match self.tree.root() {
            Some(root) => self.tree.mark_needs_layout(root),
            None => Ok(()),
        }
    }

    /// Drain the nodes that need painting.
    pub fn take_paint_dirty(&mut self) -> Vec<NodeId> {
        self.tree.take_paint_dirty()
    }

    /// Bring the whole tree up to date and return the root size.
    ///
    /// The root is laid out first when it has never been laid out, is dirty,
    /// or the viewport changed. Queued relayout boundaries follow, shallowest
    /// first, each under the constraints it last received.
    ///
    /// # Errors
    ///
    /// Fails when no root is set, or with the first layout error, wrapped in
    /// context naming the node being flushed. Boundaries not yet processed
    /// stay queued for the next flush.
    pub fn flush_layout(&mut self) -> anyhow::Result<Size> {
        let _span = info_span!("layout.flush").entered();
        let root = self.tree.root().ok_or(LayoutError::NoRoot)?;
        let before = self.tree.stats();
        let constraints = self.root_constraints();

        let entry = self.tree.node(root)?;
        if entry.needs_layout() || entry.constraints() != Some(constraints) {
            debug!("laying out root {root:?} under {constraints}");
            self.tree
                .layout(root, constraints, false)
                .with_context(|| format!("laying out root {root:?}"))?;
        }

        let dirty = self.tree.take_dirty_roots();
        for (index, node) in dirty.iter().copied().enumerate() {
            if !self.tree.is_attached(node) {
                debug!("dropping dirty root {node:?}: not below the root");
                continue;
            }
            if let Err(err) = self.tree.relayout_dirty_root(node) {
                for pending in &dirty[index..] {
                    self.tree.enqueue_dirty_root(*pending);
                }
                return Err(AnyhowError::new(err).context(format!("relaying out boundary {node:?}")));
            }
        }

        self.last_stats = self.tree.stats().since(before);
        if self.config.telemetry_enabled {
            let stats = self.last_stats;
            info!(
                "layout flush: {} laid out, {} cache hits, {} dirty roots",
                stats.laid_out, stats.cache_hits, stats.dirty_roots
            );
        }
        Ok(self.tree.size(root)?)
    }
}

impl Default for PipelineOwner {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
