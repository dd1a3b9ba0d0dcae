//! Box-constraint layout kernel.
//!
//! Render nodes live in an arena-backed [`RenderTree`]. A parent lays out
//! each child by handing it [`Constraints`](trellis_geometry::Constraints),
//! receives a size back and positions the child. Dirty marks bubble up to the
//! nearest relayout boundary, and [`PipelineOwner::flush_layout`] relays out
//! only those boundaries.

mod aligning;
pub mod boxes;
mod config;
mod error;
mod intrinsics;
mod layout;
mod node;
mod pipeline;
mod printing;
mod tree;

pub use aligning::aligned_offset;
pub use boxes::{AlignBox, BoxKind, ChildOverflowBox, ConstrainedBox, LeafBox, LeafSizing};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use indextree::NodeId;
pub use intrinsics::IntrinsicDimension;
pub use node::{BoxParentData, RenderNode};
pub use pipeline::{LayoutStats, PipelineOwner};
pub use tree::{ChildIds, RenderTree};
