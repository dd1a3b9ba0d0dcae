use core::error::Error;
use core::fmt;

use indextree::{NodeError as ArenaError, NodeId};
use trellis_geometry::{Alignment, Constraints, ConstraintsError, Extent, Size};

/// An invariant violation detected by the layout kernel.
///
/// These are programming errors in the caller or in a box implementation. The
/// current pass is aborted and the error propagates to whoever started it;
/// nothing is coerced into a best-effort size.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Constraints handed to `node` are malformed, or `node` needed a bound
    /// that was unbounded.
    InvalidConstraints {
        node: NodeId,
        source: ConstraintsError,
    },
    /// The sizing algorithm of `node` produced a size outside its constraints,
    /// or one that is negative or not finite.
    InvalidSize {
        node: NodeId,
        size: Size,
        constraints: Constraints,
    },
    /// Size or placement of `node` was read before its first layout.
    SizeUnavailable { node: NodeId },
    /// `node` was asked to lay out while already inside its own layout call.
    Reentrant { node: NodeId },
    /// The tree structure or dirty state was changed while a pass was running.
    MutationDuringLayout,
    /// `node` is not part of this tree, or was removed from it.
    UnknownNode { node: NodeId },
    /// `node` already holds as many children as its kind accepts.
    ChildLimit {
        node: NodeId,
        kind: &'static str,
        limit: usize,
    },
    InvalidAlignment { node: NodeId, alignment: Alignment },
    InvalidFactor { node: NodeId, factor: f32 },
    /// Intrinsic queries take a non-negative cross-axis extent.
    InvalidIntrinsicInput { node: NodeId, extent: Extent },
    /// A pipeline operation needed a root and none is set.
    NoRoot,
    /// The arena refused a link, e.g. appending a node to its own descendant.
    Arena(ArenaError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstraints { node, source } => {
                write!(formatter, "invalid constraints for {node:?}: {source}")
            }
            Self::InvalidSize {
                node,
                size,
                constraints,
            } => write!(
                formatter,
                "{node:?} produced {size}, which does not satisfy {constraints}"
            ),
            Self::SizeUnavailable { node } => {
                write!(formatter, "size of {node:?} read before its first layout")
            }
            Self::Reentrant { node } => {
                write!(formatter, "layout of {node:?} re-entered while already in progress")
            }
            Self::MutationDuringLayout => {
                formatter.write_str("render tree mutated while a layout pass is active")
            }
            Self::UnknownNode { node } => write!(formatter, "{node:?} is not part of the render tree"),
            Self::ChildLimit { node, kind, limit } => {
                write!(formatter, "{kind} {node:?} accepts at most {limit} children")
            }
            Self::InvalidAlignment { node, alignment } => {
                write!(formatter, "{alignment} on {node:?} is outside [-1, 1]")
            }
            Self::InvalidFactor { node, factor } => {
                write!(formatter, "shrink-wrap factor {factor} on {node:?} must be finite and non-negative")
            }
            Self::InvalidIntrinsicInput { node, extent } => {
                write!(formatter, "intrinsic query on {node:?} with invalid extent {extent}")
            }
            Self::NoRoot => formatter.write_str("render tree has no root node"),
            Self::Arena(err) => write!(formatter, "render tree link rejected: {err:?}"),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConstraints { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ArenaError> for LayoutError {
    fn from(err: ArenaError) -> Self {
        Self::Arena(err)
    }
}
