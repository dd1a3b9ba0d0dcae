//! Geometry value types for the box layout kernel.
//!
//! Everything in this crate is a plain `Copy` value:
//! - `Extent`: an upper bound that is either a finite number or unbounded
//! - `Constraints`: the min/max width/height range a parent imposes on a child
//! - `Size` / `Offset`: computed magnitudes and child displacements
//! - `Alignment`: a normalized position inside free space

mod alignment;
mod constraints;
mod extent;
mod size;

pub use alignment::Alignment;
pub use constraints::{Axis, Constraints, ConstraintsError};
pub use extent::Extent;
pub use size::{Offset, Size};
