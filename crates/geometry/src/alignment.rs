use core::fmt;

use crate::{Offset, Size};

/// A normalized position inside free space.
///
/// Each component runs from `-1.0` (start edge) through `0.0` (center) to
/// `1.0` (end edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub x: f32,
    pub y: f32,
}

impl Alignment {
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both components lie in `[-1, 1]`.
    pub fn is_normalized(&self) -> bool {
        (-1.0..=1.0).contains(&self.x) && (-1.0..=1.0).contains(&self.y)
    }

    /// Offset of a `child` placed inside `parent` at this alignment.
    ///
    /// The child may be larger than the parent, in which case the offset is
    /// negative on that axis and the child overflows both edges.
    pub fn inscribe(&self, parent: Size, child: Size) -> Offset {
        let free = parent - child;
        Offset::new(
            free.dx / 2.0 * (1.0 + self.x),
            free.dy / 2.0 * (1.0 + self.y),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Alignment({:.1}, {:.1})", self.x, self.y)
    }
}
