use core::fmt;
use core::ops::{Add, Sub};

/// A 2D magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and non-negative, i.e. a size a node may report.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// The free space left when `rhs` is placed inside `self`.
impl Sub for Size {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Size({:.1}, {:.1})", self.width, self.height)
    }
}

/// A child's displacement relative to its parent's origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Offset({:.1}, {:.1})", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::{Offset, Size};

    #[test]
    fn free_space_between_sizes() {
        let free = Size::new(100.0, 80.0) - Size::new(40.0, 100.0);
        assert_eq!(free, Offset::new(60.0, -20.0));
    }

    #[test]
    fn validity_rejects_negative_and_infinite() {
        assert!(Size::new(0.0, 12.5).is_valid());
        assert!(!Size::new(-1.0, 0.0).is_valid());
        assert!(!Size::new(f32::INFINITY, 0.0).is_valid());
        assert!(!Size::new(0.0, f32::NAN).is_valid());
    }
}
