//! Box constraints.
//!
//! A parent hands its child a `Constraints` value describing the range of sizes
//! the child may choose from. Constraints flow down, sizes flow back up.

use core::error::Error;
use core::fmt;

use crate::{Extent, Size};

/// Physical axis, used to point at the offending bound in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        })
    }
}

/// Immutable min/max range for width and height.
///
/// Minimums are finite and non-negative; maximums are `Extent`s and never fall
/// below their minimum. Construction does not check this; `validate` does, and
/// the layout protocol calls it on entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: Extent,
    pub min_height: f32,
    pub max_height: Extent,
}

impl Constraints {
    pub const fn new(min_width: f32, max_width: Extent, min_height: f32, max_height: Extent) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// `0..Unbounded` on both axes.
    pub const fn unbounded() -> Self {
        Self::new(0.0, Extent::Unbounded, 0.0, Extent::Unbounded)
    }

    /// Exactly `size`.
    pub const fn tight(size: Size) -> Self {
        Self::new(
            size.width,
            Extent::Bounded(size.width),
            size.height,
            Extent::Bounded(size.height),
        )
    }

    /// Exact on the given axes, `0..Unbounded` on the others.
    pub fn tight_for(width: Option<f32>, height: Option<f32>) -> Self {
        let (min_width, max_width) = width.map_or((0.0, Extent::Unbounded), |value| (value, Extent::Bounded(value)));
        let (min_height, max_height) = height.map_or((0.0, Extent::Unbounded), |value| (value, Extent::Bounded(value)));
        Self::new(min_width, max_width, min_height, max_height)
    }

    /// Anything from zero up to `size`.
    pub const fn loose(size: Size) -> Self {
        Self::new(
            0.0,
            Extent::Bounded(size.width),
            0.0,
            Extent::Bounded(size.height),
        )
    }

    pub fn constrain_width(&self, width: f32) -> f32 {
        self.max_width.clamp_upper(width).max(self.min_width)
    }

    pub fn constrain_height(&self, height: f32) -> f32 {
        self.max_height.clamp_upper(height).max(self.min_height)
    }

    /// Clamp each dimension of `size` into `[min, max]`.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(self.constrain_width(size.width), self.constrain_height(size.height))
    }

    pub fn is_satisfied_by(&self, size: Size) -> bool {
        self.min_width <= size.width
            && self.max_width.admits(size.width)
            && self.min_height <= size.height
            && self.max_height.admits(size.height)
    }

    pub fn has_tight_width(&self) -> bool {
        self.max_width == Extent::Bounded(self.min_width)
    }

    pub fn has_tight_height(&self) -> bool {
        self.max_height == Extent::Bounded(self.min_height)
    }

    /// Exactly one size satisfies these constraints.
    pub fn is_tight(&self) -> bool {
        self.has_tight_width() && self.has_tight_height()
    }

    pub const fn has_bounded_width(&self) -> bool {
        self.max_width.is_bounded()
    }

    pub const fn has_bounded_height(&self) -> bool {
        self.max_height.is_bounded()
    }

    /// The largest size that satisfies these constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintsError::Unbounded` when either maximum is unbounded.
    pub fn biggest(&self) -> Result<Size, ConstraintsError> {
        let width = self.max_width.bounded().ok_or(ConstraintsError::Unbounded {
            axis: Axis::Horizontal,
        })?;
        let height = self.max_height.bounded().ok_or(ConstraintsError::Unbounded {
            axis: Axis::Vertical,
        })?;
        Ok(Size::new(width, height))
    }

    /// The smallest size that satisfies these constraints.
    pub const fn smallest(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Same maximums, minimums dropped to zero.
    pub const fn loosen(&self) -> Self {
        Self::new(0.0, self.max_width, 0.0, self.max_height)
    }

    /// Clamp every bound of `self` into `outer`.
    ///
    /// The result always satisfies `outer`, keeping as much of `self` as fits.
    pub fn enforce(&self, outer: &Self) -> Self {
        Self::new(
            outer.constrain_width(self.min_width),
            self.max_width.clamp(outer.min_width, outer.max_width),
            outer.constrain_height(self.min_height),
            self.max_height.clamp(outer.min_height, outer.max_height),
        )
    }

    /// Check the invariants on both axes.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound: a non-finite value, a negative minimum,
    /// or a maximum below its minimum.
    pub fn validate(&self) -> Result<(), ConstraintsError> {
        validate_axis(Axis::Horizontal, self.min_width, self.max_width)?;
        validate_axis(Axis::Vertical, self.min_height, self.max_height)
    }

    pub fn is_normalized(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

fn validate_axis(axis: Axis, min: f32, max: Extent) -> Result<(), ConstraintsError> {
    if !min.is_finite() {
        return Err(ConstraintsError::NonFinite { axis });
    }
    if min < 0.0 {
        return Err(ConstraintsError::NegativeMinimum { axis, min });
    }
    if let Extent::Bounded(limit) = max {
        if !limit.is_finite() {
            return Err(ConstraintsError::NonFinite { axis });
        }
        if limit < min {
            return Err(ConstraintsError::Inverted {
                axis,
                min,
                max: limit,
            });
        }
    }
    Ok(())
}

impl fmt::Display for Constraints {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tight() {
            return write!(
                formatter,
                "Constraints(w={:.1}, h={:.1})",
                self.min_width, self.min_height
            );
        }
        write!(
            formatter,
            "Constraints({:.1}<=w<={}, {:.1}<=h<={})",
            self.min_width, self.max_width, self.min_height, self.max_height
        )
    }
}

/// A constraint bound that breaks the invariants, or a bound a caller needed
/// to be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintsError {
    NegativeMinimum { axis: Axis, min: f32 },
    NonFinite { axis: Axis },
    Inverted { axis: Axis, min: f32, max: f32 },
    Unbounded { axis: Axis },
}

impl fmt::Display for ConstraintsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeMinimum { axis, min } => {
                write!(formatter, "minimum {axis} {min} is negative")
            }
            Self::NonFinite { axis } => write!(formatter, "{axis} bound is not a finite number"),
            Self::Inverted { axis, min, max } => {
                write!(formatter, "maximum {axis} {max} is below minimum {min}")
            }
            Self::Unbounded { axis } => write!(formatter, "maximum {axis} is unbounded"),
        }
    }
}

impl Error for ConstraintsError {}
