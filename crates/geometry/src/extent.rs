use core::fmt;

/// Upper bound of a constraint axis.
///
/// Using a tagged value instead of `f32::INFINITY` keeps clamp and compare
/// logic free of infinity arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extent {
    /// A finite maximum.
    Bounded(f32),
    /// No maximum at all.
    #[default]
    Unbounded,
}

impl Extent {
    /// Build an extent from a raw float, mapping positive infinity to `Unbounded`.
    pub fn from_f32(value: f32) -> Self {
        if value == f32::INFINITY {
            Self::Unbounded
        } else {
            Self::Bounded(value)
        }
    }

    pub const fn is_bounded(self) -> bool {
        matches!(self, Self::Bounded(_))
    }

    /// The finite value, if any.
    pub const fn bounded(self) -> Option<f32> {
        match self {
            Self::Bounded(value) => Some(value),
            Self::Unbounded => None,
        }
    }

    /// Clamp `value` from above. `Unbounded` leaves the value untouched.
    pub fn clamp_upper(self, value: f32) -> f32 {
        match self {
            Self::Bounded(max) => value.min(max),
            Self::Unbounded => value,
        }
    }

    /// Whether `value` does not exceed this bound.
    pub fn admits(self, value: f32) -> bool {
        match self {
            Self::Bounded(max) => value <= max,
            Self::Unbounded => true,
        }
    }

    /// Clamp this extent into `[min, max]`.
    ///
    /// An unbounded extent collapses onto `max`, so the result is unbounded only
    /// when both are.
    pub fn clamp(self, min: f32, max: Self) -> Self {
        match self {
            Self::Bounded(value) => Self::Bounded(max.clamp_upper(value).max(min)),
            Self::Unbounded => max,
        }
    }
}

impl From<f32> for Extent {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(value) => write!(formatter, "{value:.1}"),
            Self::Unbounded => formatter.write_str("Infinity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Extent;

    #[test]
    fn infinity_maps_to_unbounded() {
        assert_eq!(Extent::from_f32(f32::INFINITY), Extent::Unbounded);
        assert_eq!(Extent::from(12.0), Extent::Bounded(12.0));
    }

    #[test]
    fn unbounded_upper_clamp_is_a_no_op() {
        assert_eq!(Extent::Unbounded.clamp_upper(1.0e9), 1.0e9);
        assert_eq!(Extent::Bounded(50.0).clamp_upper(200.0), 50.0);
        assert!(Extent::Unbounded.admits(f32::MAX));
        assert!(!Extent::Bounded(10.0).admits(10.5));
    }

    #[test]
    fn clamp_into_range() {
        assert_eq!(
            Extent::Unbounded.clamp(0.0, Extent::Bounded(40.0)),
            Extent::Bounded(40.0)
        );
        assert_eq!(
            Extent::Bounded(10.0).clamp(20.0, Extent::Unbounded),
            Extent::Bounded(20.0)
        );
        assert_eq!(Extent::Unbounded.clamp(0.0, Extent::Unbounded), Extent::Unbounded);
    }

    #[test]
    fn display_names_the_sentinel() {
        assert_eq!(Extent::Unbounded.to_string(), "Infinity");
        assert_eq!(Extent::Bounded(56.0).to_string(), "56.0");
    }
}
