//! Configuration for the layout pipeline.
//!
//! Settings can be loaded from environment variables or constructed
//! programmatically.

use std::env;

use trellis_geometry::Size;

const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// Runtime configuration for a `PipelineOwner`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Size the root is laid out at; root constraints are tight on it.
    pub viewport: Size,
    /// Whether each flush logs its layout counters at `info`.
    pub telemetry_enabled: bool,
}

impl LayoutConfig {
    /// Construct a `LayoutConfig` with explicit values.
    ///
    /// Negative or non-finite viewport dimensions fall back to the default
    /// viewport on that axis.
    #[inline]
    #[must_use]
    pub fn new(viewport: Size, telemetry_enabled: bool) -> Self {
        Self {
            viewport: Size::new(
                sanitize_axis(viewport.width, DEFAULT_VIEWPORT.width),
                sanitize_axis(viewport.height, DEFAULT_VIEWPORT.height),
            ),
            telemetry_enabled,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `TRELLIS_VIEWPORT_WIDTH`: viewport width in logical pixels (default: 800)
    /// - `TRELLIS_VIEWPORT_HEIGHT`: viewport height in logical pixels (default: 600)
    /// - `TRELLIS_TELEMETRY`: Set to "1" to enable telemetry (default: disabled)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let width = parse_axis(env::var("TRELLIS_VIEWPORT_WIDTH").ok().as_deref(), DEFAULT_VIEWPORT.width);
        let height = parse_axis(
            env::var("TRELLIS_VIEWPORT_HEIGHT").ok().as_deref(),
            DEFAULT_VIEWPORT.height,
        );
        let telemetry_enabled = env::var("TRELLIS_TELEMETRY").ok().as_deref() == Some("1");
        Self::new(Size::new(width, height), telemetry_enabled)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT, false)
    }
}

fn parse_axis(raw: Option<&str>, default: f32) -> f32 {
    raw.and_then(|val| val.trim().parse::<f32>().ok())
        .map_or(default, |value| sanitize_axis(value, default))
}

fn sanitize_axis(value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}
