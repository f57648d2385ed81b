//! # Intensity Lookup Table
//!
//! Maps scalar intensities to colors through an ordered sequence of
//! threshold steps. The fiber monitoring view uses hard banding
//! (`interpolate = false`): every value takes exactly the color of the
//! greatest step at or below it, producing discrete intensity bands
//! rather than a continuous gradient. Interpolated lookup is supported
//! for palettes that want it, clamped at both edges.

use serde::Serialize;

/// Errors produced by LUT construction
#[derive(Debug, thiserror::Error)]
pub enum LutError {
    /// A LUT must contain at least one step
    #[error("LUT must contain at least one color step")]
    Empty,

    /// Thresholds must be strictly ascending
    #[error("LUT thresholds must be strictly ascending (violated at step {index})")]
    UnorderedSteps {
        /// Index of the first out-of-order step
        index: usize,
    },

    /// Thresholds must be finite
    #[error("LUT threshold at step {index} is not finite")]
    NonFiniteThreshold {
        /// Index of the offending step
        index: usize,
    },
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear per-channel blend toward `other`; `t` is clamped to [0, 1].
    fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// One LUT entry: the lowest intensity at which `color` applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStep {
    /// Intensity threshold for this step
    #[serde(rename = "value")]
    pub threshold: f64,
    /// Color applied from this threshold upward
    pub color: Rgba,
}

impl ColorStep {
    /// Construct a step.
    pub const fn new(threshold: f64, color: Rgba) -> Self {
        Self { threshold, color }
    }
}

/// Ordered threshold→color lookup table.
///
/// Serializes to the construction payload consumed by the rendering layer:
/// the ordered step list plus the `interpolate` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityLut {
    steps: Vec<ColorStep>,
    interpolate: bool,
}

impl IntensityLut {
    /// Build a LUT, validating that steps are non-empty, finite, and
    /// strictly ascending by threshold.
    pub fn new(steps: Vec<ColorStep>, interpolate: bool) -> Result<Self, LutError> {
        if steps.is_empty() {
            return Err(LutError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            if !step.threshold.is_finite() {
                return Err(LutError::NonFiniteThreshold { index });
            }
            if index > 0 && step.threshold <= steps[index - 1].threshold {
                return Err(LutError::UnorderedSteps { index });
            }
        }
        Ok(Self { steps, interpolate })
    }

    /// The palette used by the fiber monitoring view: transparent below
    /// the noise floor, then cold-to-hot bands up to 600.
    pub fn fiber_default() -> Self {
        Self {
            steps: vec![
                ColorStep::new(0.0, Rgba::rgba(0, 0, 0, 0)),
                ColorStep::new(200.0, Rgba::rgb(96, 146, 237)),
                ColorStep::new(300.0, Rgba::rgb(0, 0, 255)),
                ColorStep::new(400.0, Rgba::rgb(255, 215, 0)),
                ColorStep::new(500.0, Rgba::rgb(255, 164, 0)),
                ColorStep::new(600.0, Rgba::rgb(255, 64, 0)),
            ],
            interpolate: false,
        }
    }

    /// The ordered steps.
    pub fn steps(&self) -> &[ColorStep] {
        &self.steps
    }

    /// Whether lookups blend between adjacent steps.
    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    /// Color for `value`: the greatest step whose threshold is `<= value`.
    ///
    /// No input is color-undefined — values below the first threshold
    /// clamp to the first step's color and values at or above the last
    /// threshold clamp to the last step's. With `interpolate` set, the
    /// matched color blends linearly toward the next step proportional to
    /// the position of `value` inside the band; blending clamps at both
    /// edges rather than extrapolating.
    pub fn color_for(&self, value: f64) -> Rgba {
        let upper = self.steps.partition_point(|step| step.threshold <= value);
        if upper == 0 {
            return self.steps[0].color;
        }
        let matched = upper - 1;
        if !self.interpolate || upper == self.steps.len() {
            return self.steps[matched].color;
        }

        let lo = &self.steps[matched];
        let hi = &self.steps[upper];
        let t = (value - lo.threshold) / (hi.threshold - lo.threshold);
        lo.color.lerp(hi.color, t)
    }
}
