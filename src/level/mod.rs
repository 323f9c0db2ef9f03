//! Per-slice linear contrast stretching
//!
//! Every slice is leveled from its own statistics: one pass finds the observed
//! min/max, a second pass remaps samples so the min lands on the encoding's
//! black level and the max on its white level. RGB slices are split into three
//! 8-bit planes that are leveled independently.

mod float;
mod integer;
mod range;
mod rgb;

pub use range::{Scan, UnsignedSample, scan_float, scan_unsigned};

use crate::error::LevelError;
use crate::types::{Dimensions, Encoding, SampleRange};
use std::fmt;

/// Borrowed, mutable samples of one slice
#[derive(Debug)]
pub enum SampleBuffer<'a> {
    Gray8(&'a mut [u8]),
    Gray16(&'a mut [u16]),
    Gray32(&'a mut [f32]),
    /// Interleaved R, G, B bytes, followed by an untouched alpha byte when `alpha` is set
    Rgb { samples: &'a mut [u8], alpha: bool },
}

impl SampleBuffer<'_> {
    #[inline]
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Gray8(_) => Encoding::Gray8,
            Self::Gray16(_) => Encoding::Gray16,
            Self::Gray32(_) => Encoding::Gray32,
            Self::Rgb { .. } => Encoding::Rgb,
        }
    }

    /// Number of stored samples (bytes for RGB)
    #[inline]
    #[must_use]
    pub fn sample_len(&self) -> usize {
        match self {
            Self::Gray8(s) => s.len(),
            Self::Gray16(s) => s.len(),
            Self::Gray32(s) => s.len(),
            Self::Rgb { samples, .. } => samples.len(),
        }
    }

    /// Samples stored per pixel
    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        match self {
            Self::Rgb { alpha: true, .. } => 4,
            Self::Rgb { alpha: false, .. } => 3,
            _ => 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.sample_len() / self.stride()
    }
}

/// What to do with a channel whose samples all share one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Leave the channel unchanged and report it as flat
    #[default]
    Skip,
    /// Fail the slice without touching it
    Reject,
}

impl DegeneratePolicy {
    #[inline]
    fn on_flat(self, channel: &'static str, value: f64) -> Result<ChannelOutcome, LevelError> {
        match self {
            Self::Skip => Ok(ChannelOutcome::Flat(value)),
            Self::Reject => Err(LevelError::DegenerateRange { channel, value }),
        }
    }
}

/// Result of leveling one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelOutcome {
    /// Observed range was stretched onto the full range
    Stretched(SampleRange),
    /// Every sample had this value; left unchanged
    Flat(f64),
    /// No sample contributed to the range; left unchanged
    Empty,
}

impl ChannelOutcome {
    #[inline]
    #[must_use]
    pub fn is_stretched(&self) -> bool {
        matches!(self, Self::Stretched(_))
    }
}

impl fmt::Display for ChannelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stretched(range) => write!(f, "stretched {range}"),
            Self::Flat(value) => write!(f, "flat at {value}"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Per-channel outcomes of one leveling call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelReport {
    Gray(ChannelOutcome),
    Rgb([ChannelOutcome; 3]),
}

impl LevelReport {
    #[must_use]
    pub fn channels(&self) -> &[ChannelOutcome] {
        match self {
            Self::Gray(outcome) => std::slice::from_ref(outcome),
            Self::Rgb(outcomes) => outcomes,
        }
    }

    /// True if at least one channel was remapped
    #[must_use]
    pub fn is_stretched(&self) -> bool {
        self.channels().iter().any(ChannelOutcome::is_stretched)
    }
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray(outcome) => write!(f, "{outcome}"),
            Self::Rgb([red, green, blue]) => {
                write!(f, "red {red}, green {green}, blue {blue}")
            }
        }
    }
}

/// Stateless per-slice leveler
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceLeveler {
    policy: DegeneratePolicy,
}

impl SliceLeveler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Level `buffer` in place
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if an RGB buffer is not a whole number of pixels,
    /// and `DegenerateRange` for a flat channel under [`DegeneratePolicy::Reject`].
    /// The buffer is unchanged whenever an error is returned.
    pub fn process(&self, buffer: SampleBuffer<'_>) -> Result<LevelReport, LevelError> {
        let stride = buffer.stride();
        let encoding = buffer.encoding();

        match buffer {
            SampleBuffer::Gray8(samples) => {
                integer::level_unsigned(samples, self.policy, "gray").map(LevelReport::Gray)
            }
            SampleBuffer::Gray16(samples) => {
                integer::level_unsigned(samples, self.policy, "gray").map(LevelReport::Gray)
            }
            SampleBuffer::Gray32(samples) => {
                float::level_float(samples, self.policy).map(LevelReport::Gray)
            }
            SampleBuffer::Rgb { samples, .. } => {
                if !samples.len().is_multiple_of(stride) {
                    return Err(LevelError::LengthMismatch {
                        encoding,
                        expected: samples.len().next_multiple_of(stride),
                        actual: samples.len(),
                    });
                }
                rgb::level_rgb(samples, stride, self.policy).map(LevelReport::Rgb)
            }
        }
    }

    /// Level one `width x height` slice, checking the buffer size first
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the buffer does not hold exactly
    /// `width * height` pixels, otherwise as [`SliceLeveler::process`].
    pub fn process_slice(
        &self,
        dimensions: Dimensions,
        buffer: SampleBuffer<'_>,
    ) -> Result<LevelReport, LevelError> {
        let expected = dimensions.pixel_count() * buffer.stride();
        let actual = buffer.sample_len();

        if actual != expected {
            return Err(LevelError::LengthMismatch {
                encoding: buffer.encoding(),
                expected,
                actual,
            });
        }

        self.process(buffer)
    }
}
