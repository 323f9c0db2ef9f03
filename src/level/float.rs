//! Single-channel leveling for 32-bit float samples

use super::range::{scan_float, Scan};
use super::{ChannelOutcome, DegeneratePolicy};
use crate::error::LevelError;
use crate::types::{Encoding, SampleRange};

/// Stretch `samples` in place onto the unit interval `[0.0, 1.0]`
///
/// The scan starts from `min = 1.0`, `max = 0.0`, so the observed range always
/// covers at least one of the conventional black/white levels when the data
/// sits entirely on one side of the unit interval. Span, gradient and remap
/// run in f64 so finite slices spanning more than `f32::MAX`, or less than the
/// smallest normal f32, still land on `[0.0, 1.0]`. No rounding is applied.
/// Non-finite samples do not take part in the range and stay non-finite.
pub(super) fn level_float(
    samples: &mut [f32],
    policy: DegeneratePolicy,
) -> Result<ChannelOutcome, LevelError> {
    let range = match scan_float(samples) {
        Scan::Empty => return Ok(ChannelOutcome::Empty),
        Scan::Flat(value) => return policy.on_flat("gray", f64::from(value)),
        Scan::Spread { min, max } => SampleRange::new(f64::from(min), f64::from(max)),
    };

    let gradient = range.gradient(Encoding::Gray32.white_level());
    for sample in samples.iter_mut() {
        *sample = ((f64::from(*sample) - range.min) * gradient) as f32;
    }

    Ok(ChannelOutcome::Stretched(range))
}
