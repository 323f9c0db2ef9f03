//! Single-channel leveling for 8- and 16-bit unsigned samples

use super::range::{scan_unsigned, Scan, UnsignedSample};
use super::{ChannelOutcome, DegeneratePolicy};
use crate::error::LevelError;
use crate::types::SampleRange;

/// Stretch `samples` in place so the observed min maps to 0 and the max to `T::MAX`
pub(super) fn level_unsigned<T: UnsignedSample>(
    samples: &mut [T],
    policy: DegeneratePolicy,
    channel: &'static str,
) -> Result<ChannelOutcome, LevelError> {
    let (min, max): (u64, u64) = match scan_unsigned(samples) {
        Scan::Empty => return Ok(ChannelOutcome::Empty),
        Scan::Flat(value) => return policy.on_flat(channel, to_f64(value)),
        Scan::Spread { min, max } => (min.into(), max.into()),
    };

    remap(samples, min, max);

    Ok(ChannelOutcome::Stretched(SampleRange::new(min as f64, max as f64)))
}

#[inline]
fn to_f64<T: UnsignedSample>(value: T) -> f64 {
    Into::<u64>::into(value) as f64
}

/// Second pass: `round((s - min) * MAX / (max - min))`
///
/// Evaluated as `(2 * (s - min) * MAX + span) / (2 * span)` in u64, which is the
/// exact half-up rounding of the rational result. `min` lands on 0 and `max`
/// on `MAX` with no floating-point drift. Requires `max > min`.
#[inline]
fn remap<T: UnsignedSample>(samples: &mut [T], min: u64, max: u64) {
    let white: u64 = T::MAX.into();
    let span = max - min;
    let denominator = 2 * span;

    for sample in samples.iter_mut() {
        let offset = Into::<u64>::into(*sample) - min;
        *sample = T::from_u64((2 * offset * white + span) / denominator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn level8(samples: &mut [u8]) -> ChannelOutcome {
        level_unsigned(samples, DegeneratePolicy::Skip, "gray").expect("8-bit leveling failed")
    }

    fn level16(samples: &mut [u16]) -> ChannelOutcome {
        level_unsigned(samples, DegeneratePolicy::Skip, "gray").expect("16-bit leveling failed")
    }

    #[test]
    fn test_gray8_two_pixels_span_full_range() {
        let mut pixels = [50u8, 200];
        let outcome = level8(&mut pixels);
        assert_eq!(pixels, [0, 255]);
        assert_eq!(outcome, ChannelOutcome::Stretched(SampleRange::new(50.0, 200.0)));
    }

    #[test]
    fn test_gray16_midpoint_rounds_half_up() {
        // 2000 * 65535 / 4000 = 32767.5
        let mut pixels = [1000u16, 5000, 3000];
        level16(&mut pixels);
        assert_eq!(pixels, [0, 65535, 32768]);
    }

    #[test]
    fn test_gray16_uses_high_byte() {
        // Values differing only above the low byte must still be distinguished
        let mut pixels = [0x0100u16, 0x0200, 0x0180];
        level16(&mut pixels);
        assert_eq!(pixels, [0, 65535, 32768]);
    }

    #[test]
    fn test_gray8_rounds_to_nearest() {
        // gradient = 255 / 3 = 85
        let mut pixels = [10u8, 11, 12, 13];
        level8(&mut pixels);
        assert_eq!(pixels, [0, 85, 170, 255]);

        // gradient = 255 / 2 = 127.5 -> 127.5 rounds up
        let mut pixels = [0u8, 1, 2];
        level8(&mut pixels);
        assert_eq!(pixels, [0, 128, 255]);

        // gradient = 255 / 100: 1 -> 2.55 -> 3, 33 -> 84.15 -> 84
        let mut pixels = [0u8, 1, 33, 100];
        level8(&mut pixels);
        assert_eq!(pixels, [0, 3, 84, 255]);
    }

    #[test]
    fn test_gray8_high_values_are_unsigned() {
        let mut pixels = [128u8, 255, 200];
        level8(&mut pixels);
        assert_eq!(pixels[0], 0);
        assert_eq!(pixels[1], 255);
        // (72 * 255) / 127 = 144.57
        assert_eq!(pixels[2], 145);
    }

    #[test]
    fn test_full_range_is_idempotent() {
        let original: Vec<u8> = (0..=255).collect();
        let mut pixels = original.clone();
        level8(&mut pixels);
        assert_eq!(pixels, original);

        let original: Vec<u16> = vec![0, 1, 32767, 40000, 65535];
        let mut pixels = original.clone();
        level16(&mut pixels);
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_mapping_is_monotonic() {
        let input: Vec<u16> = (0..500u16).map(|i| 7000 + i.wrapping_mul(37) % 9000).collect();
        let mut output = input.clone();
        level16(&mut output);

        for (i, a) in input.iter().enumerate() {
            for (j, b) in input.iter().enumerate() {
                if a < b {
                    assert!(output[i] <= output[j], "order broken for {a} < {b}");
                }
            }
        }
        assert_eq!(output.iter().min(), Some(&0));
        assert_eq!(output.iter().max(), Some(&65535));
    }

    #[test]
    fn test_flat_slice_is_unchanged() {
        let mut pixels = [128u8, 128, 128];
        let outcome = level8(&mut pixels);
        assert_eq!(pixels, [128, 128, 128]);
        assert_eq!(outcome, ChannelOutcome::Flat(128.0));
    }

    #[test]
    fn test_flat_slice_rejected() {
        let mut pixels = [9u16; 4];
        let result = level_unsigned(&mut pixels, DegeneratePolicy::Reject, "gray");
        assert_matches!(
            result,
            Err(LevelError::DegenerateRange { channel: "gray", value }) if value == 9.0
        );
        assert_eq!(pixels, [9; 4]);
    }

    #[test]
    fn test_empty_slice() {
        let mut pixels: [u8; 0] = [];
        assert_eq!(level8(&mut pixels), ChannelOutcome::Empty);
    }
}
