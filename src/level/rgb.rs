use super::integer::level_unsigned;
use super::{ChannelOutcome, DegeneratePolicy};
use crate::error::LevelError;

/// Separate R, G, B planes of an interleaved 8-bit buffer
struct Planes {
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
}

impl Planes {
    /// Split interleaved pixels of `stride` bytes (3 for RGB, 4 for RGBA)
    fn decompose(samples: &[u8], stride: usize) -> Self {
        let pixel_count = samples.len() / stride;
        let mut red = Vec::with_capacity(pixel_count);
        let mut green = Vec::with_capacity(pixel_count);
        let mut blue = Vec::with_capacity(pixel_count);

        for pixel in samples.chunks_exact(stride) {
            red.push(pixel[0]);
            green.push(pixel[1]);
            blue.push(pixel[2]);
        }

        Self { red, green, blue }
    }

    /// Write the planes back; bytes past the third of each pixel are left alone
    fn recompose(&self, samples: &mut [u8], stride: usize) {
        let planes = self.red.iter().zip(&self.green).zip(&self.blue);
        for (pixel, ((&r, &g), &b)) in samples.chunks_exact_mut(stride).zip(planes) {
            pixel[0] = r;
            pixel[1] = g;
            pixel[2] = b;
        }
    }
}

/// Level each colour channel independently with the 8-bit procedure
///
/// The interleaved buffer is only written once all three channels succeeded.
pub(super) fn level_rgb(
    samples: &mut [u8],
    stride: usize,
    policy: DegeneratePolicy,
) -> Result<[ChannelOutcome; 3], LevelError> {
    let mut planes = Planes::decompose(samples, stride);

    let red = level_unsigned(&mut planes.red, policy, "red")?;
    let green = level_unsigned(&mut planes.green, policy, "green")?;
    let blue = level_unsigned(&mut planes.blue, policy, "blue")?;

    planes.recompose(samples, stride);

    Ok([red, green, blue])
}
