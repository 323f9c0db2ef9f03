//! Single-slice stacks backed by picture files (PNG, TIFF, ...)

use super::{SliceData, Stack};
use crate::types::{Dimensions, Encoding};
use anyhow::{Context, Result, bail};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use std::path::Path;

/// Open a picture as a one-slice stack
///
/// # Errors
///
/// Returns an error if the file cannot be decoded, or wraps
/// [`crate::error::LevelError::UnsupportedEncoding`] for colour types other than
/// L8, L16, RGB8 and RGBA8
pub fn read_picture(path: &Path) -> Result<Stack> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;

    picture_to_stack(image)
}

/// Save a one-slice stack with the format implied by the path's extension
///
/// # Errors
///
/// Returns an error if the stack does not hold exactly one 8/16-bit or RGB
/// slice, or if encoding fails
pub fn write_picture(path: &Path, stack: &Stack) -> Result<()> {
    let image = stack_to_picture(stack)?;

    image
        .save(path)
        .with_context(|| format!("Failed to save image: {}", path.display()))
}

fn picture_to_stack(image: DynamicImage) -> Result<Stack> {
    let dimensions = Dimensions::new(image.width(), image.height());
    let color = image.color();

    let data = match Encoding::try_from(color)? {
        Encoding::Gray8 => SliceData::Gray8(image.into_luma8().into_raw()),
        Encoding::Gray16 => SliceData::Gray16(image.into_luma16().into_raw()),
        Encoding::Rgb if color.has_alpha() => SliceData::Rgb {
            samples: image.into_rgba8().into_raw(),
            alpha: true,
        },
        Encoding::Rgb => SliceData::Rgb {
            samples: image.into_rgb8().into_raw(),
            alpha: false,
        },
        Encoding::Gray32 => bail!("gray32 slices can only be read from raw stacks"),
    };

    Ok(Stack::new(dimensions, [data]))
}

fn stack_to_picture(stack: &Stack) -> Result<DynamicImage> {
    let [slice] = stack.slices.as_slice() else {
        bail!(
            "A picture holds exactly one slice, stack has {}",
            stack.len()
        );
    };

    let Dimensions { width, height } = stack.dimensions;

    let image = match &slice.data {
        SliceData::Gray8(samples) => DynamicImage::ImageLuma8(
            GrayImage::from_raw(width, height, samples.clone())
                .context("Failed to create gray8 image buffer")?,
        ),
        SliceData::Gray16(samples) => DynamicImage::ImageLuma16(
            ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width, height, samples.clone())
                .context("Failed to create gray16 image buffer")?,
        ),
        SliceData::Rgb { samples, alpha: false } => DynamicImage::ImageRgb8(
            RgbImage::from_raw(width, height, samples.clone())
                .context("Failed to create RGB image buffer")?,
        ),
        SliceData::Rgb { samples, alpha: true } => DynamicImage::ImageRgba8(
            RgbaImage::from_raw(width, height, samples.clone())
                .context("Failed to create RGBA image buffer")?,
        ),
        SliceData::Gray32(_) => bail!("gray32 slices can only be written as raw stacks"),
    };

    Ok(image)
}
