//! Raw little-endian stacks
//!
//! A raw stack file is a plain concatenation of slices with no header. Each
//! slice holds `width * height` pixels of the declared encoding:
//! gray8 is one byte, gray16 a little-endian u16, gray32 a little-endian
//! IEEE-754 f32, and rgb three interleaved bytes.

use super::{SliceData, Stack};
use crate::types::{Dimensions, Encoding};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Read a raw stack; the file must hold a whole, non-zero number of slices
///
/// # Errors
///
/// Returns an error if the file cannot be read or its length is not a
/// multiple of the slice size
pub fn read_raw_stack(path: &Path, dimensions: Dimensions, encoding: Encoding) -> Result<Stack> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read raw stack: {}", path.display()))?;

    decode_stack(&bytes, dimensions, encoding)
}

/// Write every slice back in the raw layout
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_raw_stack(path: &Path, stack: &Stack) -> Result<()> {
    let bytes = encode_stack(stack);
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write raw stack: {}", path.display()))
}

fn decode_stack(bytes: &[u8], dimensions: Dimensions, encoding: Encoding) -> Result<Stack> {
    let slice_size = dimensions.pixel_count() * encoding.bytes_per_pixel();

    if slice_size == 0 {
        bail!("Invalid slice dimensions: {dimensions}");
    }
    if bytes.is_empty() || !bytes.len().is_multiple_of(slice_size) {
        bail!(
            "Invalid raw stack size: {} bytes is not a whole number of {dimensions} {encoding} slices ({slice_size} bytes each)",
            bytes.len()
        );
    }

    let slices = bytes
        .chunks_exact(slice_size)
        .map(|chunk| decode_slice(chunk, encoding));

    Ok(Stack::new(dimensions, slices))
}

fn decode_slice(chunk: &[u8], encoding: Encoding) -> SliceData {
    match encoding {
        Encoding::Gray8 => SliceData::Gray8(chunk.to_vec()),
        Encoding::Gray16 => SliceData::Gray16(
            chunk
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect(),
        ),
        Encoding::Gray32 => SliceData::Gray32(
            chunk
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ),
        Encoding::Rgb => SliceData::Rgb {
            samples: chunk.to_vec(),
            alpha: false,
        },
    }
}

fn encode_stack(stack: &Stack) -> Vec<u8> {
    let mut bytes = Vec::new();

    for slice in &stack.slices {
        match &slice.data {
            SliceData::Gray8(samples) => bytes.extend_from_slice(samples),
            SliceData::Gray16(samples) => {
                bytes.extend(samples.iter().flat_map(|v| v.to_le_bytes()));
            }
            SliceData::Gray32(samples) => {
                bytes.extend(samples.iter().flat_map(|v| v.to_le_bytes()));
            }
            SliceData::Rgb { samples, alpha: false } => bytes.extend_from_slice(samples),
            SliceData::Rgb { samples, alpha: true } => {
                // raw layout has no alpha
                bytes.extend(samples.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]));
            }
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::SliceLeveler;
    use crate::stack::level_stack;

    #[test]
    fn test_decode_gray16_slices() {
        let bytes: Vec<u8> = [1000u16, 5000, 3000, 1, 2, 3]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();

        let stack = decode_stack(&bytes, Dimensions::new(3, 1), Encoding::Gray16).unwrap();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.slices[0].data, SliceData::Gray16(vec![1000, 5000, 3000]));
        assert_eq!(stack.slices[1].data, SliceData::Gray16(vec![1, 2, 3]));
        assert_eq!(stack.slices[1].index, 2);
    }

    #[test]
    fn test_decode_gray32_slice() {
        let bytes: Vec<u8> = [0.2_f32, 0.8].iter().flat_map(|v| v.to_le_bytes()).collect();
        let stack = decode_stack(&bytes, Dimensions::new(2, 1), Encoding::Gray32).unwrap();
        assert_eq!(stack.slices[0].data, SliceData::Gray32(vec![0.2, 0.8]));
    }

    #[test]
    fn test_decode_rgb_slices() {
        let bytes = [1u8, 2, 3, 4, 5, 6];
        let stack = decode_stack(&bytes, Dimensions::new(1, 1), Encoding::Rgb).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(
            stack.slices[1].data,
            SliceData::Rgb { samples: vec![4, 5, 6], alpha: false }
        );
    }

    #[test]
    fn test_decode_rejects_partial_slice() {
        let err = decode_stack(&[0u8; 5], Dimensions::new(2, 1), Encoding::Gray16).unwrap_err();
        assert!(err.to_string().contains("Invalid raw stack size"));

        assert!(decode_stack(&[], Dimensions::new(2, 1), Encoding::Gray8).is_err());
    }

    #[test]
    fn test_encode_drops_alpha() {
        let stack = Stack::new(
            Dimensions::new(2, 1),
            [SliceData::Rgb { samples: vec![1, 2, 3, 9, 4, 5, 6, 9], alpha: true }],
        );
        assert_eq!(encode_stack(&stack), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_file_roundtrip_after_leveling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stack.raw");
        fs::write(&path, [50u8, 200, 128, 128, 10, 20]).unwrap();

        let mut stack = read_raw_stack(&path, Dimensions::new(2, 1), Encoding::Gray8).unwrap();
        assert_eq!(stack.len(), 3);

        let summary = level_stack(&mut stack, &SliceLeveler::new(), false);
        assert_eq!(summary.stretched(), 2);
        assert_eq!(summary.unchanged(), 1);

        write_raw_stack(&path, &stack).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0, 255, 128, 128, 0, 255]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_raw_stack(&dir.path().join("absent.raw"), Dimensions::new(1, 1), Encoding::Gray8)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read raw stack"));
    }
}
