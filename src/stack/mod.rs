//! Multi-slice stacks and the per-slice leveling driver
//!
//! A stack owns the sample storage of every slice. The driver hands each
//! slice's buffer to a [`SliceLeveler`] in index order, or across rayon
//! workers when parallel leveling is requested. Slices never share state, so
//! both modes produce identical output.

mod picture;
mod raw;

pub use picture::{read_picture, write_picture};
pub use raw::{read_raw_stack, write_raw_stack};

use crate::error::LevelError;
use crate::level::{ChannelOutcome, LevelReport, SampleBuffer, SliceLeveler};
use crate::types::{Dimensions, Encoding};
use log::{Level, log, warn};
use rayon::prelude::*;

/// Owned samples of one slice
#[derive(Debug, Clone, PartialEq)]
pub enum SliceData {
    Gray8(Vec<u8>),
    Gray16(Vec<u16>),
    Gray32(Vec<f32>),
    Rgb { samples: Vec<u8>, alpha: bool },
}

impl SliceData {
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

    /// Mutable view handed to the leveler
    pub fn as_buffer_mut(&mut self) -> SampleBuffer<'_> {
        match self {
            Self::Gray8(s) => SampleBuffer::Gray8(s),
            Self::Gray16(s) => SampleBuffer::Gray16(s),
            Self::Gray32(s) => SampleBuffer::Gray32(s),
            Self::Rgb { samples, alpha } => SampleBuffer::Rgb {
                samples: samples.as_mut_slice(),
                alpha: *alpha,
            },
        }
    }
}

/// One frame of a stack; `index` counts from 1
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub data: SliceData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub dimensions: Dimensions,
    pub slices: Vec<Slice>,
}

impl Stack {
    /// Build a stack from slice data in order, numbering slices from 1
    #[must_use]
    pub fn new(dimensions: Dimensions, slices: impl IntoIterator<Item = SliceData>) -> Self {
        let slices = slices
            .into_iter()
            .enumerate()
            .map(|(i, data)| Slice { index: i + 1, data })
            .collect();

        Self { dimensions, slices }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Outcome of leveling one slice
#[derive(Debug, Clone, PartialEq)]
pub struct SliceResult {
    pub index: usize,
    pub result: Result<LevelReport, LevelError>,
}

/// Outcome of leveling a whole stack, in slice order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackSummary {
    pub results: Vec<SliceResult>,
}

impl StackSummary {
    /// Slices where at least one channel was remapped
    #[must_use]
    pub fn stretched(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.result.as_ref().is_ok_and(LevelReport::is_stretched))
            .count()
    }

    /// Slices left as they were (flat or empty in every channel)
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.result.as_ref().is_ok_and(|report| !report.is_stretched()))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_err()).count()
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Level every slice of `stack` independently
///
/// A failing slice is reported in the summary and left untouched; the other
/// slices are still processed.
pub fn level_stack(stack: &mut Stack, leveler: &SliceLeveler, parallel: bool) -> StackSummary {
    let dimensions = stack.dimensions;

    let results = if parallel {
        stack
            .slices
            .par_iter_mut()
            .map(|slice| level_one(slice, dimensions, leveler))
            .collect()
    } else {
        stack
            .slices
            .iter_mut()
            .map(|slice| level_one(slice, dimensions, leveler))
            .collect()
    };

    StackSummary { results }
}

fn level_one(slice: &mut Slice, dimensions: Dimensions, leveler: &SliceLeveler) -> SliceResult {
    let result = leveler.process_slice(dimensions, slice.data.as_buffer_mut());

    match &result {
        Ok(report) => log_report(slice.index, report),
        Err(e) => warn!("Slice {}: {e}", slice.index),
    }

    SliceResult {
        index: slice.index,
        result,
    }
}

/// `Warn` when a flat channel was left unchanged, `Info` otherwise
#[must_use]
pub fn report_level(report: &LevelReport) -> Level {
    let flat = report
        .channels()
        .iter()
        .any(|c| matches!(c, ChannelOutcome::Flat(_)));

    if flat { Level::Warn } else { Level::Info }
}

fn log_report(index: usize, report: &LevelReport) {
    match report_level(report) {
        Level::Warn => warn!("Slice {index}: flat channel left unchanged ({report})"),
        level => log!(level, "Slice {index}: {report}"),
    }
}
