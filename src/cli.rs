use crate::level::DegeneratePolicy;
use crate::types::{Dimensions, Encoding};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Stretch the contrast of every slice of an image stack independently
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image or raw stack file(s) to level
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory for leveled output [default: next to each input]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Read inputs as headerless little-endian stacks of WIDTHxHEIGHT slices
    #[arg(long, value_name = "WxH")]
    pub raw: Option<Dimensions>,

    /// Sample encoding of raw stacks (gray8, gray16, gray32, rgb)
    #[arg(short, long, default_value = "gray8")]
    pub encoding: Encoding,

    /// Fail flat slices instead of leaving them unchanged
    #[arg(long)]
    pub strict: bool,

    /// Level slices in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Show the observed range of every slice
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    #[must_use]
    pub fn policy(&self) -> DegeneratePolicy {
        if self.strict {
            DegeneratePolicy::Reject
        } else {
            DegeneratePolicy::Skip
        }
    }

    /// `<stem>_leveled.<ext>` inside the output directory, or beside `input`
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let dir = self
            .output
            .as_deref()
            .or_else(|| input.parent())
            .unwrap_or_else(|| Path::new(""));

        let stem = input
            .file_stem()
            .map_or_else(|| "stack".into(), |s| s.to_string_lossy());

        let name = match input.extension() {
            Some(ext) => format!("{stem}_leveled.{}", ext.to_string_lossy()),
            None => format!("{stem}_leveled"),
        };

        dir.join(name)
    }
}
