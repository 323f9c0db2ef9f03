use crate::stack::{Stack, StackSummary};
use std::path::Path;

/// Print one line per slice: its index and what leveling did to it
pub fn print_slices(summary: &StackSummary) {
    for slice in &summary.results {
        match &slice.result {
            Ok(report) => println!("{:>8} {:<6}: {report}", "Slice", slice.index),
            Err(e) => println!("{:>8} {:<6}: failed: {e}", "Slice", slice.index),
        }
    }
}

pub fn print_summary(stack: &Stack, summary: &StackSummary, output: &Path) {
    let encoding = stack
        .slices
        .first()
        .map_or_else(|| "empty".to_string(), |s| s.data.encoding().to_string());

    println!("{:20}: {} [{encoding}]", "Dimensions", stack.dimensions);
    println!("{:20}: {}", "Slices", stack.len());
    println!("{:20}: {}", "Stretched", summary.stretched());
    println!("{:20}: {}", "Unchanged", summary.unchanged());

    if summary.failed() > 0 {
        println!("{:20}: {}", "Failed", summary.failed());
    }

    println!("{:20}: {}", "Output", output.display());
}
