use autolevel::cli::Args;
use autolevel::display_summary;
use autolevel::stack::{self, Stack, StackSummary};
use autolevel::{ProcessError, SliceLeveler};
use clap::{CommandFactory, Parser};
use std::path::Path;

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    let multiple_files = args.files.len() > 1;
    let mut any_failed = false;

    for (idx, file_path) in args.files.iter().enumerate() {
        if multiple_files {
            println!("{}", file_path.display());
        }

        if let Err(e) = process_file(file_path, &args) {
            println!("Error: {e}");
            any_failed = true;
        }

        if multiple_files && idx < args.files.len() - 1 {
            println!();
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

/// Default filter: `info` with --verbose so per-slice ranges show, `warn` without
fn default_log_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// `RUST_LOG` wins over the default filter
fn init_logger(verbose: bool) {
    let default_level = default_log_level(verbose).to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Level every slice of one input file and write the result
fn process_file(file_path: &Path, args: &Args) -> Result<StackSummary, ProcessError> {
    // Stage 1: Load the stack
    let mut stack = load_stack(file_path, args).map_err(ProcessError::LoadFailed)?;
    log::info!(
        "Loaded {} slice(s) of {} from {}",
        stack.len(),
        stack.dimensions,
        file_path.display()
    );

    // Stage 2: Level each slice on its own statistics
    let leveler = SliceLeveler::with_policy(args.policy());
    let summary = stack::level_stack(&mut stack, &leveler, args.parallel);

    // Stage 3: Write the result, failed slices keep their original samples
    let output = args.output_path(file_path);
    save_stack(&output, &stack, args).map_err(|error| ProcessError::SaveFailed {
        path: output.clone(),
        error,
    })?;

    // Stage 4: Report
    if args.verbose {
        display_summary::print_slices(&summary);
    }
    display_summary::print_summary(&stack, &summary, &output);

    if !summary.is_success() {
        return Err(ProcessError::LevelFailed {
            failed: summary.failed(),
            total: stack.len(),
        });
    }

    Ok(summary)
}

fn load_stack(file_path: &Path, args: &Args) -> anyhow::Result<Stack> {
    match args.raw {
        Some(dimensions) => stack::read_raw_stack(file_path, dimensions, args.encoding),
        None => stack::read_picture(file_path),
    }
}

fn save_stack(output: &Path, stack: &Stack, args: &Args) -> anyhow::Result<()> {
    if args.raw.is_some() {
        stack::write_raw_stack(output, stack)
    } else {
        stack::write_picture(output, stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    fn raw_args(dir: &Path, extra: &[&str]) -> Args {
        let mut argv = vec!["autolevel", "--raw", "2x1", "-o"];
        argv.push(dir.to_str().unwrap());
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbose_shows_per_slice_ranges() {
        use autolevel::level::{ChannelOutcome, LevelReport};
        use autolevel::types::SampleRange;

        let report = LevelReport::Gray(ChannelOutcome::Stretched(SampleRange::new(50.0, 200.0)));
        let level = stack::report_level(&report);

        assert!(level <= default_log_level(true));
        assert!(level > default_log_level(false));
    }

    #[test]
    fn test_raw_stack_is_leveled_per_slice() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stack.raw");
        fs::write(&input, [50u8, 200, 128, 128, 0, 100]).unwrap();

        let args = raw_args(dir.path(), &[]);
        let summary = process_file(&input, &args).unwrap();

        assert_eq!(summary.stretched(), 2);
        assert_eq!(summary.unchanged(), 1);
        let output = fs::read(dir.path().join("stack_leveled.raw")).unwrap();
        assert_eq!(output, vec![0, 255, 128, 128, 0, 255]);
    }

    #[test]
    fn test_strict_mode_reports_failed_slices() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stack.raw");
        fs::write(&input, [50u8, 200, 128, 128]).unwrap();

        let args = raw_args(dir.path(), &["--strict"]);
        let result = process_file(&input, &args);

        assert_matches!(result, Err(ProcessError::LevelFailed { failed: 1, total: 2 }));
        // The good slice is still written
        let output = fs::read(dir.path().join("stack_leveled.raw")).unwrap();
        assert_eq!(output, vec![0, 255, 128, 128]);
    }

    #[test]
    fn test_truncated_raw_stack_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.raw");
        fs::write(&input, [1u8, 2, 3]).unwrap();

        let args = raw_args(dir.path(), &["-e", "gray16"]);
        let result = process_file(&input, &args);

        assert_matches!(result, Err(ProcessError::LoadFailed(_)));
    }

    #[test]
    fn test_missing_picture_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.png");
        let args = Args::try_parse_from(["autolevel", input.to_str().unwrap()]).unwrap();

        assert_matches!(process_file(&input, &args), Err(ProcessError::LoadFailed(_)));
    }
}
