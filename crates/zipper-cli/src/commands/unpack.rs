//! Unpack command implementation.

use crate::cli::UnpackArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use zipper_core::ExtractConfig;
use zipper_core::Extractor;

pub fn execute(
    args: &UnpackArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let dest = match &args.path {
        Some(path) => path.clone(),
        None => env::current_dir().context("cannot read the current directory")?,
    };

    let extractor = Extractor::new(ExtractConfig::default());
    let result = if show_progress {
        let mut progress = CliProgress::new("Unpacking");
        extractor.extract_with_progress(&args.archive, &dest, &mut progress)
    } else {
        extractor.extract(&args.archive, &dest)
    };
    let report = add_archive_context(result, &args.archive)?;

    formatter.format_unpack_result(&args.archive, &dest, &report)
}
