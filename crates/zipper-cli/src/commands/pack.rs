//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use std::path::Path;
use std::path::PathBuf;
use zipper_core::ArchiveError;
use zipper_core::PackConfig;
use zipper_core::Packer;
use zipper_core::Sources;
use zipper_core::archive_file_name;
use zipper_core::validate_archive_name;

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let cwd = env::current_dir().context("cannot read the current directory")?;
    let output = output_path(args, &cwd);
    add_archive_context(check_output(args, &output), &output)?;

    let sources = if args.all {
        Sources::WorkingDirectory(cwd)
    } else {
        Sources::Paths(args.files.clone())
    };
    let roots = add_archive_context(sources.resolve(), &output)?;

    let config = PackConfig::default()
        .with_follow_symlinks(args.follow_symlinks)
        .with_allow_empty(args.all);
    let packer = Packer::new(config);
    let result = if show_progress {
        let mut progress = CliProgress::new("Packing");
        packer.pack_with_progress(&roots, &output, &mut progress)
    } else {
        packer.pack(&roots, &output)
    };
    let report = add_archive_context(result, &output)?;

    formatter.format_pack_result(&output, &report)
}

fn output_path(args: &PackArgs, cwd: &Path) -> PathBuf {
    let dir = args.path.as_deref().unwrap_or(cwd);
    dir.join(archive_file_name(&args.name))
}

/// Checks the archive name and output location before anything is read.
fn check_output(args: &PackArgs, output: &Path) -> zipper_core::Result<()> {
    validate_archive_name(&args.name)?;

    if let Some(dir) = &args.path
        && !dir.is_dir()
    {
        return Err(ArchiveError::PathNotFound { path: dir.clone() });
    }

    if output.exists() && !args.force {
        return Err(ArchiveError::InvalidArgument(format!(
            "archive already exists: {}\nHINT: Use --force to overwrite it.",
            output.display()
        )));
    }

    Ok(())
}
