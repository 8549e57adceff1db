//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

/// Command-line utility for packing files into ZIP archives and unpacking
/// them safely.
#[derive(Parser)]
#[command(name = "zipper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack files and directories into a ZIP archive
    Pack(PackArgs),
    /// Unpack a ZIP archive into a directory
    Unpack(UnpackArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pack(_) => "pack",
            Self::Unpack(_) => "unpack",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Archive name, without the .zip extension
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Files or directories to pack, in order
    #[arg(
        value_name = "FILES",
        required_unless_present = "all",
        conflicts_with = "all"
    )]
    pub files: Vec<PathBuf>,

    /// Pack everything in the current directory
    #[arg(short, long)]
    pub all: bool,

    /// Directory to write the archive to (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Overwrite the archive if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,
}

#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to unpack into (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pack_files_and_all_conflict() {
        let result = Cli::try_parse_from(["zipper", "pack", "test", "a.txt", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pack_requires_files_or_all() {
        assert!(Cli::try_parse_from(["zipper", "pack", "test"]).is_err());
        assert!(Cli::try_parse_from(["zipper", "pack", "test", "-a"]).is_ok());
    }

    #[test]
    fn test_pack_arguments() {
        let cli = Cli::try_parse_from([
            "zipper", "pack", "test2", "dir", "ch", "-p", "out", "--force",
        ])
        .map_err(|e| e.to_string());

        let Ok(Cli {
            command: Commands::Pack(args),
            ..
        }) = cli
        else {
            panic!("expected pack command");
        };
        assert_eq!(args.name, "test2");
        assert_eq!(args.files, vec![PathBuf::from("dir"), PathBuf::from("ch")]);
        assert_eq!(args.path, Some(PathBuf::from("out")));
        assert!(args.force);
        assert!(!args.all);
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::try_parse_from(["zipper", "--json", "unpack", "a.zip"]).map_err(|e| e.to_string());
        let Ok(cli) = cli else {
            panic!("unpack should parse");
        };
        assert!(cli.json);
        assert_eq!(cli.command.name(), "unpack");
    }
}
