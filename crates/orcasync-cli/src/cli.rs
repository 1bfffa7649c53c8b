use clap::{Parser, Subcommand, ValueEnum};
use orcasync_core::Category;
use std::path::PathBuf;

/// OrcaSlicer Profile Synchronization Tool
///
/// Sync managed filament, machine and process profiles between the OrcaSlicer
/// user directory and a version-controlled local mirror
#[derive(Parser, Debug)]
#[command(name = "orcasync")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Approve every operation without prompting
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override OrcaSlicer user profile path (default: <config dir>/OrcaSlicer/user/default)
    #[arg(long, global = true, value_name = "PATH")]
    pub user_path: Option<PathBuf>,

    /// Override local mirror path (default: ./orca_profiles/default)
    #[arg(long, global = true, value_name = "PATH")]
    pub local_path: Option<PathBuf>,

    /// Override backup path (default: ./backups)
    #[arg(long, global = true, value_name = "PATH")]
    pub backup_path: Option<PathBuf>,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a backup of current OrcaSlicer profiles
    Backup,

    /// Fetch profiles from OrcaSlicer into the local mirror
    Fetch {
        /// Only profiles whose filename contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Overwrite local profiles that are newer than OrcaSlicer's
        #[arg(long, conflicts_with = "skip_divergent")]
        force: bool,

        /// Leave local profiles that are newer than OrcaSlicer's untouched
        #[arg(long)]
        skip_divergent: bool,
    },

    /// Back up, then replace OrcaSlicer profiles with the local mirror
    Push {
        /// Copy new and newer profiles only, deleting nothing
        #[arg(long)]
        merge: bool,

        /// With --merge: overwrite OrcaSlicer profiles that are newer
        #[arg(long, requires = "merge", conflicts_with = "skip_divergent")]
        force: bool,

        /// With --merge: leave newer OrcaSlicer profiles untouched
        #[arg(long, requires = "merge")]
        skip_divergent: bool,
    },

    /// Show differences between OrcaSlicer and local profiles
    Diff {
        /// Show all files, including identical ones
        #[arg(long)]
        all: bool,

        /// Show line-by-line diffs for differing files
        #[arg(long)]
        details: bool,

        /// Compare modification times instead of contents
        #[arg(long)]
        mtime: bool,
    },

    /// Show which profiles would move on fetch or push
    Status,

    /// Validate managed OrcaSlicer profiles for syntax and structure
    Validate,

    /// Make inherited profiles standalone in OrcaSlicer
    Flatten {
        /// Category to flatten (repeatable, default: filament)
        #[arg(short, long = "category", value_enum)]
        categories: Vec<CategoryArg>,

        /// Follow inheritance chains to the root instead of one level
        #[arg(long)]
        transitive: bool,
    },

    /// Restore a backup to OrcaSlicer
    Restore {
        /// Backup id (prompted for when omitted)
        snapshot: Option<String>,
    },

    /// Back up, then remove all managed profiles from OrcaSlicer
    Clean,

    /// List managed profiles in OrcaSlicer
    List,

    /// Show the git history of a local profile
    History {
        /// Profile filename (prompted for when omitted)
        filename: Option<String>,
    },

    /// Run git operations on the local mirror
    Git {
        /// Git action to perform
        #[arg(value_enum)]
        action: GitAction,

        /// Commit message (for commit)
        #[arg(short, long)]
        message: Option<String>,

        /// Target branch (for checkout)
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Show active configuration and resolved settings
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    /// Filament profiles
    Filament,
    /// Machine profiles
    Machine,
    /// Process profiles
    Process,
    /// All categories
    All,
}

impl CategoryArg {
    /// Resolve category arguments, defaulting to filament
    pub fn resolve(args: &[Self]) -> Vec<Category> {
        if args.is_empty() {
            return vec![Category::Filament];
        }
        if args.iter().any(|a| matches!(a, Self::All)) {
            return Category::ALL.to_vec();
        }

        args.iter()
            .filter_map(|arg| match arg {
                Self::Filament => Some(Category::Filament),
                Self::Machine => Some(Category::Machine),
                Self::Process => Some(Category::Process),
                Self::All => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GitAction {
    /// git status
    Status,
    /// git fetch
    Fetch,
    /// git pull
    Pull,
    /// git push
    Push,
    /// git add + git commit (requires -m)
    Commit,
    /// git pull --rebase
    Rebase,
    /// git branch -vv
    Branch,
    /// git checkout (requires -b)
    Checkout,
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
    fn test_category_args_default_to_filament() {
        assert_eq!(CategoryArg::resolve(&[]), vec![Category::Filament]);
        assert_eq!(
            CategoryArg::resolve(&[CategoryArg::Process, CategoryArg::Machine]),
            vec![Category::Process, Category::Machine]
        );
        assert_eq!(
            CategoryArg::resolve(&[CategoryArg::Machine, CategoryArg::All]),
            Category::ALL.to_vec()
        );
    }

    #[test]
    fn test_merge_flags_require_merge() {
        let parsed = Cli::try_parse_from(["orcasync", "push", "--force"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["orcasync", "push", "--merge", "--force"]).unwrap();
        assert!(matches!(
            parsed.command,
            Commands::Push {
                merge: true,
                force: true,
                skip_divergent: false
            }
        ));
    }
}
