use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the default save directory.
pub const SAVE_DIR_ENV: &str = "BETTERSAVE_HOME";

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "1.2.0" for releases, "1.2.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bettersave", bin_name = "bettersave", version = get_version())]
#[command(
    about = "Per-item level and list storage with a trashcan and safe legacy migration",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Save directory (defaults to $BETTERSAVE_HOME, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the library, or the trash with --trash
    #[command(alias = "ls")]
    List {
        /// Show trashed items instead
        #[arg(long)]
        trash: bool,
    },

    /// Move items to the trash
    #[command(alias = "rm")]
    Trash {
        /// Item IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Move trashed items back into the library
    Restore {
        /// Item IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Permanently delete items
    Purge {
        /// Item IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Permanently delete everything in the trash
    Clear,

    /// Import exported .gmd / .gmdl files, or directories containing one
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Show save root, item counts and save format version
    Status,
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bettersave").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_command_means_list() {
        let cli = parse(&[]);
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_list_flags() {
        assert_eq!(
            parse(&["ls", "--trash"]).command,
            Some(Commands::List { trash: true })
        );
    }

    #[test]
    fn global_options_work_after_the_subcommand() {
        let cli = parse(&["trash", "a", "b", "--save-dir", "/tmp/x", "-v"]);
        assert_eq!(cli.save_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Trash {
                ids: vec!["a".into(), "b".into()]
            })
        );
    }

    #[test]
    fn ids_are_required() {
        assert!(Cli::try_parse_from(["bettersave", "purge"]).is_err());
        assert!(Cli::try_parse_from(["bettersave", "restore"]).is_err());
    }

    #[test]
    fn version_starts_with_package_version() {
        assert!(get_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
