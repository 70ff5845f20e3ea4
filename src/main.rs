use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use release_hooks::HookKind;

/// Release automation hooks: commit validation, git tagging, version policy.
#[derive(Debug, Parser)]
#[command(name = "release-hooks", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that commits since the last tag follow conventional commit format
    CommitValidator {
        /// Path to a KDL file with default hook options
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create (and optionally push) the release tag for a version
    GitTagger {
        /// Path to a KDL file with default hook options
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Enforce branch, workdir, and numbering policies on a version bump
    VersionPolicy {
        /// Path to a KDL file with default hook options
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (kind, config) = match cli.command {
        Commands::CommitValidator { config } => (HookKind::CommitValidator, config),
        Commands::GitTagger { config } => (HookKind::GitTagger, config),
        Commands::VersionPolicy { config } => (HookKind::VersionPolicy, config),
    };
    release_hooks::run_hook(kind, config.as_deref())
}
