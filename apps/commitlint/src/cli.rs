//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "commitlint",
    version,
    about = "Lint commit messages against conventional-commit rules",
    long_about = "commitlint — a small, fast commit-message linter.\n\nRules come from base sets named in `extends` plus local overrides in commitlint.toml (or .commitlintrc.{toml,yaml,yml,json}).\nConfiguration precedence: CLI > config file > defaults.\n\nExit codes: 0 pass, 1 warnings only, 2 errors, 3 broken configuration or unreadable input.",
    after_help = "Examples:\n  commitlint lint --edit\n  echo 'fix(parser): handle empty input' | commitlint lint\n  git log -z --format=%B main..HEAD | commitlint lint --null\n  commitlint print-config --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging (COMMITLINT_LOG overrides)")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current commitlint version.")]
    Version,
    /// Lint commit messages
    #[command(
        about = "Lint commit messages",
        long_about = "Lint messages read from files, glob patterns, or stdin. Rules with severity 0 are skipped; warnings exit 1, errors exit 2.",
        after_help = "Examples:\n  commitlint lint --edit .git/COMMIT_EDITMSG\n  commitlint lint msgs/*.txt --output json\n  commitlint lint --extends conventional -"
    )]
    Lint {
        #[arg(help = "Message files or glob patterns; '-' reads stdin (default: stdin)")]
        inputs: Vec<String>,
        #[arg(
            long,
            short,
            num_args = 0..=1,
            default_missing_value = crate::input::COMMIT_EDITMSG,
            help = "Read the commit-msg hook file, stripping git comments (default: .git/COMMIT_EDITMSG)"
        )]
        edit: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Inputs hold several messages separated by NUL bytes")]
        null: bool,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, short, help = "Config file path (default: discovered)")]
        config: Option<String>,
        #[arg(long, help = "Base rule set; repeat to merge several (replaces config extends)")]
        extends: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// List available rules
    #[command(
        about = "List rules",
        long_about = "List every registered rule with its default severity."
    )]
    Rules {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the resolved configuration
    #[command(
        about = "Print resolved config",
        long_about = "Resolve extends and overrides and print the rule set that lint would use."
    )]
    PrintConfig {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, short, help = "Config file path (default: discovered)")]
        config: Option<String>,
        #[arg(long, help = "Base rule set; repeat to merge several (replaces config extends)")]
        extends: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Write a starter config
    #[command(
        about = "Create commitlint.toml",
        long_about = "Write a starter commitlint.toml extending the conventional rule set."
    )]
    Init {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Overwrite an existing commitlint.toml")]
        force: bool,
    },
}
