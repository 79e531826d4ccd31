//! commitlint CLI binary entry point.
//! Resolves configuration, lints messages, and exits with the report status.

use clap::Parser;
use commitlint::cli::{Cli, Commands};
use commitlint::output;
use commitlint::rules::Registry;
use commitlint::run::{fatal, run_lint, LintRequest};
use commitlint::{config, resolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            inputs,
            edit,
            null,
            repo_root,
            config: config_path,
            extends,
            output: output_mode,
        } => {
            let code = run_lint(&LintRequest {
                inputs,
                edit,
                null,
                repo_root,
                config: config_path,
                extends,
                output: output_mode,
            });
            std::process::exit(code);
        }
        Commands::Rules {
            output: output_mode,
        } => {
            output::print_rules(&Registry::builtin(), output_mode.as_deref().unwrap_or("human"));
        }
        Commands::PrintConfig {
            repo_root,
            config: config_path,
            extends,
            output: output_mode,
        } => {
            let eff = match config::resolve_effective(
                repo_root.as_deref(),
                config_path.as_deref(),
                output_mode.as_deref(),
                &extends,
            ) {
                Ok(eff) => eff,
                Err(e) => std::process::exit(fatal(e)),
            };
            match resolver::resolve_config(&eff.config) {
                Ok(resolved) => output::print_config(&resolved, &eff.output),
                Err(e) => std::process::exit(fatal(e)),
            }
        }
        Commands::Init { repo_root, force } => {
            let root = config::detect_repo_root(&PathBuf::from(repo_root.as_deref().unwrap_or(".")));
            match config::write_default_config(&root, force) {
                Ok(path) => println!("created: {}", path.to_string_lossy()),
                Err(e) => std::process::exit(fatal(e)),
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("COMMITLINT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
