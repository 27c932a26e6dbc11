//! gromit - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gromit::commands::{
    analyze::{self, AnalyzeOptions},
    commit::{self, CommitOptions},
    config::{self, ConfigOptions},
    generation_setup,
    push::{self, PushOptions},
    review::{self, ReviewOptions},
};
use gromit::{CommandError, FileConfigStore, Git2Backend, GenerationClient, ValidatedConfig};

/// Environment variable holding a tracing filter directive.
const LOG_ENV_VAR: &str = "GROMIT_LOG";

/// Generate commit messages and pull request drafts with AI.
#[derive(Parser, Debug)]
#[command(name = "gromit")]
#[command(about = "Generate commit messages and pull request drafts with AI")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze current changes and build the commit prompt
    Analyze {
        /// Print the generated prompt
        #[arg(long)]
        show_prompt: bool,

        /// Analyze commits pending push and build a pull request prompt
        #[arg(long)]
        push: bool,

        /// Do not copy the prompt to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Generate a commit message and commit all changes
    Commit {
        /// Commit without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Review commits pending push
    Review {
        /// Include a diff preview
        #[arg(long)]
        show_diff: bool,
    },

    /// Push pending commits and draft a pull request
    Push {
        /// Push even with uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Include a diff preview
        #[arg(long)]
        show_diff: bool,

        /// Push without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Skip pull request drafting
        #[arg(long)]
        no_pr: bool,
    },

    /// Configure the AI endpoint, key, model and language
    Config {
        /// Chat-completions endpoint URL
        #[arg(long)]
        url: Option<String>,

        /// API key
        #[arg(long)]
        key: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Prompt language (pt-BR, es, en-US)
        #[arg(long)]
        language: Option<String>,

        /// Show the current configuration
        #[arg(long)]
        show: bool,

        /// Remove the configuration file
        #[arg(long)]
        reset: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gromit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli.command).await {
        Err(CommandError::Cancelled) => {
            println!("Operation cancelled.");
            Ok(())
        }
        other => other.context("Command failed"),
    }
}

async fn execute(command: Command) -> Result<(), CommandError> {
    let backend = Git2Backend::current_dir();
    let store = FileConfigStore::default_location()?;

    match command {
        Command::Analyze {
            show_prompt,
            push,
            no_copy,
        } => {
            let options = AnalyzeOptions {
                show_prompt,
                push,
                copy: !no_copy,
            };
            analyze::run(&backend, &store, &options)?;
        }
        Command::Commit { yes } => {
            let (config, client) = generation_setup(&store)?;
            commit::run(&backend, &config, &client, &CommitOptions { yes }).await?;
        }
        Command::Review { show_diff } => {
            review::run(&backend, &ReviewOptions { show_diff })?;
        }
        Command::Push {
            force,
            show_diff,
            yes,
            no_pr,
        } => {
            let setup = if no_pr { None } else { pr_setup(&store) };
            let pr = setup
                .as_ref()
                .map(|(config, client)| (config, client));
            let options = PushOptions {
                force,
                show_diff,
                yes,
                no_pr,
            };
            push::run(&backend, pr, &options).await?;
        }
        Command::Config {
            url,
            key,
            model,
            language,
            show,
            reset,
        } => {
            config::run(
                &store,
                &ConfigOptions {
                    url,
                    key,
                    model,
                    language,
                    show,
                    reset,
                },
            )?;
        }
    }

    Ok(())
}

/// Configuration for drafting the PR after a push. An invalid configuration
/// only disables drafting.
fn pr_setup(store: &FileConfigStore) -> Option<(ValidatedConfig, GenerationClient)> {
    match generation_setup(store) {
        Ok(setup) => Some(setup),
        Err(e) => {
            println!("Pull request drafting disabled: {}", e);
            None
        }
    }
}
