//! Error types for gromit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving, or validating the per-user configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "No configuration found at {}. Run `gromit config --url <url> --key <key>` to set up the AI endpoint.",
        path.display()
    )]
    NotFound { path: PathBuf },

    #[error("AI endpoint URL is not configured. Run `gromit config --url <url>` to set it.")]
    MissingUrl,

    #[error("API key is not configured. Run `gromit config --key <key>` to set it.")]
    MissingApiKey,

    #[error("Could not determine the home directory for the configuration file")]
    NoHomeDir,

    #[error("Failed to write configuration to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove configuration at {}: {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from the version-control backend.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("This directory is not a valid git repository")]
    NotARepository,

    #[error("Bare repositories are not supported")]
    BareRepository,

    #[error("Failed to read repository status: {0}")]
    Status(#[source] git2::Error),

    #[error("Failed to compute diff: {0}")]
    Diff(#[source] git2::Error),

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    Revwalk(#[source] git2::Error),

    #[error("Failed to read remotes: {0}")]
    Remote(#[source] git2::Error),

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    Signature(#[source] git2::Error),

    #[error("git executable not found in PATH")]
    GitNotInstalled,

    #[error("Push rejected: {0}")]
    PushFailed(String),
}

/// Errors from a single call to the generation endpoint.
///
/// These never escape the generation client: they are rendered into a
/// `GenerationResult::Failure` reason.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Connection error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response format from AI: {0}")]
    InvalidResponse(String),

    #[error("AI returned an empty message")]
    EmptyContent,
}

/// Errors surfaced by the command orchestrators.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Git(#[from] GitError),

    #[error("Failed to generate text: {0}")]
    Generation(String),

    #[error("Local commit could not be created: {0}")]
    CommitFailed(#[source] GitError),

    #[error("Push failed: {0}")]
    PushFailed(#[source] GitError),

    #[error("Operation cancelled")]
    Cancelled,
}
