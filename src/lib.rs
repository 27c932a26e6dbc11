//! gromit - AI-assisted commit messages and pull request drafts.
//!
//! # Overview
//!
//! gromit collects the changes in a git repository, builds a localized
//! prompt (pt-BR, es or en), sends it to an OpenAI-compatible
//! chat-completions endpoint, and turns the reply into a commit message or a
//! pull request title and description with a ready-to-open GitHub/GitLab
//! creation link.

pub mod changes;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod pr;
pub mod prompt;

// Re-export commonly used types
pub use changes::{ChangeSet, ChangeType, FileChange, Totals};
pub use config::{ConfigStore, FileConfigStore, GromitConfig, ValidatedConfig};
pub use error::{CommandError, ConfigError, GenerationError, GitError};
pub use git::{DiffScope, Git2Backend, GitBackend};
pub use llm::{CallProfile, GenerationClient, GenerationResult, TextGenerator};
pub use pr::{PrArtifact, PrDraft, PrLink};
pub use prompt::Locale;
