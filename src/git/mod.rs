//! Version-control access: the backend trait, its git2 implementation, and
//! remote branch resolution.

pub mod backend;
pub mod executor;
pub mod remote;
pub mod repo;

pub use backend::{
    CommitLog, CommitRecord, DiffScope, DiffSummary, FileStat, GitBackend, RemoteInfo,
    StatusEntry,
};
pub use remote::{pending_commits, resolve_remote_branch, RemoteBranch};
pub use repo::Git2Backend;
