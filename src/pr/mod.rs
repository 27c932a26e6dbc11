//! Pull request artifacts: response parsing and creation links.

pub mod link;
pub mod parse;

pub use link::{build_request_url, detect_host, normalize_remote_url, Host, PrLink};
pub use parse::{parse_pr_response, PrDraft};

/// A parsed PR draft together with its creation link.
///
/// `description` is always the full text; only the link carries the
/// shortened version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrArtifact {
    pub title: String,
    pub description: String,
    pub truncated: bool,
    /// `None` without a remote URL or for an unrecognized host.
    pub url: Option<String>,
}

impl PrArtifact {
    /// Parse `raw` and build the link for `branch` on `remote_url`.
    pub fn from_response(raw: &str, remote_url: Option<&str>, branch: &str) -> Self {
        let PrDraft { title, description } = parse_pr_response(raw);
        let link = match remote_url {
            Some(remote) => build_request_url(remote, branch, &title, &description),
            None => PrLink {
                url: None,
                truncated: link::is_truncated(&description),
            },
        };
        Self {
            title,
            description,
            truncated: link.truncated,
            url: link.url,
        }
    }
}
