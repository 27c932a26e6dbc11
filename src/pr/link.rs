//! Merge/pull request creation links for GitHub and GitLab.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

/// Longest description embedded in a link without truncation.
pub const MAX_DESCRIPTION_LENGTH: usize = 800;

/// Room kept free for the truncation notice.
pub const TRUNCATION_MARGIN: usize = 50;

/// Target branch for every generated link.
pub const TARGET_BRANCH: &str = "master";

/// Appended to a shortened description.
pub const TRUNCATION_NOTICE: &str = "--- Descrição completa será colada manualmente ---";

static SSH_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@([^:]+):(.+)\.git$").expect("Invalid regex"));

static URL_USERINFO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.-]*://)[^/@]+@").expect("Invalid regex"));

/// Hosting service recognized from a remote URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    GitHub,
    GitLab,
}

/// A creation link and whether its description was shortened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLink {
    /// `None` when the host is not recognized.
    pub url: Option<String>,
    pub truncated: bool,
}

/// Detect the host by substring. `gitlab` is checked first, so a GitLab
/// remote never produces a GitHub link.
pub fn detect_host(remote_url: &str) -> Option<Host> {
    if remote_url.contains("gitlab") {
        Some(Host::GitLab)
    } else if remote_url.contains("github.com") {
        Some(Host::GitHub)
    } else {
        None
    }
}

/// Rewrite `git@host:path.git` to `https://host/path`; otherwise strip a
/// trailing `.git`. Credentials (`user[:token]@`) in a URL remote are
/// dropped so they never reach the printed link.
pub fn normalize_remote_url(remote_url: &str) -> String {
    if let Some(caps) = SSH_REMOTE.captures(remote_url) {
        return format!("https://{}/{}", &caps[1], &caps[2]);
    }
    let without_credentials = URL_USERINFO.replace(remote_url, "$1");
    let url: &str = &without_credentials;
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Whether a description is too long to embed whole.
pub fn is_truncated(description: &str) -> bool {
    description.chars().count() > MAX_DESCRIPTION_LENGTH
}

/// Shorten a long description to whole lines that fit in
/// `MAX_DESCRIPTION_LENGTH - TRUNCATION_MARGIN` characters, followed by the
/// truncation notice. Descriptions within the limit are returned unchanged.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return description.to_string();
    }

    let budget = MAX_DESCRIPTION_LENGTH - TRUNCATION_MARGIN;
    let mut kept = String::new();
    let mut used = 0;

    for line in description.split('\n') {
        let cost = line.chars().count() + 1;
        if used + cost > budget {
            break;
        }
        kept.push_str(line);
        kept.push('\n');
        used += cost;
    }

    if !kept.is_empty() {
        kept.push('\n');
    }
    kept.push_str(TRUNCATION_NOTICE);
    kept
}

/// Form-encode a query component (spaces become `+`).
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Percent-encode a branch for a URL path, keeping `/` separators.
fn encode_branch_path(branch: &str) -> String {
    urlencoding::encode(branch).replace("%2F", "/")
}

fn query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the host-specific creation link for `branch`.
///
/// Host detection uses the remote URL as given; the link itself is built
/// from the normalized URL. `truncated` reflects the raw description length
/// on its own, independent of how the text was shortened.
pub fn build_request_url(remote_url: &str, branch: &str, title: &str, description: &str) -> PrLink {
    let truncated = is_truncated(description);

    let Some(host) = detect_host(remote_url) else {
        debug!("No link format for remote {}", remote_url);
        return PrLink {
            url: None,
            truncated,
        };
    };

    let base = normalize_remote_url(remote_url);
    let body = truncate_description(description);

    let url = match host {
        Host::GitHub => format!(
            "{}/compare/{}...{}?{}",
            base,
            TARGET_BRANCH,
            encode_branch_path(branch),
            query(&[("quick_pull", "1"), ("title", title), ("body", &body)])
        ),
        Host::GitLab => format!(
            "{}/-/merge_requests/new?{}",
            base,
            query(&[
                ("merge_request[source_branch]", branch),
                ("merge_request[target_branch]", TARGET_BRANCH),
                ("merge_request[title]", title),
                ("merge_request[description]", &body),
            ])
        ),
    };

    debug!("Built {:?} link ({} chars, truncated: {})", host, url.len(), truncated);

    PrLink {
        url: Some(url),
        truncated,
    }
}
