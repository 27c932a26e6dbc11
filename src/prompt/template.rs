//! Pull request template discovery.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Conventional template locations, relative to the repository root, in lookup order.
pub const TEMPLATE_CANDIDATES: &[&str] = &[
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    "docs/pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
    ".gitlab/merge_request_templates/Default.md",
];

/// Read the first PR template found under `root`.
///
/// Returns `None` when no candidate exists (or none can be read), which puts
/// the PR prompt in template-free mode.
pub fn load_pr_template(root: &Path) -> Option<String> {
    for candidate in TEMPLATE_CANDIDATES {
        let path = root.join(candidate);
        if !path.is_file() {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Using PR template {}", path.display());
                return Some(content);
            }
            Err(e) => warn!("Could not read PR template {}: {}", path.display(), e),
        }
    }
    None
}
