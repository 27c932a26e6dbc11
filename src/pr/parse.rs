//! Split a generated PR response into a title and a description.

/// Title fallback length when the response has no title marker.
pub const FALLBACK_TITLE_CHARS: usize = 60;

const TITLE_MARKERS: &[&str] = &["título:", "title:"];
const DESCRIPTION_MARKERS: &[&str] = &["descrição:", "description:", "descripción:"];

/// Title and description extracted from generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrDraft {
    pub title: String,
    pub description: String,
}

/// Parse a `Title: ... / Description: ...` response.
///
/// Never fails. Without a title marker the title is the first line (at most
/// 60 characters); without a description marker the description is the
/// whole text. Both fields are trimmed.
pub fn parse_pr_response(raw: &str) -> PrDraft {
    let mut title: Option<String> = None;
    let mut description = String::new();
    let mut in_description = false;

    for line in raw.lines() {
        if !in_description {
            if let Some(rest) = match_marker(line, TITLE_MARKERS) {
                title = Some(rest.trim().to_string());
                continue;
            }
            if let Some(rest) = match_marker(line, DESCRIPTION_MARKERS) {
                in_description = true;
                if !rest.trim().is_empty() {
                    description.push_str(rest.trim());
                    description.push('\n');
                }
            }
            continue;
        }

        if !line.trim().is_empty() {
            description.push_str(line.trim_end());
            description.push('\n');
        }
    }

    let title = match title {
        Some(t) => t,
        None => raw
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(FALLBACK_TITLE_CHARS)
            .collect(),
    };

    let description = if in_description {
        description
    } else {
        raw.to_string()
    };

    PrDraft {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
    }
}

/// Match any of `markers` at the start of `line`, ignoring case and any
/// leading markdown emphasis or heading characters. Returns the text after
/// the marker.
fn match_marker<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*' || c == '#');
    markers.iter().find_map(|marker| {
        strip_prefix_ignore_case(line, marker).map(|rest| rest.trim_start_matches('*'))
    })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(match chars.next() {
        Some((idx, _)) => &text[idx..],
        None => "",
    })
}
