//! Plain-text and markdown extraction. Both produce a single page.

use super::PageContent;

/// Decode as UTF-8, replacing invalid sequences and dropping a leading BOM.
pub(crate) fn decode(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    text.strip_prefix('\u{feff}').unwrap_or(text).to_string()
}

fn single_page(text: &str, headings: Vec<String>) -> Vec<PageContent> {
    vec![PageContent {
        page_number: 1,
        text: text.trim().to_string(),
        headings,
    }]
}

pub fn extract_plain(bytes: &[u8]) -> Vec<PageContent> {
    single_page(&decode(bytes), Vec::new())
}

/// Markdown is kept verbatim; ATX headings outside fenced code blocks are
/// collected as page metadata.
pub fn extract_markdown(bytes: &[u8]) -> Vec<PageContent> {
    let text = decode(bytes);
    let mut headings = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let line = line.trim_start();
        if line.starts_with("```") || line.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(heading) = atx_heading(line) {
            headings.push(heading.to_string());
        }
    }

    single_page(&text, headings)
}

/// `# Title` through `###### Title`; `#hashtag` is not a heading.
fn atx_heading(line: &str) -> Option<&str> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    let title = rest.trim().trim_end_matches('#').trim();
    (!title.is_empty()).then_some(title)
}
