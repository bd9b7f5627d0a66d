//! Whole-document conversion driver.

use crate::block;
use crate::escape;
use crate::inline;
use crate::nesting::BlockStack;
use crate::paragraph::{self, ParagraphTracker};

/// Converts a Markdown document into an HTML fragment.
///
/// The engine is total: anything that fails to match a recognized construct
/// passes through as literal paragraph text, so there is no error path.
/// Empty or whitespace-only input yields an empty string, and the result
/// carries no surrounding whitespace.
///
/// # Examples
///
/// ```
/// use quickdown_core::convert;
///
/// assert_eq!(convert("# Hello"), "<h1>Hello</h1>");
/// assert_eq!(convert("- item"), "<ul><li>item</li></ul>");
/// ```
pub fn convert(document: &str) -> String {
    if document.trim().is_empty() {
        return String::new();
    }

    let mut lines: Vec<&str> = document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    // A final empty line guarantees open blocks and paragraphs are flushed.
    if lines.last().is_some_and(|line| !line.is_empty()) {
        lines.push("");
    }

    let mut output = String::new();
    let mut stack = BlockStack::new();
    let mut paragraphs = ParagraphTracker::new();
    let mut pending_break = false;

    for raw in &lines {
        let line = inline::apply_inline(raw);

        let mut rendered = if let Some(matched) = block::match_block_line(&line) {
            stack.advance(&matched)
        } else if !stack.is_empty() {
            // A non-block line under open blocks closes all of them first.
            let mut closed = stack.drain();
            if paragraph::is_paragraph_text(&line) {
                closed.push_str(&paragraphs.append(&line));
            } else {
                closed.push_str(&line);
            }
            closed
        } else if paragraph::is_paragraph_text(&line) {
            paragraphs.append(&line)
        } else {
            line.clone()
        };

        rendered = escape::strip_escapes(&rendered).into_owned();

        if pending_break {
            rendered.insert_str(0, "<br>");
            pending_break = false;
        }
        if paragraph::ends_with_break_marker(&line) {
            let trimmed_len = rendered.trim_end().len();
            rendered.truncate(trimmed_len);
            pending_break = true;
        }

        rendered = paragraphs.finish_line(rendered);
        output.push_str(&rendered);
    }

    log::trace!("converted {} line(s)", lines.len());
    output.trim().to_string()
}
