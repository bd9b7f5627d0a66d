//! Paragraph and forced line break tracking.

use crate::block::INDEPENDENT_TAGS;

/// True when a line belongs inside a `<p>` paragraph.
///
/// A paragraph line is non-empty after trimming, is not a bare `<br>`, and
/// does not begin with a standalone tag. A line may *start* with `<br>`
/// without being one, since a forced break can continue a paragraph.
pub fn is_paragraph_text(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed != "<br>"
        && !INDEPENDENT_TAGS.iter().any(|tag| trimmed.starts_with(tag))
}

/// True when a line requests a forced `<br>` before the next output line.
///
/// Leading whitespace is stripped first so a whitespace-only line never
/// requests a break.
pub fn ends_with_break_marker(line: &str) -> bool {
    line.trim_start().ends_with("  ")
}

/// Tracks whether a `<p>` is currently open across lines.
#[derive(Debug, Default)]
pub struct ParagraphTracker {
    open: bool,
}

impl ParagraphTracker {
    /// Creates a tracker in the closed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paragraph-eligible line, emitting `<p>` when none is open.
    /// The opening line is left-trimmed; continuation lines pass through.
    pub fn append(&mut self, line: &str) -> String {
        if self.open {
            line.to_string()
        } else {
            self.open = true;
            format!("<p>{}", line.trim_start())
        }
    }

    /// Closes the open paragraph when the produced line no longer belongs
    /// to one, prefixing `</p>`.
    pub fn finish_line(&mut self, rendered: String) -> String {
        if self.open && !is_paragraph_text(&rendered) {
            self.open = false;
            format!("</p>{rendered}")
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_eligibility() {
        assert!(is_paragraph_text("plain text"));
        assert!(is_paragraph_text("  indented  "));
        assert!(is_paragraph_text("<br>continues a paragraph"));
        assert!(is_paragraph_text("<em>emphasis</em>"));
        assert!(!is_paragraph_text(""));
        assert!(!is_paragraph_text("   "));
        assert!(!is_paragraph_text("<br>"));
        assert!(!is_paragraph_text(" <br> "));
        for tag in [
            "<h1>x</h1>",
            "<hr>",
            "<a href=\"u\">x</a>",
            "<img src=\"u\">",
            "<code>x</code>",
            "<blockquote>",
            "<ol>",
            "<ul>",
        ] {
            assert!(!is_paragraph_text(tag), "{tag:?}");
        }
    }

    #[test]
    fn break_marker_detection() {
        assert!(ends_with_break_marker("text  "));
        assert!(ends_with_break_marker("text     "));
        assert!(!ends_with_break_marker("text "));
        assert!(!ends_with_break_marker("text"));
        assert!(!ends_with_break_marker("   "));
    }

    #[test]
    fn tracker_opens_once_and_closes_on_foreign_output() {
        let mut tracker = ParagraphTracker::new();
        assert_eq!(tracker.append("  first  "), "<p>first  ");
        assert_eq!(tracker.append("second"), "second");
        assert_eq!(tracker.finish_line("third".to_string()), "third");
        assert_eq!(tracker.finish_line("<hr>".to_string()), "</p><hr>");
        assert_eq!(tracker.append("fresh"), "<p>fresh");
    }
}
