//! Block construct recognition and the nestable tag table.
//!
//! Three line-level constructs nest by depth: blockquotes, ordered lists,
//! and unordered lists. Each is described by a [`BlockTag`] entry in
//! [`BLOCK_TAGS`]; a line either matches exactly one of them as a whole
//! line or falls through to paragraph handling.

use once_cell::sync::Lazy;
use regex::Regex;

/// HTML tag prefixes that stand on their own and must never be wrapped in a
/// paragraph or a blockquote's inner `<p>`. `<h` covers headings and `<hr>`.
pub const INDEPENDENT_TAGS: &[&str] = &[
    "<h",
    "<a",
    "<img",
    "<code",
    "<blockquote",
    "<ol",
    "<ul",
];

/// The three block constructs that track a nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `>` quoted lines; inner content wrapped in `<p>`.
    Blockquote,
    /// `N.` / `N)` list lines; inner content wrapped in `<li>`.
    OrderedList,
    /// `-` / `*` / `+` list lines; inner content wrapped in `<li>`.
    UnorderedList,
}

impl BlockKind {
    /// Returns the static descriptor for this kind.
    pub fn tag(self) -> &'static BlockTag {
        match self {
            BlockKind::Blockquote => &BLOCK_TAGS[0],
            BlockKind::OrderedList => &BLOCK_TAGS[1],
            BlockKind::UnorderedList => &BLOCK_TAGS[2],
        }
    }
}

/// Static description of one nestable block construct.
#[derive(Debug)]
pub struct BlockTag {
    /// Which construct this entry describes.
    pub kind: BlockKind,
    /// Tag emitted when a block of this kind opens.
    pub outer_open: &'static str,
    /// Tag emitted when a block of this kind closes.
    pub outer_close: &'static str,
    /// Tag wrapped around each line of inner content.
    pub inner_open: &'static str,
    /// Closing counterpart of `inner_open`.
    pub inner_close: &'static str,
    /// Content prefixes that suppress the inner wrapper entirely.
    pub unwrapped_prefixes: &'static [&'static str],
    /// Offset reconciling this kind's natural depth scale with the others:
    /// blockquote depth is 1-based (count of `>`), list depth is 0-based
    /// (count of leading whitespace).
    pub min_level: usize,
}

/// Ordered recognition table, blockquote first.
pub static BLOCK_TAGS: [BlockTag; 3] = [
    BlockTag {
        kind: BlockKind::Blockquote,
        outer_open: "<blockquote>",
        outer_close: "</blockquote>",
        inner_open: "<p>",
        inner_close: "</p>",
        unwrapped_prefixes: INDEPENDENT_TAGS,
        min_level: 1,
    },
    BlockTag {
        kind: BlockKind::OrderedList,
        outer_open: "<ol>",
        outer_close: "</ol>",
        inner_open: "<li>",
        inner_close: "</li>",
        unwrapped_prefixes: &[],
        min_level: 0,
    },
    BlockTag {
        kind: BlockKind::UnorderedList,
        outer_open: "<ul>",
        outer_close: "</ul>",
        inner_open: "<li>",
        inner_close: "</li>",
        unwrapped_prefixes: &[],
        min_level: 0,
    },
];

// Whole-line recognizers. The blockquote content capture starts with a
// non-`>` character but may begin with whitespace when the line carries a
// second marker run, which is what lets `> >` nest via same-line expansion.
static BLOCKQUOTE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(>+)\s*([^>].*?)\s*$").expect("blockquote pattern"));
static ORDERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s+)?[0-9]+[.)]\s+(.+?)\s*$").expect("ordered list pattern"));
static UNORDERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s+)?[-*+]+\s+(.+?)\s*$").expect("unordered list pattern"));

impl BlockTag {
    fn pattern(&self) -> &'static Regex {
        match self.kind {
            BlockKind::Blockquote => &BLOCKQUOTE_LINE,
            BlockKind::OrderedList => &ORDERED_LINE,
            BlockKind::UnorderedList => &UNORDERED_LINE,
        }
    }

    /// Tests a whole line against this construct, returning the raw depth
    /// and inner content on a match.
    pub fn recognize<'l>(&self, line: &'l str) -> Option<(usize, &'l str)> {
        let caps = self.pattern().captures(line)?;
        let raw_level = match self.kind {
            BlockKind::Blockquote => caps[1].chars().count(),
            _ => caps.get(1).map_or(0, |ws| ws.as_str().chars().count()),
        };
        let content = caps.get(2).map_or("", |c| c.as_str());
        Some((raw_level, content))
    }
}

/// A block line recognized by [`match_block_line`].
#[derive(Debug, Clone, Copy)]
pub struct BlockMatch<'l> {
    /// Descriptor of the matched construct.
    pub tag: &'static BlockTag,
    /// Unnormalized depth: `>` count for blockquotes, leading whitespace
    /// length for lists (0 when flush left).
    pub raw_level: usize,
    /// Everything after the marker, with trailing whitespace stripped.
    pub content: &'l str,
}

impl BlockMatch<'_> {
    /// Depth normalized across kinds; always at least 1.
    pub fn level(&self) -> usize {
        self.raw_level + 1 - self.tag.min_level
    }
}

/// Recognizes a line as one of the three nestable constructs.
///
/// Returns `None` for everything else, including markers with no content
/// (`>`, `-`, `1.`), which render literally.
pub fn match_block_line(line: &str) -> Option<BlockMatch<'_>> {
    BLOCK_TAGS.iter().find_map(|tag| {
        tag.recognize(line)
            .map(|(raw_level, content)| BlockMatch {
                tag,
                raw_level,
                content,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(line: &str) -> BlockMatch<'_> {
        match_block_line(line).expect("line should match a block construct")
    }

    #[test]
    fn blockquote_depth_is_marker_count() {
        let m = matched(">quoted");
        assert_eq!(m.tag.kind, BlockKind::Blockquote);
        assert_eq!(m.raw_level, 1);
        assert_eq!(m.content, "quoted");
        assert_eq!(m.level(), 1);

        let m = matched(">>> deep");
        assert_eq!(m.raw_level, 3);
        assert_eq!(m.content, "deep");
        assert_eq!(m.level(), 3);
    }

    #[test]
    fn blockquote_allows_surrounding_whitespace() {
        let m = matched("     >indented quote   ");
        assert_eq!(m.tag.kind, BlockKind::Blockquote);
        assert_eq!(m.raw_level, 1);
        assert_eq!(m.content, "indented quote");
    }

    #[test]
    fn nested_quote_marker_stays_in_content() {
        // Only the first marker run counts toward depth; the rest is content
        // and expands recursively later.
        let m = matched("> >inner");
        assert_eq!(m.raw_level, 1);
        assert_eq!(m.content, " >inner");
    }

    #[test]
    fn ordered_list_levels_come_from_indentation() {
        let m = matched("1. first");
        assert_eq!(m.tag.kind, BlockKind::OrderedList);
        assert_eq!(m.raw_level, 0);
        assert_eq!(m.level(), 1);
        assert_eq!(m.content, "first");

        let m = matched("  300) third");
        assert_eq!(m.raw_level, 2);
        assert_eq!(m.level(), 3);
        assert_eq!(m.content, "third");
    }

    #[test]
    fn unordered_marker_run_counts_once() {
        let m = matched("--- item   ");
        assert_eq!(m.tag.kind, BlockKind::UnorderedList);
        assert_eq!(m.raw_level, 0);
        assert_eq!(m.level(), 1);
        assert_eq!(m.content, "item");
    }

    #[test]
    fn all_marker_styles_match() {
        for line in ["- x", "* x", "+ x", "1. x", "20) x", "1024. x"] {
            assert!(match_block_line(line).is_some(), "{line:?}");
        }
    }

    #[test]
    fn bare_markers_do_not_match() {
        for line in [">", ">>", "-", " -", "1.", " 20.", "300)", "-x", "1.x", "1 x"] {
            assert!(match_block_line(line).is_none(), "{line:?}");
        }
    }

    #[test]
    fn paragraph_text_does_not_match() {
        assert!(match_block_line("plain text").is_none());
        assert!(match_block_line("This > should > not match").is_none());
    }
}
