//! The nested-block stack machine.
//!
//! Tracks which `<blockquote>`/`<ol>`/`<ul>` blocks are currently open and,
//! for each recognized line, decides which tags to close, which to open,
//! and how to wrap the line's content. A line that is not a nestable block
//! while frames remain open forces a full drain, so the emitted HTML is
//! always balanced.

use crate::block::{BLOCK_TAGS, BlockKind, BlockMatch, BlockTag};

/// One still-open block, innermost last on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFrame {
    /// The construct this frame belongs to.
    pub kind: BlockKind,
    /// Normalized depth recorded when the frame was opened.
    pub level: usize,
}

/// The stack of open block frames for one conversion.
#[derive(Debug, Default)]
pub struct BlockStack {
    frames: Vec<OpenFrame>,
}

impl BlockStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no block is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Consumes one matched block line, returning the HTML delta and
    /// updating the open frames.
    pub fn advance(&mut self, matched: &BlockMatch<'_>) -> String {
        let tag = matched.tag;
        let level = matched.level();
        let content = expand_same_line(matched.content);

        let Some(top) = self.frames.last().copied() else {
            self.frames.push(OpenFrame {
                kind: tag.kind,
                level,
            });
            return format!("{}{}", tag.outer_open, wrap_inner(&content, tag));
        };

        if level > top.level {
            // Deeper than anything open: nest a fresh block inside the top.
            self.frames.push(OpenFrame {
                kind: tag.kind,
                level,
            });
            return format!("{}{}", tag.outer_open, wrap_inner(&content, tag));
        }

        if level == top.level {
            if top.kind == tag.kind {
                // Same construct at the same depth continues the open block.
                return wrap_inner(&content, tag);
            }
            self.frames.pop();
            self.frames.push(OpenFrame {
                kind: tag.kind,
                level,
            });
            return format!(
                "{}{}{}",
                top.kind.tag().outer_close,
                tag.outer_open,
                wrap_inner(&content, tag)
            );
        }

        // Shallower than the top. When not even the bottom frame is shallow
        // enough to continue, swap the top for a fresh block instead of
        // unwinding past the root.
        if !self.frames.iter().any(|frame| frame.level <= level) {
            self.frames.pop();
            self.frames.push(OpenFrame {
                kind: tag.kind,
                level,
            });
            return format!(
                "{}{}{}",
                top.kind.tag().outer_close,
                tag.outer_open,
                wrap_inner(&content, tag)
            );
        }

        // Close frames from the top until one is shallow enough, then either
        // continue it (same kind) or replace it (different kind). A
        // continued frame keeps the level it was opened with.
        let mut html = String::new();
        while let Some(frame) = self.frames.last().copied() {
            if frame.level > level {
                html.push_str(frame.kind.tag().outer_close);
                self.frames.pop();
                continue;
            }
            if frame.kind == tag.kind {
                html.push_str(&wrap_inner(&content, tag));
            } else {
                html.push_str(frame.kind.tag().outer_close);
                html.push_str(tag.outer_open);
                html.push_str(&wrap_inner(&content, tag));
                self.frames.pop();
                self.frames.push(OpenFrame {
                    kind: tag.kind,
                    level,
                });
            }
            break;
        }
        html
    }

    /// Closes every open frame, innermost first.
    pub fn drain(&mut self) -> String {
        if !self.frames.is_empty() {
            log::trace!("draining {} open block frame(s)", self.frames.len());
        }
        let mut html = String::new();
        while let Some(frame) = self.frames.pop() {
            html.push_str(frame.kind.tag().outer_close);
        }
        html
    }
}

/// Adds the inner wrapper unless the content already starts with a tag the
/// construct treats as standalone.
fn wrap_inner(content: &str, tag: &BlockTag) -> String {
    if tag
        .unwrapped_prefixes
        .iter()
        .any(|prefix| content.starts_with(prefix))
    {
        return content.to_string();
    }
    format!("{}{}{}", tag.inner_open, content, tag.inner_close)
}

/// Expands block markers stacked on a single line, depth first.
///
/// `1. > text` as the content of a list item becomes a full `<blockquote>`
/// inside that item before the item itself is wrapped. Level bookkeeping
/// does not apply here; the recursion consumes one marker per step and is
/// bounded by line length.
fn expand_same_line(content: &str) -> String {
    let mut expanded = content.to_string();
    for tag in &BLOCK_TAGS {
        if let Some((_, inner)) = tag.recognize(&expanded) {
            let nested = expand_same_line(inner.trim());
            expanded = format!(
                "{}{}{}",
                tag.outer_open,
                wrap_inner(&nested, tag),
                tag.outer_close
            );
        }
    }
    expanded
}
