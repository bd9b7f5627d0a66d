//! Per-line inline markup substitution.
//!
//! Substitutions run in a fixed order: horizontal rules, bold, italic, code
//! spans, images, links, headings. Bold runs before italic so `**x**` is
//! not read as nested italics, and images run before links because the
//! image syntax is the link syntax with a `!` prefix.
//!
//! The `regex` crate has no lookaround, so escape awareness is two-phase:
//! the patterns find structural candidates and the bytes around each
//! candidate are inspected directly. A rejected candidate resumes the
//! search one character later, the same way a failed lookbehind does.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\*{3,}|-{3,}|_{3,})\s*$").expect("horizontal rule pattern"));

// Emphasis content may not start with whitespace or the delimiter character,
// and may not end with whitespace, the delimiter character, or a backslash.
static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*{2}([^\s*\\]|[^\s*].*?[^\s*\\])\*{2}|_{2}([^\s_\\]|[^\s_].*?[^\s_\\])_{2}")
        .expect("bold pattern")
});
static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^\s*\\]|[^\s*].*?[^\s*\\])\*|_([^\s_\\]|[^\s_].*?[^\s_\\])_")
        .expect("italic pattern")
});

// Double-backtick form first so spans can carry literal backticks.
static CODE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`{2}\s*(.+?)\s*`{2}|`\s*(.+?)\s*`").expect("code span pattern"));

static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[\s*(.+?)\s*\]\(\s*(.+?)\s*(?:["']\s*(.+?)\s*["'])?\s*\)"#)
        .expect("image pattern")
});
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[\s*(.+?)\s*\]\(\s*(.+?)\s*(?:["']\s*(.+?)\s*["'])?\s*\)"#)
        .expect("link pattern")
});

// A heading may sit after a quote or list marker; the captured prefix is
// re-emitted so block matching still sees the marker afterwards. Trailing
// whitespace is re-emitted too, keeping forced line breaks detectable.
static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?:^|>|-|[0-9]+[.)])\s*)(#{1,6})\s+(\S.*?)(\s*)$").expect("heading pattern")
});

/// Applies every inline substitution to one raw line.
pub fn apply_inline(line: &str) -> String {
    if HORIZONTAL_RULE.is_match(line) {
        return "<hr>".to_string();
    }
    let line = emphasis(line, &BOLD, "<strong>", "</strong>");
    let line = emphasis(&line, &ITALIC, "<em>", "</em>");
    let line = code_spans(&line);
    let line = images(&line);
    let line = links(&line);
    headings(&line)
}

/// Applies `render` to every structural match whose opening delimiter is
/// not preceded by a backslash. `render` may veto a candidate by returning
/// `None`; the search then resumes one character later.
fn replace_unescaped<F>(re: &Regex, line: &str, mut render: F) -> String
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut search = 0;
    while search <= line.len() {
        let Some(caps) = re.captures_at(line, search) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let start = whole.start();
        if start > 0 && line.as_bytes()[start - 1] == b'\\' {
            search = start + 1;
            continue;
        }
        match render(&caps) {
            Some(replacement) => {
                out.push_str(&line[copied..start]);
                out.push_str(&replacement);
                copied = whole.end();
                search = whole.end();
            }
            None => search = start + 1,
        }
    }
    out.push_str(&line[copied..]);
    out
}

fn emphasis(line: &str, re: &Regex, open: &str, close: &str) -> String {
    replace_unescaped(re, line, |caps| {
        let text = caps.get(1).or_else(|| caps.get(2))?;
        Some(format!("{open}{}{close}", text.as_str()))
    })
}

fn code_spans(line: &str) -> String {
    let bytes = line.as_bytes();
    replace_unescaped(&CODE_SPAN, line, |caps| {
        let whole = caps.get(0)?;
        if let Some(body) = caps.get(1) {
            // ``…`` form: the closing run must not be escaped.
            if bytes[whole.end() - 3] == b'\\' {
                return None;
            }
            return Some(format!("<code>{}</code>", body.as_str()));
        }
        let body = caps.get(2)?;
        // `…` form: unescaped closer, not followed by another backtick.
        if bytes[whole.end() - 2] == b'\\' {
            return None;
        }
        if bytes.get(whole.end()) == Some(&b'`') {
            return None;
        }
        Some(format!("<code>{}</code>", body.as_str()))
    })
}

fn images(line: &str) -> String {
    replace_unescaped(&IMAGE, line, |caps| {
        let alt = caps.get(1)?.as_str();
        let src = caps.get(2)?.as_str();
        let mut tag = format!("<img src=\"{src}\" alt=\"{alt}\"");
        if let Some(title) = caps.get(3) {
            tag.push_str(&format!(" title=\"{}\"", title.as_str()));
        }
        tag.push('>');
        Some(tag)
    })
}

fn links(line: &str) -> String {
    replace_unescaped(&LINK, line, |caps| {
        let text = caps.get(1)?.as_str();
        let href = caps.get(2)?.as_str();
        let mut tag = format!("<a href=\"{href}\"");
        if let Some(title) = caps.get(3) {
            tag.push_str(&format!(" title=\"{}\"", title.as_str()));
        }
        tag.push('>');
        tag.push_str(text);
        tag.push_str("</a>");
        Some(tag)
    })
}

fn headings(line: &str) -> String {
    let Some(caps) = HEADING.captures(line) else {
        return line.to_string();
    };
    let Some(whole) = caps.get(0) else {
        return line.to_string();
    };
    let depth = caps[2].len();
    format!(
        "{}{}<h{depth}>{}</h{depth}>{}",
        &line[..whole.start()],
        &caps[1],
        &caps[3],
        &caps[4]
    )
}
