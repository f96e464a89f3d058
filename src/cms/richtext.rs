//! Structured rich text: typed blocks with inline spans, convertible to
//! plain text or escaped HTML.
//!
//! The content repository never ships markup. Every formatted value arrives
//! as an ordered sequence of blocks, each carrying raw text plus inline
//! spans addressed by character offsets. Rendering to HTML is the only
//! place markup is produced, and the renderer escapes all record-controlled
//! text itself, so nothing upstream has to be trusted.

use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;

/// One rich-text block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type", default)]
    pub kind: BlockKind,

    /// Raw block text, without any markup
    #[serde(default)]
    pub text: String,

    /// Inline formatting, addressed by character offsets into `text`
    #[serde(default)]
    pub spans: Vec<InlineSpan>,
}

/// Block-level type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Preformatted,
    ListItem,
    OListItem,
    /// Unknown block types render as paragraphs
    #[serde(other)]
    Other,
}

impl BlockKind {
    fn tag(self) -> &'static str {
        match self {
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::Heading4 => "h4",
            BlockKind::Heading5 => "h5",
            BlockKind::Heading6 => "h6",
            BlockKind::Preformatted => "pre",
            BlockKind::ListItem | BlockKind::OListItem => "li",
            BlockKind::Paragraph | BlockKind::Other => "p",
        }
    }

    /// The list wrapper this block belongs in, if any
    fn list_wrapper(self) -> Option<&'static str> {
        match self {
            BlockKind::ListItem => Some("ul"),
            BlockKind::OListItem => Some("ol"),
            _ => None,
        }
    }
}

/// An inline formatting span over `[start, end)` character offsets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineSpan {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub style: SpanStyle,
}

/// Inline span type tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpanStyle {
    Strong,
    Em,
    Hyperlink { data: LinkTarget },
    /// Unknown span types contribute no markup
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTarget {
    #[serde(default)]
    pub url: String,
}

impl SpanStyle {
    fn tags(&self) -> (String, &'static str) {
        match self {
            SpanStyle::Strong => ("<strong>".to_string(), "</strong>"),
            SpanStyle::Em => ("<em>".to_string(), "</em>"),
            SpanStyle::Hyperlink { data } => {
                (format!(r#"<a href="{}">"#, html_escape(&data.url)), "</a>")
            }
            SpanStyle::Other => (String::new(), ""),
        }
    }
}

/// Flatten blocks to plain text, preserving block order, with no added
/// separators beyond what the text itself contains.
pub fn as_text(blocks: &[Block]) -> String {
    blocks.iter().map(|b| b.text.as_str()).collect()
}

/// Render blocks to HTML.
///
/// Consecutive list items are grouped into a single `<ul>`/`<ol>`. All text
/// and attribute content is escaped here; the output is the only markup
/// that reaches the page.
pub fn as_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let wrapper = block.kind.list_wrapper();
        if open_list != wrapper {
            if let Some(list) = open_list.take() {
                out.push_str(&format!("</{}>", list));
            }
            if let Some(list) = wrapper {
                out.push_str(&format!("<{}>", list));
            }
            open_list = wrapper;
        }

        let tag = block.kind.tag();
        out.push_str(&format!("<{}>", tag));
        out.push_str(&render_spans(&block.text, &block.spans));
        out.push_str(&format!("</{}>", tag));
    }

    if let Some(list) = open_list {
        out.push_str(&format!("</{}>", list));
    }

    out
}

/// A span whose open tag has been emitted but whose end offset is still
/// ahead. The open tag is kept so the span can be re-opened after an
/// overlap forces it closed early.
struct OpenTag {
    end: usize,
    open: String,
    close: &'static str,
}

/// Apply inline spans to a block's text, escaping as we go.
///
/// Offsets are character positions. Spans are opened longest-first at equal
/// starts so that properly nested input closes inner-first. Every span
/// closes exactly at its own end offset: when spans overlap without
/// nesting, the inner tags are closed and re-opened around the boundary so
/// no span widens beyond its range. Zero-length and out-of-range spans are
/// ignored.
fn render_spans(text: &str, spans: &[InlineSpan]) -> String {
    if spans.is_empty() {
        return html_escape(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted: Vec<&InlineSpan> = spans.iter().filter(|s| s.start < s.end).collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len() + spans.len() * 16);
    let mut pending = sorted.into_iter().peekable();
    let mut open: Vec<OpenTag> = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        close_ending_spans(&mut out, &mut open, i);
        while let Some(span) = pending.next_if(|s| s.start == i) {
            let (open_tag, close_tag) = span.style.tags();
            out.push_str(&open_tag);
            open.push(OpenTag {
                end: span.end.min(chars.len()),
                open: open_tag,
                close: close_tag,
            });
        }
        push_escaped(&mut out, *c);
    }

    while let Some(tag) = open.pop() {
        out.push_str(tag.close);
    }

    out
}

/// Close every open span ending at offset `i`, unwinding and re-opening
/// the tags stacked above it that are still live.
fn close_ending_spans(out: &mut String, open: &mut Vec<OpenTag>, i: usize) {
    while open.iter().any(|tag| tag.end == i) {
        let mut suspended: Vec<OpenTag> = Vec::new();
        while let Some(tag) = open.pop() {
            out.push_str(tag.close);
            if tag.end == i {
                break;
            }
            suspended.push(tag);
        }
        while let Some(tag) = suspended.pop() {
            out.push_str(&tag.open);
            open.push(tag);
        }
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}
