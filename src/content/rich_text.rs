//! Rich text fields and their HTML rendering

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::{escape_html, image_tag};

/// A single block of a rich text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    /// Inline formatting over `text`
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Source of an image block
    #[serde(default)]
    pub url: Option<String>,
    /// Alternative text of an image block
    #[serde(default)]
    pub alt: Option<String>,
    /// oEmbed payload of an embed block
    #[serde(default)]
    pub oembed: Option<Value>,
}

/// Inline formatting over a range of a block's text
///
/// `start` and `end` count UTF-16 code units, as the content API does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RichTextBlock {
    pub fn new(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }
}

impl Span {
    /// Opening tag, `None` for span types that are not rendered
    fn open_tag(&self) -> Option<String> {
        match self.kind.as_str() {
            "strong" => Some("<strong>".to_string()),
            "em" => Some("<em>".to_string()),
            "hyperlink" => {
                let url = escape_html(self.data_str("url")?);
                match self.data_str("target") {
                    Some(target) => Some(format!(
                        r#"<a href="{}" target="{}" rel="noopener">"#,
                        url,
                        escape_html(target)
                    )),
                    None => Some(format!(r#"<a href="{}">"#, url)),
                }
            }
            "label" => Some(format!(
                r#"<span class="{}">"#,
                escape_html(self.data_str("label")?)
            )),
            _ => None,
        }
    }

    fn close_tag(&self) -> &'static str {
        match self.kind.as_str() {
            "strong" => "</strong>",
            "em" => "</em>",
            "hyperlink" => "</a>",
            _ => "</span>",
        }
    }

    fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }
}

/// Render rich text blocks as HTML
///
/// Consecutive list items are grouped into a single list element.
pub fn rich_text_to_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&block_to_html(block));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn block_to_html(block: &RichTextBlock) -> String {
    let tag = match block.kind.as_str() {
        "image" => {
            return match block.url.as_deref() {
                Some(url) => format!(
                    r#"<p class="block-img">{}</p>"#,
                    image_tag(url, block.alt.as_deref().unwrap_or_default())
                ),
                None => String::new(),
            };
        }
        "embed" => return embed_to_html(block.oembed.as_ref()),
        "list-item" | "o-list-item" => "li",
        "heading1" => "h1",
        "heading2" => "h2",
        "heading3" => "h3",
        "heading4" => "h4",
        "heading5" => "h5",
        "heading6" => "h6",
        "preformatted" => "pre",
        "paragraph" => "p",
        other => {
            if block.text.is_empty() {
                tracing::debug!("Skipping rich text block of type {}", other);
                return String::new();
            }
            "p"
        }
    };

    let line_breaks = tag != "pre";
    format!(
        "<{}>{}</{}>",
        tag,
        apply_spans(&block.text, &block.spans, line_breaks),
        tag
    )
}

fn embed_to_html(oembed: Option<&Value>) -> String {
    let Some(oembed) = oembed else {
        return String::new();
    };
    let field = |key: &str| oembed.get(key).and_then(Value::as_str).unwrap_or_default();

    // The embed markup comes from the provider through the CMS and is kept as is
    format!(
        r#"<div data-oembed="{}" data-oembed-type="{}">{}</div>"#,
        escape_html(field("embed_url")),
        escape_html(field("type")),
        field("html")
    )
}

/// Escape `text` and wrap the ranges covered by `spans` in their tags
///
/// Overlapping spans are split so the produced tags always nest.
fn apply_spans(text: &str, spans: &[Span], line_breaks: bool) -> String {
    let text_len = text.encode_utf16().count();
    let mut spans: Vec<(&Span, String)> = spans
        .iter()
        .filter(|span| span.start < span.end && span.start < text_len)
        .filter_map(|span| span.open_tag().map(|tag| (span, tag)))
        .collect();
    // Outer spans first: earlier start, then longer
    spans.sort_by(|a, b| a.0.start.cmp(&b.0.start).then(b.0.end.cmp(&a.0.end)));

    let mut html = String::with_capacity(text.len());
    let mut open: Vec<usize> = Vec::new();
    let mut next = 0;
    let mut offset = 0;
    let mut chars = text.chars();

    loop {
        close_spans(&mut html, &mut open, &spans, offset);
        while next < spans.len() && spans[next].0.start <= offset {
            html.push_str(&spans[next].1);
            open.push(next);
            next += 1;
        }

        let Some(c) = chars.next() else {
            break;
        };
        match c {
            '\n' if line_breaks => html.push_str("<br />"),
            _ => html.push_str(&escape_html(c.encode_utf8(&mut [0; 4]))),
        }
        offset += c.len_utf16();
    }

    while let Some(i) = open.pop() {
        html.push_str(spans[i].0.close_tag());
    }
    html
}

/// Close every open span that ends at `offset`
///
/// Spans opened inside a closing one are closed first and reopened after it.
fn close_spans(html: &mut String, open: &mut Vec<usize>, spans: &[(&Span, String)], offset: usize) {
    while let Some(pos) = open.iter().position(|&i| spans[i].0.end <= offset) {
        let inner: Vec<usize> = open.drain(pos + 1..).collect();
        for &i in inner.iter().rev() {
            html.push_str(spans[i].0.close_tag());
        }

        let ending = open[pos];
        open.truncate(pos);
        html.push_str(spans[ending].0.close_tag());

        for i in inner {
            if spans[i].0.end > offset {
                html.push_str(&spans[i].1);
                open.push(i);
            }
        }
    }
}
