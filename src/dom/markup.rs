//! HTML markup parsing and escaping
//!
//! Pages and `data-i18n-html` values are parsed with `quick-xml` in a
//! forgiving mode: HTML entities are resolved, valueless attributes are
//! accepted, void elements never take children and unmatched end tags are
//! ignored. A `<` that does not open a tag is text, and the bodies of
//! `script`, `style`, `textarea` and `title` are read up to their end tag
//! without being parsed. Elements still open at the end of input are closed
//! implicitly.

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape, resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::utils::errors::Result;

/// Elements that never have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Elements whose text is kept verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose text is never parsed as markup but may hold entities
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Owned node produced by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<ParsedNode>,
    },
    Text(String),
    /// Doctype, comments and other markup reproduced as written
    Raw(String),
}

struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ParsedNode>,
}

impl OpenElement {
    fn finish(self) -> ParsedNode {
        ParsedNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn is_escapable_raw_text_element(name: &str) -> bool {
    ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name)
}

/// Escape text content; `<`, `>` and `&` never reach the output unescaped
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value)
}

/// Parse a page or fragment into a list of top-level nodes
pub fn parse(markup: &str) -> Result<Vec<ParsedNode>> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.trim_markup_names_in_closing_tags = false;

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots: Vec<ParsedNode> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !opens_tag(e.name().as_ref()) {
                    reread_as_text(&mut reader, markup, e.len() + 2, &mut stack, &mut roots);
                    continue;
                }
                let element = open_element(&e)?;
                if is_void_element(&element.name) {
                    attach(&mut stack, &mut roots, element.finish());
                } else if is_raw_text_element(&element.name) || is_escapable_raw_text_element(&element.name) {
                    let body = take_raw_text(&mut reader, &element.name);
                    let text = if is_raw_text_element(&element.name) {
                        body.to_string()
                    } else {
                        unescape_text(body)
                    };
                    stack.push(element);
                    attach(&mut stack, &mut roots, ParsedNode::Text(text));
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(e) => {
                if !opens_tag(e.name().as_ref()) {
                    reread_as_text(&mut reader, markup, e.len() + 3, &mut stack, &mut roots);
                    continue;
                }
                let element = open_element(&e)?;
                attach(&mut stack, &mut roots, element.finish());
            }
            Event::End(e) => {
                if !opens_tag(e.name().as_ref()) {
                    reread_as_text(&mut reader, markup, e.len() + 3, &mut stack, &mut roots);
                    continue;
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).trim_end().to_ascii_lowercase();
                if let Some(position) = stack.iter().rposition(|open| open.name == name) {
                    while stack.len() > position {
                        if let Some(open) = stack.pop() {
                            attach(&mut stack, &mut roots, open.finish());
                        }
                    }
                }
            }
            Event::Text(e) => {
                let text = unescape_text(&String::from_utf8_lossy(&e));
                attach(&mut stack, &mut roots, ParsedNode::Text(text));
            }
            Event::CData(e) => {
                let raw = format!("<![CDATA[{}]]>", String::from_utf8_lossy(&e));
                attach(&mut stack, &mut roots, ParsedNode::Raw(raw));
            }
            Event::Comment(e) => {
                let raw = format!("<!--{}-->", String::from_utf8_lossy(&e));
                attach(&mut stack, &mut roots, ParsedNode::Raw(raw));
            }
            Event::DocType(e) => {
                let raw = format!("<!DOCTYPE {}>", String::from_utf8_lossy(&e).trim());
                attach(&mut stack, &mut roots, ParsedNode::Raw(raw));
            }
            Event::Decl(e) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&e));
                attach(&mut stack, &mut roots, ParsedNode::Raw(raw));
            }
            Event::PI(e) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&e));
                attach(&mut stack, &mut roots, ParsedNode::Raw(raw));
            }
            Event::Eof => break,
        }
    }

    while let Some(open) = stack.pop() {
        attach(&mut stack, &mut roots, open.finish());
    }

    Ok(roots)
}

/// A tag name must start with an ASCII letter, anything else is text
fn opens_tag(name: &[u8]) -> bool {
    name.first().is_some_and(u8::is_ascii_alphabetic)
}

/// Turn the `<` of a tag the reader has just consumed into text
///
/// `tag_len` is the length of the whole tag including its delimiters. The
/// reader is rewound to the byte after the `<`.
fn reread_as_text<'a>(
    reader: &mut Reader<&'a [u8]>,
    markup: &'a str,
    tag_len: usize,
    stack: &mut [OpenElement],
    roots: &mut Vec<ParsedNode>,
) {
    let consumed = markup.len() - reader.get_ref().len();
    let tag_start = consumed.saturating_sub(tag_len);
    *reader.get_mut() = &markup.as_bytes()[tag_start + 1..];
    attach(stack, roots, ParsedNode::Text("<".to_string()));
}

/// Consume the body of a raw text element, stopping before its end tag
///
/// Without an end tag the rest of the input is the body.
fn take_raw_text<'a>(reader: &mut Reader<&'a [u8]>, name: &str) -> &'a str {
    let remaining: &'a [u8] = *reader.get_ref();
    let end = find_end_tag(remaining, name.as_bytes()).unwrap_or(remaining.len());
    *reader.get_mut() = &remaining[end..];
    // `end` always falls on the ASCII `<` of the end tag or at the end of input
    std::str::from_utf8(&remaining[..end]).unwrap_or_default()
}

/// Offset of the first `</name` (any case) followed by `>`, `/` or whitespace
fn find_end_tag(haystack: &[u8], name: &[u8]) -> Option<usize> {
    let tag_len = name.len() + 2;
    (0..haystack.len()).find(|&i| {
        haystack[i..].starts_with(b"</")
            && haystack.len() >= i + tag_len
            && haystack[i + 2..i + tag_len].eq_ignore_ascii_case(name)
            && haystack
                .get(i + tag_len)
                .map_or(true, |next| *next == b'>' || *next == b'/' || next.is_ascii_whitespace())
    })
}

fn open_element(start: &BytesStart<'_>) -> Result<OpenElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();

    let mut attributes = Vec::new();
    for attribute in start.html_attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_lowercase();
        let value = unescape_text(&String::from_utf8_lossy(&attribute.value));
        attributes.push((key, value));
    }

    Ok(OpenElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Resolve character references, keeping anything that is not one as written
///
/// A stray `&` is plain text in HTML.
fn unescape_text(raw: &str) -> String {
    let mut pieces = raw.split('&');
    let mut text = pieces.next().unwrap_or_default().to_string();

    for piece in pieces {
        let reference = piece
            .find(';')
            .filter(|end| *end > 0 && *end <= 32)
            .and_then(|end| {
                let candidate = format!("&{}", &piece[..=end]);
                unescape_with(&candidate, resolve_html5_entity)
                    .ok()
                    .map(|resolved| (resolved.into_owned(), end))
            });

        match reference {
            Some((resolved, end)) => {
                text.push_str(&resolved);
                text.push_str(&piece[end + 1..]);
            }
            None => {
                text.push('&');
                text.push_str(piece);
            }
        }
    }

    text
}

/// Append `node` to the innermost open element, merging adjacent text
fn attach(stack: &mut [OpenElement], roots: &mut Vec<ParsedNode>, node: ParsedNode) {
    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => roots,
    };

    if let ParsedNode::Text(text) = &node {
        if text.is_empty() {
            return;
        }
        if let Some(ParsedNode::Text(previous)) = siblings.last_mut() {
            previous.push_str(text);
            return;
        }
    }
    siblings.push(node);
}
