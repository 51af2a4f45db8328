//! In-memory HTML document
//!
//! Nodes live in an arena indexed by [`NodeId`]. Replacing the content of an
//! element detaches its old children; detached nodes stay in the arena but
//! are never reached from the document root again.

use tracing::warn;

use super::markup::{self, ParsedNode};
use super::{Document, NodeId};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Parsed HTML page
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    language: Option<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            language: None,
        }
    }

    /// Parse a full page
    pub fn parse(html: &str) -> Result<Self> {
        let mut document = Self::new();
        let root = document.root();
        let nodes = markup::parse(html)?;
        document.append_parsed(root, nodes);

        document.language = document
            .first_element_named("html")
            .and_then(|html| document.attribute(html, "lang"));

        Ok(document)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`
    pub fn append_element(&mut self, parent: NodeId, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        let attributes = attributes
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.push_node(
            parent,
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes,
            },
        )
    }

    /// Append a text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    /// Language last set on the document, or read from `<html lang>`
    pub fn document_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children of `node` with the given tag name
    pub fn child_elements_named(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.tag_name(*child) == Some(name))
            .collect()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        for id in self.descendants(node) {
            if let NodeKind::Text(value) = &self.nodes[id.0].kind {
                text.push_str(value);
            }
        }
        text
    }

    /// Serialized children of `node`
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        let raw_text = self.tag_name(node).is_some_and(markup::is_raw_text_element);
        for child in self.children(node) {
            self.write_node(*child, raw_text, &mut out);
        }
        out
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    fn first_element_named(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.tag_name(*id) == Some(name))
    }

    /// Nodes below `node` in document order
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut ordered = Vec::new();
        let mut pending: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            ordered.push(id);
            pending.extend(self.children(id).iter().rev().copied());
        }
        ordered
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn append_parsed(&mut self, parent: NodeId, nodes: Vec<ParsedNode>) {
        for node in nodes {
            match node {
                ParsedNode::Element { name, attributes, children } => {
                    let id = self.push_node(parent, NodeKind::Element { name, attributes });
                    self.append_parsed(id, children);
                }
                ParsedNode::Text(text) => {
                    self.push_node(parent, NodeKind::Text(text));
                }
                ParsedNode::Raw(raw) => {
                    self.push_node(parent, NodeKind::Raw(raw));
                }
            }
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0).map(|n| &n.kind), Some(NodeKind::Element { .. }))
    }

    fn attributes_mut(&mut self, node: NodeId) -> Option<&mut Vec<(String, String)>> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(attributes) = self.attributes_mut(node) {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn write_node(&self, node: NodeId, raw_text: bool, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Root => {
                for child in &self.nodes[node.0].children {
                    self.write_node(*child, false, out);
                }
            }
            NodeKind::Text(text) if raw_text => out.push_str(text),
            NodeKind::Text(text) => out.push_str(&markup::escape_text(text)),
            NodeKind::Raw(raw) => out.push_str(raw),
            NodeKind::Element { name, attributes } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&markup::escape_attribute(value));
                        out.push('"');
                    }
                }
                out.push('>');

                if markup::is_void_element(name) {
                    return;
                }

                let raw_children = markup::is_raw_text_element(name);
                for child in &self.nodes[node.0].children {
                    self.write_node(*child, raw_children, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

impl Document for MemoryDocument {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_attribute(*id, attribute))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        match &self.nodes.get(element.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn set_text_content(&mut self, element: NodeId, text: &str) {
        if !self.is_element(element) {
            return;
        }
        self.clear_children(element);
        self.push_node(element, NodeKind::Text(text.to_string()));
    }

    fn set_inner_html(&mut self, element: NodeId, markup: &str) {
        if !self.is_element(element) {
            return;
        }
        match markup::parse(markup) {
            Ok(nodes) => {
                self.clear_children(element);
                self.append_parsed(element, nodes);
            }
            Err(e) => {
                warn!(error = %e, "Unparsable markup, inserting as text");
                self.set_text_content(element, markup);
            }
        }
    }

    fn set_document_language(&mut self, code: &str) {
        if let Some(html) = self.first_element_named("html") {
            self.set_attribute(html, "lang", code);
        }
        self.language = Some(code.to_string());
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.classes(element).iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: NodeId, class: &str) {
        let mut classes = self.classes(element);
        if classes.iter().any(|c| c == class) {
            return;
        }
        classes.push(class.to_string());
        self.set_attribute(element, "class", &classes.join(" "));
    }

    fn remove_class(&mut self, element: NodeId, class: &str) {
        let classes = self.classes(element);
        if !classes.iter().any(|c| c == class) {
            return;
        }
        let remaining: Vec<String> = classes.into_iter().filter(|c| c != class).collect();
        self.set_attribute(element, "class", &remaining.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<body>
<nav><a href="#home" data-i18n="nav.home">Home</a></nav>
<div id="langMenu" class="lang-menu lang-menu--open">
<button class="lang-option" data-lang="pl">Polski</button>
</div>
</body>
</html>"##;

    #[test]
    fn test_parse_and_serialize_round_trip() {
        let document = MemoryDocument::parse(PAGE).unwrap();
        assert_eq!(document.to_html(), PAGE);
        assert_eq!(document.document_language(), Some("en"));
    }

    #[test]
    fn test_query_elements() {
        let document = MemoryDocument::parse(PAGE).unwrap();
        let keyed = document.elements_with_attribute("data-i18n");
        assert_eq!(keyed.len(), 1);
        assert_eq!(document.attribute(keyed[0], "data-i18n").as_deref(), Some("nav.home"));
        assert_eq!(document.text_content(keyed[0]), "Home");

        let menu = document.element_by_id("langMenu").unwrap();
        let option = document.elements_with_attribute("data-lang")[0];
        assert!(document.contains(menu, option));
        assert!(!document.contains(option, menu));
        assert!(document.element_by_id("missing").is_none());
    }

    #[test]
    fn test_text_content_is_never_markup() {
        let mut document = MemoryDocument::new();
        let p = document.append_element(document.root(), "p", &[]);
        document.set_text_content(p, "<b>bold</b>");

        assert_eq!(document.children(p).len(), 1);
        assert!(document.child_elements_named(p, "b").is_empty());
        assert_eq!(document.text_content(p), "<b>bold</b>");
        assert_eq!(document.inner_html(p), "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn test_inner_html_replaces_children() {
        let mut document = MemoryDocument::new();
        let p = document.append_element(document.root(), "p", &[]);
        document.append_text(p, "old");
        document.set_inner_html(p, "<b>new</b>");

        assert_eq!(document.child_elements_named(p, "b").len(), 1);
        assert_eq!(document.text_content(p), "new");
        assert_eq!(document.inner_html(p), "<b>new</b>");
    }

    #[test]
    fn test_replaced_children_are_not_queried() {
        let mut document = MemoryDocument::parse(r#"<div id="box"><span data-i18n="a">x</span></div>"#).unwrap();
        let container = document.element_by_id("box").unwrap();
        document.set_text_content(container, "plain");
        assert!(document.elements_with_attribute("data-i18n").is_empty());
    }

    #[test]
    fn test_class_management() {
        let mut document = MemoryDocument::parse(PAGE).unwrap();
        let menu = document.element_by_id("langMenu").unwrap();
        assert!(document.has_class(menu, "lang-menu--open"));

        document.remove_class(menu, "lang-menu--open");
        assert!(!document.has_class(menu, "lang-menu--open"));
        assert_eq!(document.attribute(menu, "class").as_deref(), Some("lang-menu"));

        document.toggle_class(menu, "lang-menu--open");
        assert!(document.has_class(menu, "lang-menu--open"));
    }

    #[test]
    fn test_set_document_language() {
        let mut document = MemoryDocument::parse(PAGE).unwrap();
        document.set_document_language("pl");
        assert_eq!(document.document_language(), Some("pl"));
        assert!(document.to_html().contains(r#"<html lang="pl">"#));
    }
}
