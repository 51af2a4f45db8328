//! Page document abstraction
//!
//! The binder only talks to a page through the [`Document`] trait: find the
//! elements carrying an attribute, read attributes, replace content and
//! manage classes. [`MemoryDocument`] implements it over a parsed HTML page.

pub mod markup;
pub mod memory;

pub use memory::MemoryDocument;

/// Handle to a node of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Operations the binder needs from a page
pub trait Document {
    /// Elements carrying `attribute`, in document order
    fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId>;

    /// First element whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn attribute(&self, element: NodeId, name: &str) -> Option<String>;

    fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Replace the children of `element` with a single text node
    fn set_text_content(&mut self, element: NodeId, text: &str);

    /// Replace the children of `element` with parsed markup
    fn set_inner_html(&mut self, element: NodeId, markup: &str);

    /// Set the document-level language
    fn set_document_language(&mut self, code: &str);

    fn has_class(&self, element: NodeId, class: &str) -> bool;

    fn add_class(&mut self, element: NodeId, class: &str);

    fn remove_class(&mut self, element: NodeId, class: &str);

    fn toggle_class(&mut self, element: NodeId, class: &str) {
        if self.has_class(element, class) {
            self.remove_class(element, class);
        } else {
            self.add_class(element, class);
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}
