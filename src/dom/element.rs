//! Read-only element navigation used by selector matching.
//!
//! Selector matching never touches a concrete tree type. It goes through
//! [`ElementTree`], so any document representation that can answer these
//! queries can be styled. [`Dom`] implements it out of the box.

use super::node::NodeId;
use super::tree::Dom;

/// Read-only view of an element tree.
///
/// Every method is a pure query. Implementations must not mutate the tree
/// behind a shared reference, so matching stays repeatable.
pub trait ElementTree {
    /// Cheap handle identifying an element in this tree.
    type Handle: Copy + Eq;

    /// Parent element, or `None` for the root and detached elements.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Child elements in document order.
    fn children(&self, element: Self::Handle) -> &[Self::Handle];

    /// Tag name in ASCII lowercase.
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Attribute value by name, if present.
    fn attribute(&self, element: Self::Handle, name: &str) -> Option<&str>;

    /// Whether the element carries any text content.
    fn has_text(&self, element: Self::Handle) -> bool;

    /// The element id.
    fn element_id(&self, element: Self::Handle) -> Option<&str> {
        self.attribute(element, "id")
    }

    /// Whether the element has the given class token.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool {
        self.attribute(element, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// All children of the element's parent, including the element itself.
    /// Empty when the element has no parent.
    fn siblings(&self, element: Self::Handle) -> &[Self::Handle] {
        match self.parent(element) {
            Some(parent) => self.children(parent),
            None => &[],
        }
    }

    /// The sibling immediately before the element.
    fn previous_sibling(&self, element: Self::Handle) -> Option<Self::Handle> {
        let siblings = self.siblings(element);
        let index = siblings.iter().position(|&s| s == element)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }
}

impl ElementTree for Dom {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        Dom::parent(self, element)
    }

    fn children(&self, element: NodeId) -> &[NodeId] {
        Dom::children(self, element)
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.get(element).map(|n| n.tag.as_str()).unwrap_or_default()
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get(element)?.attribute(name)
    }

    fn has_text(&self, element: NodeId) -> bool {
        self.get(element).is_some_and(|n| n.has_text())
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.get(element).is_some_and(|n| n.has_class(class))
    }

    fn previous_sibling(&self, element: NodeId) -> Option<NodeId> {
        Dom::previous_sibling(self, element)
    }
}
