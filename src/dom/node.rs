//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element node.
///
/// Attributes are the single source of truth: the element id is the `id`
/// attribute and the class set is the whitespace-separated `class` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Element tag name, stored in ASCII lowercase (e.g. "div", "p").
    pub tag: String,
    /// Attribute map; keys are unique and stored in ASCII lowercase.
    attributes: BTreeMap<String, String>,
    /// Character data directly inside this element, if any.
    pub text: Option<String>,
}

impl NodeData {
    /// Create a new element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: None,
        }
    }

    /// Set the `id` attribute (builder).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute("id", id)
    }

    /// Add a single CSS class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self.add_class(&class.into());
        }
        self
    }

    /// Set an attribute (builder). Replaces any previous value for the name.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Remove an attribute. Returns its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(&name.to_ascii_lowercase())
    }

    /// Look up an attribute value by (case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(value) => Some(value.as_str()),
            None if name.bytes().any(|b| b.is_ascii_uppercase()) => self
                .attributes
                .get(&name.to_ascii_lowercase())
                .map(String::as_str),
            None => None,
        }
    }

    /// Iterate attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The element id, if set.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Iterate the element's classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let updated = match self.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim_end()),
            _ => class.to_owned(),
        };
        self.attributes.insert("class".to_owned(), updated);
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = remaining.join(" ");
        self.attributes.insert("class".to_owned(), joined);
    }

    /// Toggle a CSS class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Whether the element carries any text content.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}
