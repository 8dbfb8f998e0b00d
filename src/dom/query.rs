//! DOM queries: by id, by selector, generic predicate matching.
//!
//! All queries walk the tree from the root in document order (pre-order,
//! children left to right). Detached nodes are never returned.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::css::parser::{parse_selector_list, ParseError};
use crate::css::selector::SelectorList;

impl Dom {
    /// First node in document order whose `id` attribute equals `id`.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .find(|(_, data)| data.id() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// First node in document order matched by any selector in `selectors`.
    pub fn query_selector(&self, selectors: &SelectorList) -> Option<NodeId> {
        self.document_order()
            .map(|(node_id, _)| node_id)
            .find(|&node_id| selectors.matches(self, node_id))
    }

    /// Every node matched by `selectors`, in document order.
    pub fn query_selector_all(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.document_order()
            .map(|(node_id, _)| node_id)
            .filter(|&node_id| selectors.matches(self, node_id))
            .collect()
    }

    /// Parse `selectors` and return every match in document order.
    pub fn select(&self, selectors: &str) -> Result<Vec<NodeId>, ParseError> {
        let list = parse_selector_list(selectors)?;
        Ok(self.query_selector_all(&list))
    }

    /// Every node satisfying `predicate`, in document order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.document_order()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    fn document_order(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.root()
            .map(|root| self.walk_depth_first(root))
            .unwrap_or_default()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
