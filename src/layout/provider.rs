//! Box geometry providers.
//!
//! The painter reads a box's occupied area through [`BoxGeometry`] and never
//! cares where the rectangle came from: a taffy pass ([`super::BoxLayout`]) or
//! rectangles the caller already resolved ([`FixedGeometry`]).

use std::collections::HashMap;

use crate::dom::node::NodeId;
use crate::geometry::Region;

/// Read-only source of box rectangles in page coordinates.
pub trait BoxGeometry {
    /// The rectangle occupied by `node`'s box, if it has one.
    fn occupied_area(&self, node: NodeId) -> Option<Region>;
}

/// Explicit node -> region table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedGeometry {
    regions: HashMap<NodeId, Region>,
}

impl FixedGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, region: Region) -> Option<Region> {
        self.regions.insert(node, region)
    }

    pub fn with(mut self, node: NodeId, region: Region) -> Self {
        self.insert(node, region);
        self
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<(NodeId, Region)> for FixedGeometry {
    fn from_iter<I: IntoIterator<Item = (NodeId, Region)>>(iter: I) -> Self {
        Self { regions: iter.into_iter().collect() }
    }
}

impl BoxGeometry for FixedGeometry {
    fn occupied_area(&self, node: NodeId) -> Option<Region> {
        self.regions.get(&node).copied()
    }
}
