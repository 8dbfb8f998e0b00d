//! TaffyTree wrapper for box layout.
//!
//! [`BoxLayout`] mirrors the DOM tree into a taffy layout tree, runs layout
//! against a page size, and reports each box's occupied area as an absolute
//! [`Region`] in page coordinates.

use std::collections::HashMap;

use log::debug;
use taffy::prelude::*;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Point as PagePoint, Region, Size as PageSize};

use super::provider::BoxGeometry;
use super::style::BoxStyle;

/// Errors from layout computation.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout tree error: {0}")]
    Taffy(#[from] taffy::tree::TaffyError),
    #[error("invalid page size {width}x{height}")]
    InvalidPageSize { width: f32, height: f32 },
}

/// Wraps a [`TaffyTree`] and maintains a mapping from DOM [`NodeId`]s to
/// taffy node ids, plus the absolute regions of the last computation.
pub struct BoxLayout {
    /// The taffy tree, parameterized with our DOM NodeId as context data.
    tree: TaffyTree<NodeId>,
    /// Maps DOM NodeId -> taffy NodeId for quick lookup.
    node_map: HashMap<NodeId, taffy::prelude::NodeId>,
    /// DOM root and its style, restyled against the page on each compute.
    root: Option<(NodeId, BoxStyle)>,
    /// Absolute regions from the last [`BoxLayout::compute`].
    regions: HashMap<NodeId, Region>,
}

impl BoxLayout {
    /// Create a new, empty layout.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
            regions: HashMap::new(),
        }
    }

    /// Mirror `dom` and lay it out on a page in one step.
    pub fn build(
        dom: &Dom,
        styles: &HashMap<NodeId, BoxStyle>,
        page: PageSize,
    ) -> Result<Self, LayoutError> {
        let mut layout = Self::new();
        layout.sync_tree(dom, styles)?;
        layout.compute(page)?;
        Ok(layout)
    }

    /// Rebuild the taffy tree to mirror the DOM rooted at `dom.root()`.
    ///
    /// `styles` maps each DOM NodeId to its [`BoxStyle`]. Nodes without an
    /// entry get `BoxStyle::default()`. Detached nodes are ignored.
    pub fn sync_tree(
        &mut self,
        dom: &Dom,
        styles: &HashMap<NodeId, BoxStyle>,
    ) -> Result<(), LayoutError> {
        self.clear();

        let Some(dom_root) = dom.root() else {
            return Ok(());
        };

        let live_nodes = dom.walk_depth_first(dom_root);
        for &dom_id in &live_nodes {
            let style = styles.get(&dom_id).copied().unwrap_or_default();
            let taffy_id = self.tree.new_leaf_with_context(style.to_taffy(), dom_id)?;
            self.node_map.insert(dom_id, taffy_id);
        }

        for &dom_id in &live_nodes {
            let taffy_children: Vec<taffy::prelude::NodeId> = dom
                .children(dom_id)
                .iter()
                .filter_map(|child_id| self.node_map.get(child_id).copied())
                .collect();
            if let Some(&taffy_id) = self.node_map.get(&dom_id) {
                self.tree.set_children(taffy_id, &taffy_children)?;
            }
        }

        let root_style = styles.get(&dom_root).copied().unwrap_or_default();
        self.root = Some((dom_root, root_style));
        debug!("layout tree synced with {} boxes", self.node_map.len());
        Ok(())
    }

    /// Run layout against `page` and record absolute regions.
    ///
    /// The root box fills the page in any dimension its style leaves auto.
    pub fn compute(&mut self, page: PageSize) -> Result<(), LayoutError> {
        if !page.is_positive() {
            return Err(LayoutError::InvalidPageSize {
                width: page.width,
                height: page.height,
            });
        }

        self.regions.clear();
        let Some((dom_root, root_style)) = self.root else {
            return Ok(());
        };
        let Some(&taffy_root) = self.node_map.get(&dom_root) else {
            return Ok(());
        };

        self.tree
            .set_style(taffy_root, root_style.to_taffy_root(page))?;
        self.tree.compute_layout(
            taffy_root,
            taffy::geometry::Size {
                width: AvailableSpace::Definite(page.width),
                height: AvailableSpace::Definite(page.height),
            },
        )?;

        self.collect_regions(taffy_root, PagePoint::ORIGIN)?;
        Ok(())
    }

    /// Walk the taffy tree, accumulating parent offsets into absolute regions.
    fn collect_regions(
        &mut self,
        taffy_id: taffy::prelude::NodeId,
        parent_origin: PagePoint,
    ) -> Result<(), LayoutError> {
        let layout = *self.tree.layout(taffy_id)?;
        let origin = parent_origin + PagePoint::new(layout.location.x, layout.location.y);

        if let Some(&dom_id) = self.tree.get_node_context(taffy_id) {
            self.regions.insert(
                dom_id,
                Region::new(origin.x, origin.y, layout.size.width, layout.size.height),
            );
        }

        for child in self.tree.children(taffy_id)? {
            self.collect_regions(child, origin)?;
        }
        Ok(())
    }

    /// Absolute region of a box from the last computation.
    pub fn region(&self, node: NodeId) -> Option<Region> {
        self.regions.get(&node).copied()
    }

    /// All absolute regions from the last computation.
    pub fn regions(&self) -> &HashMap<NodeId, Region> {
        &self.regions
    }

    /// Remove all taffy nodes and results.
    fn clear(&mut self) {
        self.tree.clear();
        self.node_map.clear();
        self.regions.clear();
        self.root = None;
    }
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxGeometry for BoxLayout {
    fn occupied_area(&self, node: NodeId) -> Option<Region> {
        self.region(node)
    }
}
