//! Document tree: slotmap-backed element arena with selector queries.

pub mod node;
pub mod tree;
pub mod element;
pub mod query;

pub use node::{NodeId, NodeData};
pub use tree::Dom;
pub use element::ElementTree;
