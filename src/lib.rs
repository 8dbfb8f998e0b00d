//! # gilt-docpaint
//!
//! Selector matching and box background painting for paged document rendering.
//!
//! A document tree is styled by matching CSS selectors against its elements;
//! each box's resolved background layers are then tiled onto a drawing
//! surface. This crate covers that path from selector text to paint calls and
//! leaves markup parsing, image decoding and output serialization to its
//! callers.
//!
//! ## Core Systems
//!
//! - **[`css`]** — Selector tokenizer, parser, matching, additive specificity, ranked rule lookup
//! - **[`dom`]** — Slotmap-backed element arena and the [`dom::ElementTree`] navigation trait
//! - **[`layout`]** — Box geometry providers, including a taffy-backed layout pass
//! - **[`paint`]** — Background layers, linear gradients, canvas surfaces, the tiling painter
//! - **[`geometry`]** — Point, Size, Region, Spacing primitives
//! - **[`error`]** — Crate-level error type
//!
//! ## Example
//!
//! ```
//! use gilt_docpaint::css::Stylesheet;
//! use gilt_docpaint::dom::{Dom, NodeData};
//! use gilt_docpaint::geometry::Region;
//! use gilt_docpaint::layout::FixedGeometry;
//! use gilt_docpaint::paint::{
//!     BackgroundLayer, BackgroundPainter, BackgroundRepeat, ImageHandle, Surface,
//! };
//!
//! let mut dom = Dom::new();
//! let body = dom.insert(NodeData::new("body"));
//! let note = dom.insert_child(body, NodeData::new("div").with_class("note"));
//!
//! let mut sheet = Stylesheet::new();
//! sheet.add("body > .note", vec![
//!     BackgroundLayer::image(ImageHandle::new("dots.png", 10.0, 10.0))
//!         .with_repeat(BackgroundRepeat::REPEAT_X),
//! ])?;
//!
//! let geometry = FixedGeometry::new().with(note, Region::sized(100.0, 50.0));
//! let layers = sheet.resolve(&dom, note).cloned().unwrap_or_default();
//!
//! let mut surface = Surface::new();
//! let report = BackgroundPainter::default().paint_node(&geometry, note, &layers, &mut surface);
//! assert_eq!(report.tiles_placed, 11);
//! # Ok::<(), gilt_docpaint::Error>(())
//! ```

// Foundation
pub mod geometry;
pub mod error;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;
pub mod paint;

pub use error::{Error, Result};
