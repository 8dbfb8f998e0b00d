//! Box background painting: resolved background values, gradient resources,
//! the canvas surface interface, and the tiling painter.

pub mod background;
pub mod canvas;
pub mod color;
pub mod gradient;
pub mod painter;

pub use background::{BackgroundLayer, BackgroundRepeat, BackgroundSource, ImageHandle};
pub use canvas::{CanvasSurface, DrawCommand, PaintResource, ResourceId, ResourceTable, Surface};
pub use color::Color;
pub use gradient::{
    ColorStop, GradientDirection, GradientStrategy, LinearGradient, LinearGradientBuilder,
    OffsetType, SpreadMethod,
};
pub use painter::{BackgroundPainter, PaintReport, PainterConfig};
