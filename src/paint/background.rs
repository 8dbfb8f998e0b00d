//! Resolved background values: layers, sources, repeat flags.
//!
//! These are inputs to [`super::BackgroundPainter`]. They describe what to
//! paint after style resolution; nothing here parses style text.

use crate::geometry::{Region, Size};

use super::gradient::LinearGradientBuilder;

/// Independent per-axis repeat flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackgroundRepeat {
    pub repeat_x: bool,
    pub repeat_y: bool,
}

impl BackgroundRepeat {
    /// `repeat`
    pub const REPEAT: Self = Self::new(true, true);
    /// `repeat-x`
    pub const REPEAT_X: Self = Self::new(true, false);
    /// `repeat-y`
    pub const REPEAT_Y: Self = Self::new(false, true);
    /// `no-repeat`
    pub const NO_REPEAT: Self = Self::new(false, false);

    pub const fn new(repeat_x: bool, repeat_y: bool) -> Self {
        Self { repeat_x, repeat_y }
    }
}

impl Default for BackgroundRepeat {
    fn default() -> Self {
        Self::REPEAT
    }
}

/// A decoded image known to the caller by name, with its intrinsic size.
///
/// Pixel data lives with whoever decoded the image; the painter only needs
/// identity and dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub source: String,
    pub intrinsic_size: Size,
}

impl ImageHandle {
    pub fn new(source: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            source: source.into(),
            intrinsic_size: Size::new(width, height),
        }
    }
}

/// What a layer paints.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSource {
    Image(ImageHandle),
    Gradient(LinearGradientBuilder),
}

/// One background layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    pub source: BackgroundSource,
    /// Explicit tile size (`background-size`); `None` uses the natural size.
    pub size: Option<Size>,
    pub repeat: BackgroundRepeat,
}

impl BackgroundLayer {
    pub fn image(image: ImageHandle) -> Self {
        Self {
            source: BackgroundSource::Image(image),
            size: None,
            repeat: BackgroundRepeat::default(),
        }
    }

    pub fn gradient(gradient: LinearGradientBuilder) -> Self {
        Self {
            source: BackgroundSource::Gradient(gradient),
            size: None,
            repeat: BackgroundRepeat::default(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn with_repeat(mut self, repeat: BackgroundRepeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Tile size within `area`: the explicit size, else the image's intrinsic
    /// size, else (gradients) the area itself.
    pub fn tile_size(&self, area: Region) -> Size {
        if let Some(size) = self.size {
            return size;
        }
        match &self.source {
            BackgroundSource::Image(image) => image.intrinsic_size,
            BackgroundSource::Gradient(_) => area.size(),
        }
    }
}
