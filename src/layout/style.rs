//! Box style -> taffy Style conversion.
//!
//! Maps the small set of box properties the renderer needs ([`BoxStyle`]) to
//! taffy's layout types ([`taffy::Style`], [`Dimension`], [`LengthPercentage`]).

use taffy::prelude::*;

use crate::geometry::{Size as PageSize, Spacing};

/// A box dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Sized by the parent (stretch) or by content.
    #[default]
    Auto,
    /// Absolute length in page units.
    Px(f32),
    /// Percentage of the containing block, 0..100.
    Percent(f32),
}

impl Length {
    fn to_dimension(self) -> Dimension {
        match self {
            Length::Auto => Dimension::AUTO,
            Length::Px(value) => Dimension::from_length(value),
            Length::Percent(value) => Dimension::from_percent(value / 100.0),
        }
    }
}

/// Main axis along which children are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Block flow: children stack top to bottom.
    #[default]
    Column,
    /// Inline flow: children stack left to right.
    Row,
}

/// Resolved box properties consumed by [`super::BoxLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub width: Length,
    pub height: Length,
    pub padding: Spacing,
    pub direction: Direction,
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Fixed width and height in page units.
    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with_width(Length::Px(width)).with_height(Length::Px(height))
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Convert to a taffy style. Boxes never shrink below their declared size.
    pub fn to_taffy(&self) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: match self.direction {
                Direction::Column => FlexDirection::Column,
                Direction::Row => FlexDirection::Row,
            },
            flex_shrink: 0.0,
            size: taffy::geometry::Size {
                width: self.width.to_dimension(),
                height: self.height.to_dimension(),
            },
            padding: taffy::geometry::Rect {
                top: LengthPercentage::from_length(self.padding.top),
                right: LengthPercentage::from_length(self.padding.right),
                bottom: LengthPercentage::from_length(self.padding.bottom),
                left: LengthPercentage::from_length(self.padding.left),
            },
            ..Style::default()
        }
    }

    /// Style for the root box: auto dimensions fill the page.
    pub fn to_taffy_root(&self, page: PageSize) -> Style {
        let mut style = self.to_taffy();
        if self.width == Length::Auto {
            style.size.width = Dimension::from_length(page.width);
        }
        if self.height == Length::Auto {
            style.size.height = Dimension::from_length(page.height);
        }
        style
    }
}
