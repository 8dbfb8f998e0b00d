//! Linear gradient description and resolution.
//!
//! A [`LinearGradientBuilder`] is the resolved `linear-gradient(...)` value: a
//! direction plus color stops in declaration order. Building it against a box
//! yields a [`LinearGradient`] with a concrete gradient line and normalized
//! stops, or `None` when the description cannot produce paint.
//!
//! The gradient line passes through the centre of the box. For a unit
//! direction `(dx, dy)` its length is `|w*dx| + |h*dy|`, so the 0% and 100%
//! points land on the corners the line points away from and towards.

use log::debug;

use crate::geometry::{Point, Region};

use super::color::Color;

/// Keyword directions (`to top`, `to bottom left`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientStrategy {
    ToTop,
    ToRight,
    ToBottom,
    ToLeft,
    ToTopRight,
    ToTopLeft,
    ToBottomRight,
    ToBottomLeft,
}

impl GradientStrategy {
    pub fn keyword(self) -> &'static str {
        match self {
            GradientStrategy::ToTop => "to top",
            GradientStrategy::ToRight => "to right",
            GradientStrategy::ToBottom => "to bottom",
            GradientStrategy::ToLeft => "to left",
            GradientStrategy::ToTopRight => "to top right",
            GradientStrategy::ToTopLeft => "to top left",
            GradientStrategy::ToBottomRight => "to bottom right",
            GradientStrategy::ToBottomLeft => "to bottom left",
        }
    }

    /// Parse a keyword direction. Corner words may come in either order.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let words: Vec<String> = keyword
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let strategy = match words.as_slice() {
            ["to", "top"] => GradientStrategy::ToTop,
            ["to", "right"] => GradientStrategy::ToRight,
            ["to", "bottom"] => GradientStrategy::ToBottom,
            ["to", "left"] => GradientStrategy::ToLeft,
            ["to", "top", "right"] | ["to", "right", "top"] => GradientStrategy::ToTopRight,
            ["to", "top", "left"] | ["to", "left", "top"] => GradientStrategy::ToTopLeft,
            ["to", "bottom", "right"] | ["to", "right", "bottom"] => GradientStrategy::ToBottomRight,
            ["to", "bottom", "left"] | ["to", "left", "bottom"] => GradientStrategy::ToBottomLeft,
            _ => return None,
        };
        Some(strategy)
    }

    /// Horizontal and vertical sign of the direction (y grows downward).
    fn signs(self) -> (f32, f32) {
        match self {
            GradientStrategy::ToTop => (0.0, -1.0),
            GradientStrategy::ToRight => (1.0, 0.0),
            GradientStrategy::ToBottom => (0.0, 1.0),
            GradientStrategy::ToLeft => (-1.0, 0.0),
            GradientStrategy::ToTopRight => (1.0, -1.0),
            GradientStrategy::ToTopLeft => (-1.0, -1.0),
            GradientStrategy::ToBottomRight => (1.0, 1.0),
            GradientStrategy::ToBottomLeft => (-1.0, 1.0),
        }
    }
}

/// Direction of the gradient line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientDirection {
    Strategy(GradientStrategy),
    /// Degrees clockwise from "to top".
    Angle(f32),
}

impl GradientDirection {
    /// Unit direction vector for a box of `width` x `height`.
    ///
    /// Corner keywords point perpendicular to the diagonal joining the two
    /// other corners, so the diagonal itself is a line of constant color.
    pub fn unit_vector(self, width: f32, height: f32) -> Option<Point> {
        let raw = match self {
            GradientDirection::Strategy(strategy) => {
                let (sx, sy) = strategy.signs();
                if sx != 0.0 && sy != 0.0 {
                    Point::new(sx * height, sy * width)
                } else {
                    Point::new(sx, sy)
                }
            }
            GradientDirection::Angle(degrees) => {
                let radians = degrees.to_radians();
                Point::new(radians.sin(), -radians.cos())
            }
        };
        let length = raw.dot(raw).sqrt();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }
        Some(raw * (1.0 / length))
    }
}

/// How a stop offset is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetType {
    /// Fraction of the gradient line, `0..=1`.
    #[default]
    Relative,
    /// Distance along the gradient line in page units.
    Absolute,
}

/// One color stop in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Color,
    pub offset: f32,
    pub offset_type: OffsetType,
}

impl ColorStop {
    pub fn new(color: Color, offset: f32, offset_type: OffsetType) -> Self {
        Self { color, offset, offset_type }
    }

    pub fn relative(color: Color, offset: f32) -> Self {
        Self::new(color, offset, OffsetType::Relative)
    }

    pub fn absolute(color: Color, offset: f32) -> Self {
        Self::new(color, offset, OffsetType::Absolute)
    }
}

/// Behaviour outside `0..=1` on the gradient line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpreadMethod {
    /// Extend the end colors.
    #[default]
    Pad,
    /// Restart the ramp every unit.
    Repeat,
    /// Mirror the ramp every unit.
    Reflect,
}

/// Gradient description awaiting a box to resolve against.
///
/// The default builder has no direction and no stops; it builds nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearGradientBuilder {
    direction: Option<GradientDirection>,
    stops: Vec<ColorStop>,
    spread: SpreadMethod,
}

impl LinearGradientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: GradientStrategy) -> Self {
        self.direction = Some(GradientDirection::Strategy(strategy));
        self
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.direction = Some(GradientDirection::Angle(degrees));
        self
    }

    pub fn with_stop(mut self, stop: ColorStop) -> Self {
        self.stops.push(stop);
        self
    }

    pub fn with_stops(mut self, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        self.stops.extend(stops);
        self
    }

    pub fn with_spread_method(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn direction(&self) -> Option<GradientDirection> {
        self.direction
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn spread_method(&self) -> SpreadMethod {
        self.spread
    }

    /// Resolve against `area`.
    ///
    /// Returns `None` when no direction is set, the area has no extent along
    /// the gradient line, or fewer than two stops have finite offsets.
    pub fn build(&self, area: Region) -> Option<LinearGradient> {
        let Some(direction) = self.direction else {
            debug!("gradient has no direction; nothing to build");
            return None;
        };
        let unit = direction.unit_vector(area.width, area.height)?;
        let line_length = (area.width * unit.x).abs() + (area.height * unit.y).abs();
        if !line_length.is_finite() || line_length <= 0.0 {
            debug!("gradient line has no length in {area:?}");
            return None;
        }

        let mut stops: Vec<(f32, Color)> = self
            .stops
            .iter()
            .filter(|stop| stop.offset.is_finite())
            .map(|stop| {
                let offset = match stop.offset_type {
                    OffsetType::Relative => stop.offset,
                    OffsetType::Absolute => stop.offset / line_length,
                };
                (offset, stop.color)
            })
            .collect();
        if stops.len() < 2 {
            debug!("gradient has {} usable stops; need two", stops.len());
            return None;
        }

        // Stable: equal offsets keep declaration order (hard stops).
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        for stop in &mut stops {
            stop.0 = stop.0.clamp(0.0, 1.0);
        }

        let half = unit * (line_length / 2.0);
        let center = area.center();
        Some(LinearGradient {
            start: center - half,
            end: center + half,
            stops,
            spread: self.spread,
        })
    }
}

/// A gradient resolved against a box, ready to sample.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: Point,
    end: Point,
    stops: Vec<(f32, Color)>,
    spread: SpreadMethod,
}

impl LinearGradient {
    /// The 0% point of the gradient line.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The 100% point of the gradient line.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Normalized `(offset, color)` stops, ascending, each in `0..=1`.
    pub fn stops(&self) -> &[(f32, Color)] {
        &self.stops
    }

    pub fn spread_method(&self) -> SpreadMethod {
        self.spread
    }

    /// Color at position `t` along the gradient line (0 = start, 1 = end).
    pub fn color_at(&self, t: f32) -> Color {
        let (Some(&(first_pos, first)), Some(&(last_pos, last))) =
            (self.stops.first(), self.stops.last())
        else {
            return Color::TRANSPARENT;
        };
        if !t.is_finite() {
            return first;
        }

        let pos = match self.spread {
            SpreadMethod::Pad => t.clamp(0.0, 1.0),
            SpreadMethod::Repeat => t.rem_euclid(1.0),
            SpreadMethod::Reflect => {
                let v = t.rem_euclid(2.0);
                if v > 1.0 {
                    2.0 - v
                } else {
                    v
                }
            }
        };

        if pos <= first_pos {
            return first;
        }
        if pos >= last_pos {
            return last;
        }
        for window in self.stops.windows(2) {
            let (p0, c0) = window[0];
            let (p1, c1) = window[1];
            if pos >= p0 && pos <= p1 {
                if p1 <= p0 {
                    return c1;
                }
                return c0.lerp(c1, (pos - p0) / (p1 - p0));
            }
        }
        last
    }

    /// Color at a page-space point, projected onto the gradient line.
    pub fn sample(&self, point: Point) -> Color {
        let axis = self.end - self.start;
        let length_sq = axis.dot(axis);
        if length_sq <= 0.0 {
            return self.color_at(0.0);
        }
        self.color_at((point - self.start).dot(axis) / length_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

    fn red_to_blue() -> LinearGradientBuilder {
        LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stop(ColorStop::relative(RED, 0.0))
            .with_stop(ColorStop::relative(BLUE, 1.0))
    }

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn keyword_round_trip() {
        for strategy in [
            GradientStrategy::ToTop,
            GradientStrategy::ToRight,
            GradientStrategy::ToBottom,
            GradientStrategy::ToLeft,
            GradientStrategy::ToTopRight,
            GradientStrategy::ToTopLeft,
            GradientStrategy::ToBottomRight,
            GradientStrategy::ToBottomLeft,
        ] {
            assert_eq!(GradientStrategy::from_keyword(strategy.keyword()), Some(strategy));
        }
        assert_eq!(
            GradientStrategy::from_keyword("to  LEFT bottom"),
            Some(GradientStrategy::ToBottomLeft)
        );
        assert_eq!(GradientStrategy::from_keyword("to middle"), None);
    }

    #[test]
    fn side_directions() {
        let to_right = GradientDirection::Strategy(GradientStrategy::ToRight);
        assert_eq!(to_right.unit_vector(100.0, 50.0), Some(Point::new(1.0, 0.0)));
        let to_top = GradientDirection::Strategy(GradientStrategy::ToTop);
        assert_eq!(to_top.unit_vector(100.0, 50.0), Some(Point::new(0.0, -1.0)));
    }

    #[test]
    fn angle_directions() {
        let down = GradientDirection::Angle(180.0).unit_vector(10.0, 10.0).unwrap();
        assert!(approx(down, Point::new(0.0, 1.0)));
        let right = GradientDirection::Angle(90.0).unit_vector(10.0, 10.0).unwrap();
        assert!(approx(right, Point::new(1.0, 0.0)));
        assert_eq!(GradientDirection::Angle(f32::NAN).unit_vector(10.0, 10.0), None);
    }

    #[test]
    fn corner_direction_is_perpendicular_to_other_diagonal() {
        let unit = GradientDirection::Strategy(GradientStrategy::ToBottomRight)
            .unit_vector(100.0, 50.0)
            .unwrap();
        // Diagonal from top-right (100, 0) to bottom-left (0, 50).
        let diagonal = Point::new(-100.0, 50.0);
        assert!(unit.dot(diagonal).abs() < 1e-3);
        assert!(unit.x > 0.0 && unit.y > 0.0);
    }

    #[test]
    fn horizontal_line_spans_box() {
        let gradient = red_to_blue().build(Region::new(10.0, 20.0, 100.0, 50.0)).unwrap();
        assert!(approx(gradient.start(), Point::new(10.0, 45.0)));
        assert!(approx(gradient.end(), Point::new(110.0, 45.0)));
    }

    #[test]
    fn corner_line_reaches_corners() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToBottomRight)
            .with_stop(ColorStop::relative(RED, 0.0))
            .with_stop(ColorStop::relative(BLUE, 1.0))
            .build(Region::sized(100.0, 50.0))
            .unwrap();
        // The top-left corner sits on the 0% line, bottom-right on the 100% line.
        assert_eq!(gradient.sample(Point::new(0.0, 0.0)).to_rgba8(), RED.to_rgba8());
        assert_eq!(gradient.sample(Point::new(100.0, 50.0)).to_rgba8(), BLUE.to_rgba8());
    }

    #[test]
    fn two_stop_scenario_builds() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToBottomLeft)
            .with_stop(ColorStop::relative(RED, 0.0))
            .with_stop(ColorStop::relative(BLUE, 0.5))
            .build(Region::sized(100.0, 50.0));
        assert!(gradient.is_some());
    }

    #[test]
    fn default_builder_builds_nothing() {
        assert_eq!(LinearGradientBuilder::new().build(Region::sized(100.0, 50.0)), None);
    }

    #[test]
    fn missing_direction_builds_nothing() {
        let builder = LinearGradientBuilder::new()
            .with_stop(ColorStop::relative(RED, 0.0))
            .with_stop(ColorStop::relative(BLUE, 1.0));
        assert_eq!(builder.build(Region::sized(100.0, 50.0)), None);
    }

    #[test]
    fn too_few_stops_builds_nothing() {
        let one = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stop(ColorStop::relative(RED, 0.0));
        assert_eq!(one.build(Region::sized(10.0, 10.0)), None);

        let nan = one.clone().with_stop(ColorStop::relative(BLUE, f32::NAN));
        assert_eq!(nan.build(Region::sized(10.0, 10.0)), None);
    }

    #[test]
    fn degenerate_box_builds_nothing() {
        assert_eq!(red_to_blue().build(Region::sized(0.0, 50.0)), None);
        // A vertical gradient only needs height.
        let vertical = red_to_blue().with_strategy(GradientStrategy::ToBottom);
        assert!(vertical.build(Region::sized(0.0, 50.0)).is_some());
    }

    #[test]
    fn stops_are_sorted_then_clamped() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stop(ColorStop::relative(BLUE, 1.5))
            .with_stop(ColorStop::relative(RED, -0.25))
            .with_stop(ColorStop::relative(Color::WHITE, 0.5))
            .build(Region::sized(10.0, 10.0))
            .unwrap();
        assert_eq!(
            gradient.stops(),
            &[(0.0, RED), (0.5, Color::WHITE), (1.0, BLUE)]
        );
    }

    #[test]
    fn absolute_offsets_scale_by_line_length() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stop(ColorStop::absolute(RED, 25.0))
            .with_stop(ColorStop::absolute(BLUE, 75.0))
            .build(Region::sized(100.0, 40.0))
            .unwrap();
        assert_eq!(gradient.stops(), &[(0.25, RED), (0.75, BLUE)]);
    }

    #[test]
    fn color_at_interpolates_and_pads() {
        let gradient = red_to_blue().build(Region::sized(100.0, 10.0)).unwrap();
        assert_eq!(gradient.color_at(-1.0), RED);
        assert_eq!(gradient.color_at(0.5), Color::rgba(0.5, 0.0, 0.5, 1.0));
        assert_eq!(gradient.color_at(3.0), BLUE);
        assert_eq!(gradient.sample(Point::new(25.0, 5.0)), Color::rgba(0.75, 0.0, 0.25, 1.0));
    }

    #[test]
    fn hard_stop_takes_later_color() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stops([
                ColorStop::relative(RED, 0.0),
                ColorStop::relative(RED, 0.5),
                ColorStop::relative(BLUE, 0.5),
                ColorStop::relative(BLUE, 1.0),
            ])
            .build(Region::sized(10.0, 10.0))
            .unwrap();
        assert_eq!(gradient.color_at(0.49), RED);
        assert_eq!(gradient.color_at(0.51), BLUE);
    }

    #[test]
    fn spread_methods() {
        let repeat = red_to_blue()
            .with_spread_method(SpreadMethod::Repeat)
            .build(Region::sized(10.0, 10.0))
            .unwrap();
        assert_eq!(repeat.color_at(1.25), repeat.color_at(0.25));
        assert_eq!(repeat.color_at(-0.75), repeat.color_at(0.25));

        let reflect = red_to_blue()
            .with_spread_method(SpreadMethod::Reflect)
            .build(Region::sized(10.0, 10.0))
            .unwrap();
        assert_eq!(reflect.color_at(1.25), reflect.color_at(0.75));
        assert_eq!(reflect.color_at(2.0), RED);
    }
}
