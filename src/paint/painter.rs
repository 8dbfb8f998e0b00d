//! Background painter: tiles each layer across a box.
//!
//! For every layer, in declaration order, the painter resolves a tile size,
//! lays out a grid of tile rectangles, registers the layer's resource once and
//! places it once per grid cell.
//!
//! # Tile grid
//!
//! ```text
//! repeating axis:      first tile starts one tile before the box edge,
//!                      placements continue while their leading edge is
//!                      inside the box  =>  ceil(extent / tile) + 1
//! non-repeating axis:  one tile at the box edge  =>  1
//! ```
//!
//! The grid is walked row-major: top row first, left to right within a row.
//!
//! Degenerate input never fails: a zero-area box, a non-positive or non-finite
//! tile, or a gradient that builds to nothing all skip the layer with zero
//! calls and no resource registration.

use log::{debug, trace, warn};

use crate::dom::node::NodeId;
use crate::geometry::{Region, Size};
use crate::layout::BoxGeometry;

use super::background::{BackgroundLayer, BackgroundSource};
use super::canvas::{CanvasSurface, PaintResource};

/// Default cap on placements for a single layer.
pub const DEFAULT_MAX_TILES_PER_LAYER: usize = 1 << 20;

// ---------------------------------------------------------------------------
// PainterConfig
// ---------------------------------------------------------------------------

/// Painter settings.
///
/// ```
/// use gilt_docpaint::paint::PainterConfig;
///
/// let config = PainterConfig::new()
///     .with_clip_to_box(false)
///     .with_max_tiles_per_layer(Some(10_000));
/// assert!(!config.clip_to_box);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PainterConfig {
    /// Wrap each layer's placements in `push_clip(box)` / `pop_clip()`.
    pub clip_to_box: bool,
    /// Skip a layer whose grid would exceed this many placements.
    pub max_tiles_per_layer: Option<usize>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            clip_to_box: true,
            max_tiles_per_layer: Some(DEFAULT_MAX_TILES_PER_LAYER),
        }
    }
}

impl PainterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip_to_box(mut self, clip: bool) -> Self {
        self.clip_to_box = clip;
        self
    }

    pub fn with_max_tiles_per_layer(mut self, max: Option<usize>) -> Self {
        self.max_tiles_per_layer = max;
        self
    }
}

// ---------------------------------------------------------------------------
// PaintReport
// ---------------------------------------------------------------------------

/// Summary of one paint pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintReport {
    /// Layers that issued at least one placement.
    pub layers_painted: usize,
    /// Total `place_resource` calls.
    pub tiles_placed: usize,
}

// ---------------------------------------------------------------------------
// Tile arithmetic
// ---------------------------------------------------------------------------

/// Number of placements along one axis.
///
/// Callers guarantee `extent > 0` and a positive finite `tile`.
pub fn tile_count(extent: f32, tile: f32, repeat: bool) -> usize {
    if !repeat {
        return 1;
    }
    // Saturating float-to-int cast keeps absurd ratios bounded.
    ((extent / tile).ceil() as usize).saturating_add(1)
}

/// Leading edges of the placements along one axis, starting at `origin`.
pub fn tile_positions(origin: f32, extent: f32, tile: f32, repeat: bool) -> Vec<f32> {
    if !repeat {
        return vec![origin];
    }
    let anchor = origin - tile;
    (0..tile_count(extent, tile, repeat))
        .map(|i| anchor + i as f32 * tile)
        .collect()
}

// ---------------------------------------------------------------------------
// BackgroundPainter
// ---------------------------------------------------------------------------

/// Paints background layers onto a [`CanvasSurface`].
///
/// Painting is a pure function of the inputs: the same box and layers always
/// produce the same call sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundPainter {
    config: PainterConfig,
}

impl BackgroundPainter {
    pub fn new(config: PainterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    /// Paint `layers` over `area`, first layer first.
    pub fn paint<C: CanvasSurface + ?Sized>(
        &self,
        area: Region,
        layers: &[BackgroundLayer],
        canvas: &mut C,
    ) -> PaintReport {
        let mut report = PaintReport::default();
        if !area.size().is_positive() || !area.x.is_finite() || !area.y.is_finite() {
            debug!("skipping {} background layers on empty box {area:?}", layers.len());
            return report;
        }

        for (index, layer) in layers.iter().enumerate() {
            let placed = self.paint_layer(index, area, layer, canvas);
            if placed > 0 {
                report.layers_painted += 1;
                report.tiles_placed += placed;
            }
        }
        report
    }

    /// Paint the backgrounds of `node`'s box, if the geometry knows it.
    pub fn paint_node<C: CanvasSurface + ?Sized>(
        &self,
        geometry: &dyn BoxGeometry,
        node: NodeId,
        layers: &[BackgroundLayer],
        canvas: &mut C,
    ) -> PaintReport {
        match geometry.occupied_area(node) {
            Some(area) => self.paint(area, layers, canvas),
            None => {
                debug!("no box geometry for {node:?}; skipping background");
                PaintReport::default()
            }
        }
    }

    /// Paint one layer, returning the number of placements issued.
    fn paint_layer<C: CanvasSurface + ?Sized>(
        &self,
        index: usize,
        area: Region,
        layer: &BackgroundLayer,
        canvas: &mut C,
    ) -> usize {
        let tile = layer.tile_size(area);
        if !tile.is_positive() {
            debug!("layer {index}: degenerate tile {tile:?}, skipped");
            return 0;
        }

        let columns = tile_count(area.width, tile.width, layer.repeat.repeat_x);
        let rows = tile_count(area.height, tile.height, layer.repeat.repeat_y);
        let total = columns.saturating_mul(rows);
        if let Some(max) = self.config.max_tiles_per_layer {
            if total > max {
                warn!("layer {index}: {columns}x{rows} tiles exceeds limit of {max}, skipped");
                return 0;
            }
        }

        let Some(resource) = resolve_resource(layer, tile) else {
            debug!("layer {index}: no paint resource, skipped");
            return 0;
        };
        let id = canvas.register_resource(resource);

        let xs = tile_positions(area.x, area.width, tile.width, layer.repeat.repeat_x);
        let ys = tile_positions(area.y, area.height, tile.height, layer.repeat.repeat_y);

        if self.config.clip_to_box {
            canvas.push_clip(area);
        }
        for &y in &ys {
            for &x in &xs {
                let rect = Region::new(x, y, tile.width, tile.height);
                trace!("layer {index}: tile at {x},{y}");
                canvas.place_resource(id, rect);
            }
        }
        if self.config.clip_to_box {
            canvas.pop_clip();
        }

        debug!("layer {index}: placed {total} tiles ({columns}x{rows})");
        total
    }
}

/// Build the paint resource for a layer.
///
/// Gradients resolve in tile-local space, origin at the tile's top-left
/// corner, so the single resource fits every placement rect.
fn resolve_resource(layer: &BackgroundLayer, tile: Size) -> Option<PaintResource> {
    match &layer.source {
        BackgroundSource::Image(image) => Some(PaintResource::Image(image.clone())),
        BackgroundSource::Gradient(builder) => builder
            .build(tile.to_region())
            .map(PaintResource::Gradient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::paint::background::{BackgroundRepeat, ImageHandle};
    use crate::paint::canvas::{DrawCommand, Surface};
    use crate::paint::color::Color;
    use crate::paint::gradient::{ColorStop, GradientStrategy, LinearGradientBuilder};
    use pretty_assertions::assert_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tile_layer(name: &str, repeat: BackgroundRepeat) -> BackgroundLayer {
        BackgroundLayer::image(ImageHandle::new(name, 10.0, 10.0)).with_repeat(repeat)
    }

    fn paint_count(repeat: BackgroundRepeat) -> usize {
        let mut surface = Surface::new();
        BackgroundPainter::default().paint(
            Region::sized(100.0, 50.0),
            &[tile_layer("tile.png", repeat)],
            &mut surface,
        );
        surface.placement_count()
    }

    #[test]
    fn tiling_table() {
        init_logger();
        assert_eq!(paint_count(BackgroundRepeat::new(true, true)), 66);
        assert_eq!(paint_count(BackgroundRepeat::new(false, true)), 6);
        assert_eq!(paint_count(BackgroundRepeat::new(true, false)), 11);
        assert_eq!(paint_count(BackgroundRepeat::new(false, false)), 1);
    }

    #[test]
    fn default_repeat_tiles_both_axes() {
        assert_eq!(paint_count(BackgroundRepeat::default()), 66);
    }

    #[test]
    fn tile_count_rule() {
        assert_eq!(tile_count(100.0, 10.0, true), 11);
        assert_eq!(tile_count(50.0, 10.0, true), 6);
        assert_eq!(tile_count(95.0, 10.0, true), 11);
        assert_eq!(tile_count(5.0, 10.0, true), 2);
        assert_eq!(tile_count(100.0, 10.0, false), 1);
    }

    #[test]
    fn tile_positions_anchor_one_tile_before_origin() {
        assert_eq!(tile_positions(0.0, 30.0, 10.0, true), vec![-10.0, 0.0, 10.0, 20.0]);
        assert_eq!(tile_positions(5.0, 30.0, 10.0, false), vec![5.0]);
        assert_eq!(tile_positions(100.0, 15.0, 10.0, true), vec![90.0, 100.0, 110.0]);
    }

    #[test]
    fn grid_is_row_major() {
        let mut surface = Surface::new();
        BackgroundPainter::new(PainterConfig::new().with_clip_to_box(false)).paint(
            Region::sized(10.0, 10.0),
            &[tile_layer("t.png", BackgroundRepeat::REPEAT)],
            &mut surface,
        );
        let origins: Vec<(f32, f32)> = surface
            .placements()
            .iter()
            .map(|(_, rect)| (rect.x, rect.y))
            .collect();
        assert_eq!(
            origins,
            vec![(-10.0, -10.0), (0.0, -10.0), (-10.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn zero_area_box_paints_nothing() {
        init_logger();
        for area in [
            Region::sized(0.0, 50.0),
            Region::sized(100.0, 0.0),
            Region::sized(-5.0, 50.0),
            Region::new(f32::NAN, 0.0, 100.0, 50.0),
        ] {
            let mut surface = Surface::new();
            let report = BackgroundPainter::default().paint(
                area,
                &[tile_layer("tile.png", BackgroundRepeat::REPEAT)],
                &mut surface,
            );
            assert_eq!(report, PaintReport::default());
            assert!(surface.commands().is_empty());
            assert!(surface.resources().is_empty());
        }
    }

    #[test]
    fn degenerate_tile_skips_layer() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f32::NAN, 10.0), (f32::INFINITY, 10.0)] {
            let mut surface = Surface::new();
            let layer = tile_layer("tile.png", BackgroundRepeat::REPEAT).with_size(w, h);
            let report =
                BackgroundPainter::default().paint(Region::sized(100.0, 50.0), &[layer], &mut surface);
            assert_eq!(report.tiles_placed, 0);
            assert!(surface.commands().is_empty());
            assert!(surface.resources().is_empty());
        }
    }

    #[test]
    fn degenerate_layer_does_not_stop_later_layers() {
        let mut surface = Surface::new();
        let layers = [
            tile_layer("bad.png", BackgroundRepeat::REPEAT).with_size(0.0, 0.0),
            tile_layer("good.png", BackgroundRepeat::NO_REPEAT),
        ];
        let report =
            BackgroundPainter::default().paint(Region::sized(100.0, 50.0), &layers, &mut surface);
        assert_eq!(report, PaintReport { layers_painted: 1, tiles_placed: 1 });
        assert_eq!(surface.resources().len(), 1);
    }

    #[test]
    fn layers_paint_in_declaration_order() {
        let mut surface = Surface::new();
        let first = ImageHandle::new("first.png", 10.0, 10.0);
        let second = ImageHandle::new("second.png", 10.0, 10.0);
        let layers = [
            BackgroundLayer::image(first.clone()).with_repeat(BackgroundRepeat::NO_REPEAT),
            BackgroundLayer::image(second.clone()).with_repeat(BackgroundRepeat::NO_REPEAT),
        ];
        let report =
            BackgroundPainter::default().paint(Region::sized(100.0, 50.0), &layers, &mut surface);

        assert_eq!(report, PaintReport { layers_painted: 2, tiles_placed: 2 });
        let placed: Vec<&PaintResource> = surface
            .placements()
            .iter()
            .filter_map(|(id, _)| surface.resource(*id))
            .collect();
        assert_eq!(
            placed,
            vec![&PaintResource::Image(first), &PaintResource::Image(second)]
        );
    }

    #[test]
    fn repeated_tiles_reuse_one_resource() {
        let mut surface = Surface::new();
        BackgroundPainter::default().paint(
            Region::sized(100.0, 50.0),
            &[tile_layer("tile.png", BackgroundRepeat::REPEAT_X)],
            &mut surface,
        );
        let placements = surface.placements();
        assert_eq!(surface.resources().len(), 1);
        assert_eq!(placements.len(), 11);
        assert!(placements.iter().all(|(id, _)| *id == placements[0].0));
    }

    #[test]
    fn painting_is_repeatable_across_surfaces() {
        let layers = [
            tile_layer("a.png", BackgroundRepeat::REPEAT),
            tile_layer("b.png", BackgroundRepeat::REPEAT_Y),
        ];
        let painter = BackgroundPainter::default();
        let mut first = Surface::new();
        let mut second = Surface::new();
        let report_a = painter.paint(Region::new(3.0, 4.0, 100.0, 50.0), &layers, &mut first);
        let report_b = painter.paint(Region::new(3.0, 4.0, 100.0, 50.0), &layers, &mut second);

        assert_eq!(report_a, report_b);
        assert_eq!(first.commands().len(), second.commands().len());
        let resolve = |surface: &Surface| -> Vec<(PaintResource, Region)> {
            surface
                .placements()
                .into_iter()
                .filter_map(|(id, rect)| surface.resource(id).cloned().map(|r| (r, rect)))
                .collect()
        };
        assert_eq!(resolve(&first), resolve(&second));
        assert_eq!(first.to_log(), second.to_log());
    }

    #[test]
    fn gradient_layer_registers_resource() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToBottomLeft)
            .with_stop(ColorStop::relative(Color::BLACK, 0.0))
            .with_stop(ColorStop::relative(Color::WHITE, 0.5));
        let layer = BackgroundLayer::gradient(gradient).with_repeat(BackgroundRepeat::NO_REPEAT);

        let mut surface = Surface::new();
        let report =
            BackgroundPainter::default().paint(Region::sized(100.0, 50.0), &[layer], &mut surface);

        assert!(!surface.resources().is_empty());
        assert_eq!(report.tiles_placed, 1);
        assert_eq!(surface.placements()[0].1, Region::sized(100.0, 50.0));
    }

    #[test]
    fn gradient_resolves_in_tile_space() {
        let gradient = LinearGradientBuilder::new()
            .with_strategy(GradientStrategy::ToRight)
            .with_stop(ColorStop::relative(Color::BLACK, 0.0))
            .with_stop(ColorStop::relative(Color::WHITE, 1.0));
        let layer = BackgroundLayer::gradient(gradient).with_size(20.0, 10.0);

        let mut surface = Surface::new();
        let area = Region::new(300.0, 200.0, 40.0, 10.0);
        BackgroundPainter::default().paint(area, &[layer], &mut surface);

        let placements = surface.placements();
        assert_eq!(placements.len(), 3 * 2);
        let Some(PaintResource::Gradient(resolved)) = surface.resource(placements[0].0) else {
            panic!("expected a gradient resource");
        };
        assert_eq!(resolved.start(), Point::new(0.0, 5.0));
        assert_eq!(resolved.end(), Point::new(20.0, 5.0));

        // Every tile maps the same local ramp: left edge black, right edge white.
        for (_, rect) in &placements {
            let local_left = Point::new(0.0, rect.height / 2.0);
            let local_right = Point::new(rect.width, rect.height / 2.0);
            assert_eq!(resolved.sample(local_left), Color::BLACK);
            assert_eq!(resolved.sample(local_right), Color::WHITE);
        }
    }

    #[test]
    fn invalid_gradient_leaves_table_empty() {
        init_logger();
        let mut surface = Surface::new();
        let layer = BackgroundLayer::gradient(LinearGradientBuilder::new());
        let report =
            BackgroundPainter::default().paint(Region::sized(100.0, 50.0), &[layer], &mut surface);

        assert_eq!(report, PaintReport::default());
        assert!(surface.resources().is_empty());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn tile_budget_skips_oversized_layer() {
        init_logger();
        let painter = BackgroundPainter::new(PainterConfig::new().with_max_tiles_per_layer(Some(65)));
        let mut surface = Surface::new();
        let layers = [
            tile_layer("big.png", BackgroundRepeat::REPEAT),
            tile_layer("small.png", BackgroundRepeat::REPEAT_X),
        ];
        let report = painter.paint(Region::sized(100.0, 50.0), &layers, &mut surface);
        assert_eq!(report, PaintReport { layers_painted: 1, tiles_placed: 11 });
        assert_eq!(surface.resources().len(), 1);

        let unlimited = BackgroundPainter::new(PainterConfig::new().with_max_tiles_per_layer(None));
        let mut surface = Surface::new();
        let report = unlimited.paint(Region::sized(100.0, 50.0), &layers, &mut surface);
        assert_eq!(report.tiles_placed, 77);
    }

    #[test]
    fn each_layer_is_clipped_to_the_box() {
        let area = Region::new(0.0, 0.0, 20.0, 10.0);
        let mut surface = Surface::new();
        BackgroundPainter::default().paint(
            area,
            &[
                tile_layer("a.png", BackgroundRepeat::NO_REPEAT),
                tile_layer("b.png", BackgroundRepeat::NO_REPEAT),
            ],
            &mut surface,
        );
        let kinds: Vec<&str> = surface
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::PushClip(_) => "clip",
                DrawCommand::PopClip => "unclip",
                DrawCommand::Place { .. } => "place",
            })
            .collect();
        assert_eq!(kinds, vec!["clip", "place", "unclip", "clip", "place", "unclip"]);
        assert_eq!(surface.commands()[0], DrawCommand::PushClip(area));
    }

    #[test]
    fn without_clipping_only_placements_are_issued() {
        let mut surface = Surface::new();
        BackgroundPainter::new(PainterConfig::new().with_clip_to_box(false)).paint(
            Region::sized(100.0, 50.0),
            &[tile_layer("a.png", BackgroundRepeat::REPEAT)],
            &mut surface,
        );
        assert_eq!(surface.commands().len(), 66);
    }

    #[test]
    fn command_log_snapshot() {
        let mut surface = Surface::new();
        BackgroundPainter::default().paint(
            Region::new(0.0, 0.0, 20.0, 10.0),
            &[tile_layer("stripe.png", BackgroundRepeat::REPEAT_X)],
            &mut surface,
        );
        insta::assert_snapshot!(surface.to_log(), @r#"
        resource #0: image "stripe.png" 10x10
        clip 0,0 20x10
        place #0 -10,0 10x10
        place #0 0,0 10x10
        place #0 10,0 10x10
        unclip
        "#);
    }

    #[test]
    fn paint_node_uses_geometry() {
        use crate::dom::{Dom, NodeData};
        use crate::layout::FixedGeometry;

        let mut dom = Dom::new();
        let boxed = dom.insert(NodeData::new("div"));
        let unboxed = dom.insert_child(boxed, NodeData::new("span"));
        let geometry = FixedGeometry::new().with(boxed, Region::sized(100.0, 50.0));
        let layers = [tile_layer("tile.png", BackgroundRepeat::REPEAT)];

        let mut surface = Surface::new();
        let painter = BackgroundPainter::default();
        assert_eq!(painter.paint_node(&geometry, boxed, &layers, &mut surface).tiles_placed, 66);
        assert_eq!(
            painter.paint_node(&geometry, unboxed, &layers, &mut surface),
            PaintReport::default()
        );
    }
}
