//! Canvas surface: where the painter sends its calls.
//!
//! [`CanvasSurface`] is the drawing interface the painter consumes. A backend
//! registers each paint resource once and then receives one placement per tile.
//! [`Surface`] is the in-memory implementation: it keeps the resource table and
//! an ordered log of every [`DrawCommand`], which is what tests inspect.

use std::fmt::Write as _;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Region;

use super::background::ImageHandle;
use super::gradient::LinearGradient;

new_key_type! {
    /// Handle to a resource registered on a surface.
    pub struct ResourceId;
}

/// A drawable registered against a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintResource {
    Image(ImageHandle),
    Gradient(LinearGradient),
}

impl PaintResource {
    /// Short human-readable form used in command logs.
    pub fn describe(&self) -> String {
        match self {
            PaintResource::Image(image) => format!(
                "image {:?} {}x{}",
                image.source, image.intrinsic_size.width, image.intrinsic_size.height
            ),
            PaintResource::Gradient(gradient) => {
                let (start, end) = (gradient.start(), gradient.end());
                format!(
                    "gradient ({},{})->({},{}) {} stops",
                    start.x,
                    start.y,
                    end.x,
                    end.y,
                    gradient.stops().len()
                )
            }
        }
    }
}

/// Resources registered on one surface, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    slots: SlotMap<ResourceId, PaintResource>,
    order: Vec<ResourceId>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: PaintResource) -> ResourceId {
        let id = self.slots.insert(resource);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: ResourceId) -> Option<&PaintResource> {
        self.slots.get(id)
    }

    /// Zero-based registration index of `id`.
    pub fn ordinal(&self, id: ResourceId) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &PaintResource)> {
        self.order
            .iter()
            .filter_map(move |&id| self.slots.get(id).map(|resource| (id, resource)))
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    PushClip(Region),
    PopClip,
    Place { resource: ResourceId, rect: Region },
}

/// Drawing interface consumed by the painter.
///
/// Calls are fire-and-forget: a backend that fails to draw handles that
/// itself, and placing the same resource repeatedly is expected.
pub trait CanvasSurface {
    /// Add a resource to the surface's resource table.
    fn register_resource(&mut self, resource: PaintResource) -> ResourceId;

    /// Draw a registered resource stretched into `rect`.
    fn place_resource(&mut self, resource: ResourceId, rect: Region);

    /// Restrict subsequent placements to `clip` until the matching `pop_clip`.
    fn push_clip(&mut self, _clip: Region) {}

    fn pop_clip(&mut self) {}
}

/// Recording surface.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    resources: ResourceTable,
    commands: Vec<DrawCommand>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn resource(&self, id: ResourceId) -> Option<&PaintResource> {
        self.resources.get(id)
    }

    /// Every call in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Placement calls only, as `(resource, rect)`.
    pub fn placements(&self) -> Vec<(ResourceId, Region)> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::Place { resource, rect } => Some((resource, rect)),
                _ => None,
            })
            .collect()
    }

    pub fn placement_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Place { .. }))
            .count()
    }

    /// Render the resource table and command log as text, one entry per line.
    ///
    /// Resources are named by registration index (`#0`, `#1`, ...) so two
    /// surfaces fed the same calls produce the same text.
    pub fn to_log(&self) -> String {
        let mut out = String::new();
        for (index, (_, resource)) in self.resources.iter().enumerate() {
            let _ = writeln!(out, "resource #{index}: {}", resource.describe());
        }
        for command in &self.commands {
            let _ = match command {
                DrawCommand::PushClip(clip) => writeln!(out, "clip {}", format_region(*clip)),
                DrawCommand::PopClip => writeln!(out, "unclip"),
                DrawCommand::Place { resource, rect } => match self.resources.ordinal(*resource) {
                    Some(index) => writeln!(out, "place #{index} {}", format_region(*rect)),
                    None => writeln!(out, "place ? {}", format_region(*rect)),
                },
            };
        }
        out
    }
}

fn format_region(region: Region) -> String {
    format!("{},{} {}x{}", region.x, region.y, region.width, region.height)
}

impl CanvasSurface for Surface {
    fn register_resource(&mut self, resource: PaintResource) -> ResourceId {
        self.resources.insert(resource)
    }

    fn place_resource(&mut self, resource: ResourceId, rect: Region) {
        self.commands.push(DrawCommand::Place { resource, rect });
    }

    fn push_clip(&mut self, clip: Region) {
        self.commands.push(DrawCommand::PushClip(clip));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> PaintResource {
        PaintResource::Image(ImageHandle::new(name, 4.0, 2.0))
    }

    #[test]
    fn new_surface_is_empty() {
        let surface = Surface::new();
        assert!(surface.resources().is_empty());
        assert!(surface.commands().is_empty());
        assert_eq!(surface.placement_count(), 0);
    }

    #[test]
    fn register_and_place() {
        let mut surface = Surface::new();
        let a = surface.register_resource(image("a.png"));
        let b = surface.register_resource(image("b.png"));
        surface.place_resource(b, Region::sized(4.0, 2.0));
        surface.place_resource(a, Region::new(4.0, 0.0, 4.0, 2.0));

        assert_eq!(surface.resources().len(), 2);
        assert_eq!(surface.resources().ordinal(a), Some(0));
        assert_eq!(surface.resources().ordinal(b), Some(1));
        assert_eq!(surface.resource(a), Some(&image("a.png")));
        assert_eq!(
            surface.placements(),
            vec![
                (b, Region::sized(4.0, 2.0)),
                (a, Region::new(4.0, 0.0, 4.0, 2.0)),
            ]
        );
    }

    #[test]
    fn clips_are_recorded_in_order() {
        let mut surface = Surface::new();
        let a = surface.register_resource(image("a.png"));
        surface.push_clip(Region::sized(10.0, 10.0));
        surface.place_resource(a, Region::sized(4.0, 2.0));
        surface.pop_clip();
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::PushClip(Region::sized(10.0, 10.0)),
                DrawCommand::Place { resource: a, rect: Region::sized(4.0, 2.0) },
                DrawCommand::PopClip,
            ]
        );
        assert_eq!(surface.placement_count(), 1);
    }

    #[test]
    fn default_clip_methods_are_no_ops() {
        struct Counter(usize);
        impl CanvasSurface for Counter {
            fn register_resource(&mut self, _resource: PaintResource) -> ResourceId {
                ResourceId::default()
            }
            fn place_resource(&mut self, _resource: ResourceId, _rect: Region) {
                self.0 += 1;
            }
        }

        let mut counter = Counter(0);
        counter.push_clip(Region::sized(1.0, 1.0));
        counter.place_resource(ResourceId::default(), Region::sized(1.0, 1.0));
        counter.pop_clip();
        assert_eq!(counter.0, 1);
    }

    #[test]
    fn log_format() {
        let mut surface = Surface::new();
        let a = surface.register_resource(image("a.png"));
        surface.push_clip(Region::new(0.0, 0.0, 8.0, 2.0));
        surface.place_resource(a, Region::new(-4.0, 0.0, 4.0, 2.0));
        surface.pop_clip();
        insta::assert_snapshot!(surface.to_log(), @r#"
        resource #0: image "a.png" 4x2
        clip 0,0 8x2
        place #0 -4,0 4x2
        unclip
        "#);
    }
}
