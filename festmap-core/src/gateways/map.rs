use crate::style::{LabelStyle, PolygonStyle};
use festmap_entities::geo::MapPoint;
use std::time::Instant;

/// Opaque reference to something drawn on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexMarker {
    pub index: usize,
    pub draggable: bool,
}

/// A user gesture on the map, already translated into geographic
/// coordinates by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// A click or tap on the map itself.
    Tap(MapPoint),
    MarkerClick {
        index: usize,
        at: Instant,
    },
    MarkerDrag {
        index: usize,
        point: MapPoint,
        at: Instant,
    },
    MarkerDragEnd {
        index: usize,
        point: MapPoint,
    },
    LevelChanged(u8),
}

/// An interactive map that overlays can be drawn on.
///
/// Implementations translate screen input into [`MapEvent`]s and hand
/// them to [`Editor::handle_event`](crate::editor::Editor::handle_event)
/// instead of registering callbacks. Zoom changes are reported the same
/// way and answered with [`OverlayRenderer::update`](crate::render::OverlayRenderer::update).
/// Surfaces never decide about styles.
pub trait MapSurface {
    fn draw_polygon(
        &mut self,
        booth_id: Option<&str>,
        vertices: &[MapPoint],
        style: &PolygonStyle,
    ) -> OverlayHandle;
    fn draw_label(
        &mut self,
        booth_id: &str,
        at: MapPoint,
        text: &str,
        style: &LabelStyle,
    ) -> OverlayHandle;
    fn draw_marker(&mut self, at: MapPoint, marker: VertexMarker) -> OverlayHandle;
    fn remove(&mut self, handle: OverlayHandle);
    /// Removes every overlay, including those drawn by others.
    fn clear(&mut self);

    fn pan_to(&mut self, center: MapPoint);
    fn set_level(&mut self, level: u8);
    fn level(&self) -> u8;

    fn remove_all(&mut self, handles: &mut Vec<OverlayHandle>) {
        for handle in handles.drain(..) {
            self.remove(handle);
        }
    }
}
