//! Keeps the overlays of a [`MapSurface`] in sync with the booth list.

use crate::{
    entities::*,
    gateways::map::{MapSurface, OverlayHandle, VertexMarker},
    geofence,
    style::{LabelStyle, MapMode, PolygonStyle, ZoomTier},
};

/// Map level used when focusing a single booth.
pub const FOCUS_LEVEL: u8 = 2;

#[derive(Debug, Default)]
pub struct OverlayRenderer {
    mode: MapMode,
    booth_overlays: Vec<OverlayHandle>,
    editor_overlays: Vec<OverlayHandle>,
    // What has been drawn last
    drawn: Option<(Vec<Booth>, ZoomTier)>,
}

impl OverlayRenderer {
    pub fn new(mode: MapMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub const fn mode(&self) -> MapMode {
        self.mode
    }

    /// Whether the booths or the zoom tier differ from the last rendering.
    pub fn needs_redraw(&self, booths: &[Booth], level: u8) -> bool {
        match &self.drawn {
            None => true,
            Some((drawn_booths, drawn_tier)) => {
                *drawn_tier != ZoomTier::for_level(level) || drawn_booths.as_slice() != booths
            }
        }
    }

    /// Replaces all booth overlays and returns the number of drawn booths.
    pub fn render<S: MapSurface + ?Sized>(&mut self, surface: &mut S, booths: &[Booth]) -> usize {
        surface.remove_all(&mut self.booth_overlays);
        let tier = ZoomTier::for_level(surface.level());
        let mut count = 0;
        for booth in booths {
            let Some(style) = PolygonStyle::for_booth(booth, self.mode) else {
                continue;
            };
            if !booth.area.is_closed() {
                log::debug!("Skipping booth {} without a closed area", booth.id);
                continue;
            }
            let handle =
                surface.draw_polygon(Some(booth.id.as_str()), booth.area.vertices(), &style);
            self.booth_overlays.push(handle);
            count += 1;
            if !tier.show_labels {
                continue;
            }
            if let Some(center) = geofence::centroid(&booth.area) {
                let label_style = LabelStyle::for_booth(booth, tier);
                let handle =
                    surface.draw_label(booth.id.as_str(), center, booth.label(), &label_style);
                self.booth_overlays.push(handle);
            }
        }
        log::debug!(
            "Rendered {count} of {} booths at map level {}",
            booths.len(),
            surface.level()
        );
        self.drawn = Some((booths.to_vec(), tier));
        count
    }

    /// Renders only if something relevant changed.
    pub fn update<S: MapSurface + ?Sized>(&mut self, surface: &mut S, booths: &[Booth]) -> bool {
        if !self.needs_redraw(booths, surface.level()) {
            return false;
        }
        self.render(surface, booths);
        true
    }

    /// Draws the working polygon of the editor with one marker per vertex.
    pub fn draw_editor<S: MapSurface + ?Sized>(&mut self, surface: &mut S, polygon: &MapPolygon) {
        surface.remove_all(&mut self.editor_overlays);
        let vertices = polygon.vertices();
        if vertices.len() >= 2 {
            let handle = surface.draw_polygon(None, vertices, &PolygonStyle::draft_outline());
            self.editor_overlays.push(handle);
        }
        if polygon.is_closed() {
            let handle = surface.draw_polygon(None, vertices, &PolygonStyle::draft());
            self.editor_overlays.push(handle);
        }
        for (index, vertex) in vertices.iter().enumerate() {
            let marker = VertexMarker {
                index,
                draggable: true,
            };
            self.editor_overlays.push(surface.draw_marker(*vertex, marker));
        }
    }

    pub fn clear_editor<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.remove_all(&mut self.editor_overlays);
    }

    /// Moves the viewport to the center of a booth.
    pub fn focus_booth<S: MapSurface + ?Sized>(&self, surface: &mut S, booth: &Booth) -> bool {
        let Some(center) = geofence::centroid(&booth.area) else {
            return false;
        };
        surface.pan_to(center);
        surface.set_level(FOCUS_LEVEL);
        true
    }

    /// Switches between the visitor and the admin map.
    ///
    /// The whole surface is wiped, the next [`Self::update`] redraws.
    pub fn switch_mode<S: MapSurface + ?Sized>(&mut self, surface: &mut S, mode: MapMode) {
        surface.clear();
        self.booth_overlays.clear();
        self.editor_overlays.clear();
        self.drawn = None;
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use festmap_entities::builders::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Drawn {
        Polygon(Option<String>, usize, PolygonStyle),
        Label(String, String),
        Marker(VertexMarker),
    }

    /// Remembers everything that is currently visible.
    #[derive(Debug)]
    pub struct RecordingSurface {
        next: u64,
        pub overlays: BTreeMap<OverlayHandle, Drawn>,
        pub level: u8,
        pub center: Option<MapPoint>,
    }

    impl RecordingSurface {
        pub fn new(level: u8) -> Self {
            Self {
                next: 0,
                overlays: BTreeMap::new(),
                level,
                center: None,
            }
        }

        fn add(&mut self, drawn: Drawn) -> OverlayHandle {
            self.next += 1;
            let handle = OverlayHandle(self.next);
            self.overlays.insert(handle, drawn);
            handle
        }

        pub fn labels(&self) -> Vec<&str> {
            self.overlays
                .values()
                .filter_map(|d| match d {
                    Drawn::Label(_, text) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn polygons(&self) -> Vec<&PolygonStyle> {
            self.overlays
                .values()
                .filter_map(|d| match d {
                    Drawn::Polygon(_, _, style) => Some(style),
                    _ => None,
                })
                .collect()
        }

        pub fn markers(&self) -> usize {
            self.overlays
                .values()
                .filter(|d| matches!(d, Drawn::Marker(_)))
                .count()
        }
    }

    impl MapSurface for RecordingSurface {
        fn draw_polygon(
            &mut self,
            booth_id: Option<&str>,
            vertices: &[MapPoint],
            style: &PolygonStyle,
        ) -> OverlayHandle {
            self.add(Drawn::Polygon(
                booth_id.map(ToOwned::to_owned),
                vertices.len(),
                *style,
            ))
        }
        fn draw_label(
            &mut self,
            booth_id: &str,
            _: MapPoint,
            text: &str,
            _: &LabelStyle,
        ) -> OverlayHandle {
            self.add(Drawn::Label(booth_id.to_owned(), text.to_owned()))
        }
        fn draw_marker(&mut self, _: MapPoint, marker: VertexMarker) -> OverlayHandle {
            self.add(Drawn::Marker(marker))
        }
        fn remove(&mut self, handle: OverlayHandle) {
            self.overlays.remove(&handle);
        }
        fn clear(&mut self) {
            self.overlays.clear();
        }
        fn pan_to(&mut self, center: MapPoint) {
            self.center = Some(center);
        }
        fn set_level(&mut self, level: u8) {
            self.level = level;
        }
        fn level(&self) -> u8 {
            self.level
        }
    }

    fn booths() -> Vec<Booth> {
        vec![
            Booth::build()
                .id("a")
                .name("Robot Lab - Dept. of Mechanics")
                .rect(37.300, 126.830, 37.301, 126.831)
                .finish(),
            Booth::build()
                .id("b")
                .name("Closed")
                .rect(37.302, 126.830, 37.303, 126.831)
                .active(false)
                .finish(),
            Booth::build()
                .id("c")
                .name("Broken")
                .area(&[(37.0, 126.0), (37.1, 126.1)])
                .finish(),
        ]
    }

    #[test]
    fn visitor_map_skips_inactive_booths() {
        let mut surface = RecordingSurface::new(3);
        let mut renderer = OverlayRenderer::new(MapMode::Visitor);
        assert_eq!(renderer.render(&mut surface, &booths()), 1);
        assert_eq!(surface.labels(), ["Robot Lab"]);
        assert_eq!(surface.polygons().len(), 1);
    }

    #[test]
    fn admin_map_fades_inactive_booths() {
        let mut surface = RecordingSurface::new(3);
        let mut renderer = OverlayRenderer::new(MapMode::Admin);
        assert_eq!(renderer.render(&mut surface, &booths()), 2);
        let faded = surface
            .polygons()
            .into_iter()
            .filter(|s| s.stroke_opacity < 0.5)
            .count();
        assert_eq!(faded, 1);
    }

    #[test]
    fn switching_mode_wipes_the_surface() {
        let mut surface = RecordingSurface::new(3);
        let mut renderer = OverlayRenderer::new(MapMode::Visitor);
        renderer.render(&mut surface, &booths());
        let foreign = surface.draw_marker(
            MapPoint::from_lat_lng_deg(37.3, 126.83),
            VertexMarker {
                index: 0,
                draggable: false,
            },
        );
        renderer.switch_mode(&mut surface, MapMode::Admin);
        assert!(surface.overlays.is_empty());
        assert!(!surface.overlays.contains_key(&foreign));
        assert_eq!(renderer.mode(), MapMode::Admin);
        assert!(renderer.update(&mut surface, &booths()));
        assert_eq!(surface.polygons().len(), 2);
    }

    #[test]
    fn labels_are_hidden_when_zoomed_out() {
        let mut surface = RecordingSurface::new(6);
        let mut renderer = OverlayRenderer::default();
        renderer.render(&mut surface, &booths());
        assert!(surface.labels().is_empty());
        assert_eq!(surface.polygons().len(), 1);
    }

    #[test]
    fn redraw_on_changes_only() {
        let mut surface = RecordingSurface::new(2);
        let mut renderer = OverlayRenderer::default();
        let mut booths = booths();
        assert!(renderer.update(&mut surface, &booths));
        assert!(!renderer.update(&mut surface, &booths));

        // same tier
        surface.set_level(1);
        assert!(!renderer.update(&mut surface, &booths));
        surface.set_level(3);
        assert!(renderer.update(&mut surface, &booths));

        booths[1].is_active = true;
        assert!(renderer.needs_redraw(&booths, 3));
        assert!(renderer.update(&mut surface, &booths));
        // old overlays were replaced, not duplicated
        assert_eq!(surface.polygons().len(), 2);
        assert_eq!(surface.labels().len(), 2);
    }

    #[test]
    fn editor_overlays() {
        let mut surface = RecordingSurface::new(2);
        let mut renderer = OverlayRenderer::default();
        let mut polygon = MapPolygon::default();
        polygon.push(MapPoint::from_lat_lng_deg(0.0, 0.0));
        renderer.draw_editor(&mut surface, &polygon);
        assert_eq!(surface.markers(), 1);
        assert!(surface.polygons().is_empty());

        polygon.push(MapPoint::from_lat_lng_deg(0.0, 1.0));
        polygon.push(MapPoint::from_lat_lng_deg(1.0, 1.0));
        renderer.draw_editor(&mut surface, &polygon);
        assert_eq!(surface.markers(), 3);
        assert_eq!(surface.polygons().len(), 2);
        assert!(surface.polygons().iter().any(|s| s.fill_opacity == 0.2));

        renderer.clear_editor(&mut surface);
        assert!(surface.overlays.is_empty());
    }

    #[test]
    fn focus_on_booth() {
        let mut surface = RecordingSurface::new(5);
        let renderer = OverlayRenderer::default();
        let booth = &booths()[0];
        assert!(renderer.focus_booth(&mut surface, booth));
        assert_eq!(surface.level, FOCUS_LEVEL);
        let (lat, lng) = surface.center.unwrap().to_lat_lng_deg();
        assert!((lat - 37.3005).abs() < 1e-6);
        assert!((lng - 126.8305).abs() < 1e-6);

        let empty = Booth::build().finish();
        assert!(!renderer.focus_booth(&mut surface, &empty));
    }
}
