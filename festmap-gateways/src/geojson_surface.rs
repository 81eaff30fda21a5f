use std::{collections::BTreeMap, fs, path::Path};

use festmap_core::{
    entities::MapPoint,
    gateways::map::{MapSurface, OverlayHandle, VertexMarker},
    style::{LabelStyle, PolygonStyle},
};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

/// A headless [`MapSurface`] that collects all overlays as `GeoJSON`
/// features.
///
/// Styles are exported as properties following the
/// [simplestyle](https://github.com/mapbox/simplestyle-spec) naming.
#[derive(Debug, Clone)]
pub struct GeoJsonSurface {
    next_handle: u64,
    overlays: BTreeMap<OverlayHandle, Feature>,
    center: MapPoint,
    level: u8,
}

impl GeoJsonSurface {
    pub fn new(center: MapPoint, level: u8) -> Self {
        Self {
            next_handle: 0,
            overlays: BTreeMap::new(),
            center,
            level,
        }
    }

    pub const fn center(&self) -> MapPoint {
        self.center
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// All overlays in drawing order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.overlays.values()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        let (lat, lng) = self.center.to_lat_lng_deg();
        let mut foreign_members = JsonObject::new();
        foreign_members.insert("center".into(), json!([lng, lat]));
        foreign_members.insert("level".into(), json!(self.level));
        FeatureCollection {
            bbox: None,
            features: self.overlays.values().cloned().collect(),
            foreign_members: Some(foreign_members),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.to_feature_collection())?;
        fs::write(path, json)?;
        log::info!(
            "Saved {} overlays to {}",
            self.overlays.len(),
            path.display()
        );
        Ok(())
    }

    fn add(&mut self, geometry: Value, properties: JsonObject) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(geometry)),
            id: Some(geojson::feature::Id::Number(self.next_handle.into())),
            properties: Some(properties),
            foreign_members: None,
        };
        self.overlays.insert(handle, feature);
        handle
    }
}

fn position(point: MapPoint) -> Vec<f64> {
    let (lat, lng) = point.to_lat_lng_deg();
    vec![lng, lat]
}

fn properties(pairs: impl IntoIterator<Item = (&'static str, serde_json::Value)>) -> JsonObject {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

impl MapSurface for GeoJsonSurface {
    fn draw_polygon(
        &mut self,
        booth_id: Option<&str>,
        vertices: &[MapPoint],
        style: &PolygonStyle,
    ) -> OverlayHandle {
        let mut line: Vec<_> = vertices.iter().copied().map(position).collect();
        let geometry = if style.dashed || vertices.len() < 3 {
            Value::LineString(line)
        } else {
            // Rings are closed explicitly
            if let Some(first) = line.first().cloned() {
                line.push(first);
            }
            Value::Polygon(vec![line])
        };
        let kind = if booth_id.is_some() { "booth" } else { "draft" };
        let props = properties([
            ("kind", json!(kind)),
            ("booth", json!(booth_id)),
            ("stroke", json!(style.stroke_color)),
            ("stroke-width", json!(style.stroke_weight)),
            ("stroke-opacity", json!(style.stroke_opacity)),
            ("fill", json!(style.fill_color)),
            ("fill-opacity", json!(style.fill_opacity)),
            ("z-index", json!(style.z_index)),
            ("dashed", json!(style.dashed)),
        ]);
        self.add(geometry, props)
    }

    fn draw_label(
        &mut self,
        booth_id: &str,
        at: MapPoint,
        text: &str,
        style: &LabelStyle,
    ) -> OverlayHandle {
        let props = properties([
            ("kind", json!("label")),
            ("booth", json!(booth_id)),
            ("text", json!(text)),
            ("icon", json!(style.icon)),
            ("background", json!(style.background)),
            ("border", json!(style.border_color)),
            ("color", json!(style.text_color)),
            ("font-size", json!(style.tier.font_size)),
            ("icon-size", json!(style.tier.icon_size)),
            (
                "padding",
                json!([style.tier.padding_y, style.tier.padding_x]),
            ),
            ("scale", json!(style.tier.scale)),
            ("z-index", json!(style.z_index)),
        ]);
        self.add(Value::Point(position(at)), props)
    }

    fn draw_marker(&mut self, at: MapPoint, marker: VertexMarker) -> OverlayHandle {
        let props = properties([
            ("kind", json!("vertex")),
            ("index", json!(marker.index)),
            ("draggable", json!(marker.draggable)),
        ]);
        self.add(Value::Point(position(at)), props)
    }

    fn remove(&mut self, handle: OverlayHandle) {
        if self.overlays.remove(&handle).is_none() {
            log::debug!("Overlay {handle:?} has already been removed");
        }
    }

    fn clear(&mut self) {
        self.overlays.clear();
    }

    fn pan_to(&mut self, center: MapPoint) {
        self.center = center;
    }

    fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    fn level(&self) -> u8 {
        self.level
    }
}
