use crate::entities::*;

/// Even-odd (ray casting) point-in-polygon test.
///
/// A horizontal ray is cast from `point` and every edge it crosses
/// toggles the result. Open polygons (fewer than three vertices) and
/// invalid points never contain anything. Points exactly on an edge may
/// be reported either way.
pub fn contains(polygon: &MapPolygon, point: MapPoint) -> bool {
    if !polygon.is_closed() || !point.is_valid() {
        return false;
    }
    match polygon.bbox() {
        Some(bbox) if bbox.contains_point(point) => {}
        _ => return false,
    }
    let (y, x) = point.to_lat_lng_deg();
    polygon.edges().fold(false, |inside, (from, to)| {
        let (y1, x1) = from.to_lat_lng_deg();
        let (y2, x2) = to.to_lat_lng_deg();
        let crosses = (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1;
        inside ^ crosses
    })
}

/// The vertex average of a polygon.
///
/// This is not the area-weighted centroid but good enough for placing labels.
pub fn centroid(polygon: &MapPolygon) -> Option<MapPoint> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (lat_sum, lng_sum) = polygon
        .vertices()
        .iter()
        .map(|p| p.to_lat_lng_deg())
        .fold((0.0, 0.0), |(lat_sum, lng_sum), (lat, lng)| {
            (lat_sum + lat, lng_sum + lng)
        });
    MapPoint::try_from_lat_lng_deg(lat_sum / n, lng_sum / n)
}

/// The first booth whose area contains `point`.
pub fn booth_at<'a>(
    booths: impl IntoIterator<Item = &'a Booth>,
    point: MapPoint,
) -> Option<&'a Booth> {
    booths.into_iter().find(|b| contains(&b.area, point))
}

/// The booth whose centroid is closest to `point`.
pub fn nearest_booth<'a>(
    booths: impl IntoIterator<Item = &'a Booth>,
    point: MapPoint,
) -> Option<(&'a Booth, Distance)> {
    booths
        .into_iter()
        .filter_map(|b| {
            let center = centroid(&b.area)?;
            MapPoint::distance(center, point).map(|d| (b, d))
        })
        .min_by(|(_, d1), (_, d2)| d1.0.total_cmp(&d2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use festmap_entities::builders::*;

    fn polygon(vertices: &[(f64, f64)]) -> MapPolygon {
        vertices
            .iter()
            .map(|&(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng))
            .collect()
    }

    fn pt(lat: f64, lng: f64) -> MapPoint {
        MapPoint::from_lat_lng_deg(lat, lng)
    }

    #[test]
    fn festival_square() {
        let square = polygon(&[
            (37.30, 126.83),
            (37.30, 126.84),
            (37.31, 126.84),
            (37.31, 126.83),
        ]);
        assert!(contains(&square, pt(37.305, 126.835)));
        assert!(!contains(&square, pt(37.50, 126.83)));
    }

    #[test]
    fn open_polygons_contain_nothing() {
        assert!(!contains(&MapPolygon::default(), pt(0.0, 0.0)));
        assert!(!contains(&polygon(&[(0.0, 0.0)]), pt(0.0, 0.0)));
        assert!(!contains(
            &polygon(&[(0.0, 0.0), (1.0, 1.0)]),
            pt(0.5, 0.5)
        ));
    }

    #[test]
    fn invalid_point_is_outside() {
        let square = polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        assert!(!contains(&square, MapPoint::default()));
    }

    #[test]
    fn concave_polygon() {
        // U-shape opening to the north
        let u = polygon(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (3.0, 3.0),
            (3.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ]);
        assert!(contains(&u, pt(0.5, 1.5)));
        assert!(contains(&u, pt(2.0, 0.5)));
        assert!(contains(&u, pt(2.0, 2.5)));
        // inside the notch
        assert!(!contains(&u, pt(2.0, 1.5)));
    }

    #[test]
    fn winding_order_does_not_matter() {
        let cw = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let ccw = polygon(&[(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        for p in [pt(0.5, 0.5), pt(0.1, 0.9), pt(1.5, 0.5), pt(-0.1, -0.1)] {
            assert_eq!(contains(&cw, p), contains(&ccw, p));
        }
    }

    #[test]
    fn interior_points_of_convex_polygon() {
        let hexagon = polygon(&[
            (0.0, 1.0),
            (1.0, 2.0),
            (2.0, 2.0),
            (3.0, 1.0),
            (2.0, 0.0),
            (1.0, 0.0),
        ]);
        let center = centroid(&hexagon).unwrap();
        assert!(contains(&hexagon, center));
        // Convex combinations of the vertices stay inside
        for (a, b) in [(0, 3), (1, 4), (2, 5)] {
            let (lat1, lng1) = hexagon.vertices()[a].to_lat_lng_deg();
            let (lat2, lng2) = hexagon.vertices()[b].to_lat_lng_deg();
            for t in [0.25, 0.5, 0.75] {
                let p = pt(lat1 + (lat2 - lat1) * t, lng1 + (lng2 - lng1) * t);
                assert!(contains(&hexagon, p), "{p} should be inside");
            }
        }
        for far in [pt(50.0, 50.0), pt(-10.0, 1.0), pt(1.0, -120.0)] {
            assert!(!contains(&hexagon, far));
        }
    }

    #[test]
    fn centroid_of_square() {
        let square = polygon(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        let (lat, lng) = centroid(&square).unwrap().to_lat_lng_deg();
        assert!((lat - 1.0).abs() < 1e-6);
        assert!((lng - 1.0).abs() < 1e-6);
        assert_eq!(centroid(&MapPolygon::default()), None);
    }

    #[test]
    fn find_booth_by_point() {
        let booths = vec![
            Booth::build()
                .id("a")
                .rect(37.300, 126.830, 37.301, 126.831)
                .finish(),
            Booth::build()
                .id("b")
                .rect(37.302, 126.830, 37.303, 126.831)
                .finish(),
        ];
        assert_eq!(
            booth_at(&booths, pt(37.3025, 126.8305)).map(|b| b.id.as_str()),
            Some("b")
        );
        assert!(booth_at(&booths, pt(37.3015, 126.8305)).is_none());

        let (nearest, distance) = nearest_booth(&booths, pt(37.3001, 126.8305)).unwrap();
        assert_eq!(nearest.id.as_str(), "a");
        assert!(distance.to_meters() < 100.0);
    }
}
