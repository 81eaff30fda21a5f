use super::*;

use crate::adapters::{json::LocatedBooth, to_json};
use festmap_core::geofence;

/// Finds the booth at `point` or, if there is none, the nearest one.
///
/// Inactive booths are ignored unless `include_inactive` is set.
pub fn locate_booth(
    booths: &[Booth],
    point: MapPoint,
    include_inactive: bool,
) -> Option<LocatedBooth> {
    if !point.is_valid() {
        debug!("Cannot locate a booth at an invalid position");
        return None;
    }
    let candidates = || {
        booths
            .iter()
            .filter(move |b| include_inactive || b.is_active)
    };
    if let Some(booth) = geofence::booth_at(candidates(), point) {
        return Some(to_json::located_booth(booth, point, true));
    }
    geofence::nearest_booth(candidates(), point)
        .map(|(booth, _)| to_json::located_booth(booth, point, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use festmap_entities::builders::*;

    fn booths() -> Vec<Booth> {
        vec![
            Booth::build()
                .id("stage")
                .rect(37.3000, 126.8300, 37.3010, 126.8310)
                .finish(),
            Booth::build()
                .id("closed")
                .rect(37.3020, 126.8300, 37.3030, 126.8310)
                .active(false)
                .finish(),
        ]
    }

    #[test]
    fn inside_a_booth() {
        let point = MapPoint::from_lat_lng_deg(37.3005, 126.8305);
        let located = locate_booth(&booths(), point, false).unwrap();
        assert!(located.inside);
        assert_eq!(located.booth.id, "stage");
        assert!(located.distance_meters < 1.0);
    }

    #[test]
    fn nearest_active_booth_outside() {
        let point = MapPoint::from_lat_lng_deg(37.3025, 126.8305);
        let located = locate_booth(&booths(), point, false).unwrap();
        assert!(!located.inside);
        assert_eq!(located.booth.id, "stage");
        assert!(located.distance_meters > 100.0);

        let located = locate_booth(&booths(), point, true).unwrap();
        assert!(located.inside);
        assert_eq!(located.booth.id, "closed");
    }

    #[test]
    fn nothing_to_locate() {
        let point = MapPoint::from_lat_lng_deg(37.3, 126.8);
        assert!(locate_booth(&[], point, true).is_none());
    }
}
