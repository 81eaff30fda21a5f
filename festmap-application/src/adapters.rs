pub use festmap_boundary as json;

pub mod from_json {
    //! JSON -> Entity

    use super::json::*;
    use crate::{entities as e, usecases};

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn new_booth(from: NewBooth) -> usecases::NewBooth {
        let NewBooth {
            name,
            category,
            description,
            coordinates,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            max_capacity,
            tags,
        } = from;
        usecases::NewBooth {
            name,
            category: e::BoothCategory::from_key(&category),
            description,
            area: polygon_from_coordinates(coordinates),
            operating_hours,
            contact,
            menu_items: menu_items.unwrap_or_default(),
            price,
            webcam_url,
            max_capacity,
            tags: tags.unwrap_or_default(),
        }
    }

    pub fn booth_patch(from: BoothPatch) -> usecases::BoothPatch {
        let BoothPatch {
            name,
            category,
            description,
            coordinates,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            is_active,
            congestion_level,
            waiting_time,
            current_visitors,
            max_capacity,
            tags,
        } = from;
        usecases::BoothPatch {
            name,
            category: category.as_deref().map(e::BoothCategory::from_key),
            description,
            area: coordinates.map(polygon_from_coordinates),
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            is_active,
            congestion: congestion_level.map(Into::into),
            waiting_minutes: waiting_time,
            current_visitors,
            max_capacity,
            tags,
        }
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::json::*;
    use crate::entities as e;

    pub fn located_booth(booth: &e::Booth, point: e::MapPoint, inside: bool) -> LocatedBooth {
        let distance_meters = festmap_core::geofence::centroid(&booth.area)
            .and_then(|center| e::MapPoint::distance(point, center))
            .map(e::Distance::to_meters)
            .unwrap_or(f64::NAN);
        LocatedBooth {
            booth: booth.clone().into(),
            inside,
            distance_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{json, *};
    use crate::entities::*;

    #[test]
    fn new_booth_from_json() {
        let new_booth: json::NewBooth = serde_json::from_str(
            r#"{
                "name": " Lemonade ",
                "category": "BEVERAGE",
                "coordinates": [
                    {"lat": 37.30, "lng": 126.83},
                    {"lat": 37.30, "lng": 126.84},
                    {"lat": 37.31, "lng": 126.84}
                ],
                "tags": ["cold"]
            }"#,
        )
        .unwrap();
        let new_booth = from_json::new_booth(new_booth);
        assert_eq!(new_booth.category, BoothCategory::Beverage);
        assert_eq!(new_booth.area.len(), 3);
        assert!(new_booth.area.is_valid());
        assert_eq!(new_booth.tags, ["cold"]);
        assert!(new_booth.menu_items.is_empty());
    }

    #[test]
    fn empty_patch_from_json() {
        let patch = from_json::booth_patch(json::BoothPatch::default());
        assert!(patch.is_empty());
        let patch = from_json::booth_patch(json::BoothPatch {
            congestion_level: Some(json::CongestionLevel::VeryHigh),
            ..Default::default()
        });
        assert_eq!(patch.congestion, Some(CongestionLevel::VeryHigh));
    }
}
