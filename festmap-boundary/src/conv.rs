use super::*;
use festmap_entities as e;

impl From<Coordinate> for e::geo::MapPoint {
    fn from(c: Coordinate) -> Self {
        // Out of range coordinates become invalid points and are rejected by the validation
        e::geo::MapPoint::try_from_lat_lng_deg(c.lat, c.lng).unwrap_or_default()
    }
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(p: e::geo::MapPoint) -> Self {
        let (lat, lng) = p.to_lat_lng_deg();
        Self { lat, lng }
    }
}

pub fn polygon_from_coordinates(coordinates: Vec<Coordinate>) -> e::geo::MapPolygon {
    coordinates.into_iter().map(e::geo::MapPoint::from).collect()
}

pub fn coordinates_from_polygon(polygon: e::geo::MapPolygon) -> Vec<Coordinate> {
    polygon
        .into_vertices()
        .into_iter()
        .map(Coordinate::from)
        .collect()
}

impl From<e::category::CongestionLevel> for CongestionLevel {
    fn from(from: e::category::CongestionLevel) -> Self {
        use e::category::CongestionLevel as C;
        match from {
            C::Low => Self::Low,
            C::Medium => Self::Medium,
            C::High => Self::High,
            C::VeryHigh => Self::VeryHigh,
        }
    }
}

impl From<CongestionLevel> for e::category::CongestionLevel {
    fn from(from: CongestionLevel) -> Self {
        use e::category::CongestionLevel as C;
        match from {
            CongestionLevel::Low => C::Low,
            CongestionLevel::Medium => C::Medium,
            CongestionLevel::High => C::High,
            CongestionLevel::VeryHigh => C::VeryHigh,
        }
    }
}

impl From<e::booth::Booth> for Booth {
    fn from(from: e::booth::Booth) -> Self {
        let e::booth::Booth {
            id,
            name,
            category,
            description,
            area,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            is_active,
            liveness,
            tags,
            created_at,
            updated_at,
        } = from;
        let e::booth::Liveness {
            congestion,
            waiting_minutes,
            current_visitors,
            max_capacity,
            popularity,
        } = liveness;
        Self {
            id: id.into(),
            name,
            category: category.to_string(),
            description,
            coordinates: coordinates_from_polygon(area),
            operating_hours,
            contact,
            menu_items,
            price,
            is_active,
            congestion_level: congestion.map(Into::into),
            waiting_time: waiting_minutes,
            webcam_url,
            popularity_score: popularity,
            current_visitors,
            max_capacity,
            tags,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

impl From<Booth> for e::booth::Booth {
    fn from(from: Booth) -> Self {
        let Booth {
            id,
            name,
            category,
            description,
            coordinates,
            operating_hours,
            contact,
            menu_items,
            price,
            is_active,
            congestion_level,
            waiting_time,
            webcam_url,
            popularity_score,
            current_visitors,
            max_capacity,
            tags,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            name,
            category: e::category::BoothCategory::from_key(&category),
            description,
            area: polygon_from_coordinates(coordinates),
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            is_active,
            liveness: e::booth::Liveness {
                congestion: congestion_level.map(Into::into),
                waiting_minutes: waiting_time,
                current_visitors,
                max_capacity,
                popularity: popularity_score,
            },
            tags,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}
