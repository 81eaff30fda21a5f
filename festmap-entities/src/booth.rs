use crate::{category::*, geo::*, id::*, time::*};

/// Live crowding information of a booth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Liveness {
    pub congestion: Option<CongestionLevel>,
    pub waiting_minutes: Option<u32>,
    pub current_visitors: Option<u32>,
    pub max_capacity: Option<u32>,
    pub popularity: Option<f64>,
}

impl Liveness {
    /// Current visitors relative to the capacity, if both are known.
    pub fn occupancy(&self) -> Option<f64> {
        match (self.current_visitors, self.max_capacity) {
            (Some(current), Some(max)) if max > 0 => Some(f64::from(current) / f64::from(max)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booth {
    pub id: Id,
    pub name: String,
    pub category: BoothCategory,
    pub description: String,
    pub area: MapPolygon,
    pub operating_hours: String,
    pub contact: Option<String>,
    pub menu_items: Vec<String>,
    pub price: Option<String>,
    pub webcam_url: Option<String>,
    pub is_active: bool,
    pub liveness: Liveness,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booth {
    const LABEL_SEPARATOR: &'static str = " - ";

    /// Short text for map labels: the part of the name before the first `" - "`.
    pub fn label(&self) -> &str {
        self.name
            .split(Self::LABEL_SEPARATOR)
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn congestion(&self) -> Option<CongestionLevel> {
        self.liveness.congestion
    }
}
