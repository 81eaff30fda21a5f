use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::{coordinates_from_polygon, polygon_from_coordinates};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooth {
    pub name            : String,
    pub category        : String,
    #[serde(default)]
    pub description     : String,
    pub coordinates     : Vec<Coordinate>,
    #[serde(default)]
    pub operating_hours : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact         : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_items      : Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price           : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webcam_url      : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity    : Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags            : Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booth {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub coordinates: Vec<Coordinate>,
    pub operating_hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion_level: Option<CongestionLevel>,
    /// Estimated waiting time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webcam_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_visitors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Partial update, absent fields stay unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoothPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Coordinate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webcam_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion_level: Option<CongestionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_visitors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// The result of a point lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocatedBooth {
    pub booth: Booth,
    pub inside: bool,
    /// Distance from the queried point to the center of the booth.
    pub distance_meters: f64,
}
