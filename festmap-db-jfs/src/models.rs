// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use festmap_core::entities::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVertex {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBooth {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub area: Vec<StoredVertex>,
    pub operating_hours: String,
    pub contact: Option<String>,
    #[serde(default)]
    pub menu_items: Vec<String>,
    pub price: Option<String>,
    pub webcam_url: Option<String>,
    pub is_active: bool,
    pub congestion: Option<String>,
    pub waiting_minutes: Option<u32>,
    pub current_visitors: Option<u32>,
    pub max_capacity: Option<u32>,
    pub popularity: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Booth> for StoredBooth {
    fn from(booth: &Booth) -> Self {
        let liveness = &booth.liveness;
        Self {
            id: booth.id.to_string(),
            name: booth.name.clone(),
            category: booth.category.to_string(),
            description: booth.description.clone(),
            area: booth
                .area
                .vertices()
                .iter()
                .map(|p| {
                    let (lat, lng) = p.to_lat_lng_deg();
                    StoredVertex { lat, lng }
                })
                .collect(),
            operating_hours: booth.operating_hours.clone(),
            contact: booth.contact.clone(),
            menu_items: booth.menu_items.clone(),
            price: booth.price.clone(),
            webcam_url: booth.webcam_url.clone(),
            is_active: booth.is_active,
            congestion: liveness.congestion.map(|c| c.to_string()),
            waiting_minutes: liveness.waiting_minutes,
            current_visitors: liveness.current_visitors,
            max_capacity: liveness.max_capacity,
            popularity: liveness.popularity,
            tags: booth.tags.clone(),
            created_at: booth.created_at.as_millis(),
            updated_at: booth.updated_at.as_millis(),
        }
    }
}

impl TryFrom<StoredBooth> for Booth {
    type Error = anyhow::Error;

    fn try_from(from: StoredBooth) -> Result<Self, Self::Error> {
        let StoredBooth {
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
            congestion,
            waiting_minutes,
            current_visitors,
            max_capacity,
            popularity,
            tags,
            created_at,
            updated_at,
        } = from;
        let area = area
            .into_iter()
            .map(|StoredVertex { lat, lng }| {
                MapPoint::try_from_lat_lng_deg(lat, lng)
                    .ok_or_else(|| anyhow::anyhow!("Invalid vertex {lat},{lng} of booth {id}"))
            })
            .collect::<Result<MapPolygon, _>>()?;
        let congestion = congestion
            .map(|c| c.parse::<CongestionLevel>())
            .transpose()
            .map_err(|err| anyhow::anyhow!("Invalid congestion level of booth {id}: {err}"))?;
        let created_at = Timestamp::from_millis(created_at)
            .ok_or_else(|| anyhow::anyhow!("Invalid creation time of booth {id}"))?;
        let updated_at = Timestamp::from_millis(updated_at)
            .ok_or_else(|| anyhow::anyhow!("Invalid update time of booth {id}"))?;
        Ok(Self {
            id: id.into(),
            name,
            category: BoothCategory::from_key(&category),
            description,
            area,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            is_active,
            liveness: Liveness {
                congestion,
                waiting_minutes,
                current_visitors,
                max_capacity,
                popularity,
            },
            tags,
            created_at,
            updated_at,
        })
    }
}
