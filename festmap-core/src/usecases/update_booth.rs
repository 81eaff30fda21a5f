use super::prelude::*;
use crate::util::validate::{self, AutoCorrect, Validate};

/// A partial update, fields set to `None` are left unchanged.
#[rustfmt::skip]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BoothPatch {
    pub name             : Option<String>,
    pub category         : Option<BoothCategory>,
    pub description      : Option<String>,
    pub area             : Option<MapPolygon>,
    pub operating_hours  : Option<String>,
    pub contact          : Option<String>,
    pub menu_items       : Option<Vec<String>>,
    pub price            : Option<String>,
    pub webcam_url       : Option<String>,
    pub is_active        : Option<bool>,
    pub congestion       : Option<CongestionLevel>,
    pub waiting_minutes  : Option<u32>,
    pub current_visitors : Option<u32>,
    pub max_capacity     : Option<u32>,
    pub tags             : Option<Vec<String>>,
}

impl BoothPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Only changes the area.
    pub fn area(area: MapPolygon) -> Self {
        Self {
            area: Some(area),
            ..Default::default()
        }
    }

    pub fn apply_to(self, booth: &mut Booth) {
        let Self {
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
            tags,
        } = self;
        if let Some(name) = name {
            booth.name = name;
        }
        if let Some(category) = category {
            booth.category = category;
        }
        if let Some(description) = description {
            booth.description = description;
        }
        if let Some(area) = area {
            booth.area = area;
        }
        if let Some(operating_hours) = operating_hours {
            booth.operating_hours = operating_hours;
        }
        if contact.is_some() {
            booth.contact = contact;
        }
        if let Some(menu_items) = menu_items {
            booth.menu_items = menu_items;
        }
        if price.is_some() {
            booth.price = price;
        }
        if webcam_url.is_some() {
            booth.webcam_url = webcam_url;
        }
        if let Some(is_active) = is_active {
            booth.is_active = is_active;
        }
        let liveness = &mut booth.liveness;
        if congestion.is_some() {
            liveness.congestion = congestion;
        }
        if waiting_minutes.is_some() {
            liveness.waiting_minutes = waiting_minutes;
        }
        if current_visitors.is_some() {
            liveness.current_visitors = current_visitors;
        }
        if max_capacity.is_some() {
            liveness.max_capacity = max_capacity;
        }
        if let Some(tags) = tags {
            booth.tags = tags;
        }
    }
}

impl Validate for BoothPatch {
    type Error = Error;
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !validate::is_valid_name(name) {
                return Err(Error::Name);
            }
        }
        if let Some(area) = &self.area {
            area.validate()?;
        }
        Ok(())
    }
}

pub fn update_booth<R: BoothRepo>(repo: &R, id: &str, patch: BoothPatch) -> Result<Booth> {
    // Reject obviously broken changes before loading anything
    patch.validate()?;
    let mut booth = repo.get_booth(id)?;
    patch.apply_to(&mut booth);
    let mut booth = booth.auto_correct();
    booth.validate()?;
    booth.updated_at = Timestamp::now();
    log::debug!("Storing updated booth: {}", booth.id);
    repo.update_booth(&booth)?;
    Ok(booth)
}

pub fn toggle_booth_active<R: BoothRepo>(repo: &R, id: &str) -> Result<Booth> {
    let is_active = repo.get_booth(id)?.is_active;
    let patch = BoothPatch {
        is_active: Some(!is_active),
        ..Default::default()
    };
    update_booth(repo, id, patch)
}

pub fn set_booth_congestion<R: BoothRepo>(
    repo: &R,
    id: &str,
    congestion: CongestionLevel,
    waiting_minutes: Option<u32>,
) -> Result<Booth> {
    let patch = BoothPatch {
        congestion: Some(congestion),
        waiting_minutes,
        ..Default::default()
    };
    update_booth(repo, id, patch)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{tests::MockDb, *},
        *,
    };
    use festmap_entities::builders::*;

    fn db_with_booth() -> MockDb {
        let db = MockDb::default();
        db.booths.borrow_mut().push(
            Booth::build()
                .id("waffle")
                .name("Waffle House - Dept. of Physics")
                .rect(37.30, 126.83, 37.31, 126.84)
                .finish(),
        );
        db
    }

    #[test]
    fn update_name_and_keep_the_rest() {
        let db = db_with_booth();
        let patch = BoothPatch {
            name: Some("Waffle Place".into()),
            ..Default::default()
        };
        let booth = update_booth(&db, "waffle", patch).unwrap();
        assert_eq!(booth.name, "Waffle Place");
        assert_eq!(booth.area.len(), 4);
        assert_eq!(db.get_booth("waffle").unwrap().name, "Waffle Place");
    }

    #[test]
    fn replace_area() {
        let db = db_with_booth();
        let area: MapPolygon = vec![
            MapPoint::from_lat_lng_deg(37.30, 126.83),
            MapPoint::from_lat_lng_deg(37.30, 126.84),
            MapPoint::from_lat_lng_deg(37.31, 126.84),
        ]
        .into();
        let booth = update_booth(&db, "waffle", BoothPatch::area(area.clone())).unwrap();
        assert_eq!(booth.area, area);
    }

    #[test]
    fn reject_invalid_patch_before_loading() {
        let db = db_with_booth();
        let area: MapPolygon = vec![MapPoint::from_lat_lng_deg(37.30, 126.83)].into();
        assert!(matches!(
            update_booth(&db, "waffle", BoothPatch::area(area)),
            Err(Error::TooFewVertices)
        ));
        let patch = BoothPatch {
            name: Some("".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_booth(&db, "waffle", patch),
            Err(Error::Name)
        ));
        assert_eq!(db.calls.get(), 0);
    }

    #[test]
    fn update_unknown_booth() {
        let db = MockDb::default();
        assert!(matches!(
            update_booth(&db, "nope", BoothPatch::default()),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }

    #[test]
    fn toggle_twice() {
        let db = db_with_booth();
        assert!(!toggle_booth_active(&db, "waffle").unwrap().is_active);
        assert!(toggle_booth_active(&db, "waffle").unwrap().is_active);
    }

    #[test]
    fn set_congestion() {
        let db = db_with_booth();
        let booth =
            set_booth_congestion(&db, "waffle", CongestionLevel::VeryHigh, Some(25)).unwrap();
        assert_eq!(booth.congestion(), Some(CongestionLevel::VeryHigh));
        assert_eq!(booth.liveness.waiting_minutes, Some(25));
    }
}
