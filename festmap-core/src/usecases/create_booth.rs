use super::prelude::*;
use crate::util::validate::{AutoCorrect, Validate};

#[rustfmt::skip]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NewBooth {
    pub name            : String,
    pub category        : BoothCategory,
    pub description     : String,
    pub area            : MapPolygon,
    pub operating_hours : String,
    pub contact         : Option<String>,
    pub menu_items      : Vec<String>,
    pub price           : Option<String>,
    pub webcam_url      : Option<String>,
    pub max_capacity    : Option<u32>,
    pub tags            : Vec<String>,
}

impl From<&Booth> for NewBooth {
    fn from(booth: &Booth) -> Self {
        let Booth {
            name,
            category,
            description,
            area,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            liveness,
            tags,
            ..
        } = booth.clone();
        Self {
            name,
            category,
            description,
            area,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            max_capacity: liveness.max_capacity,
            tags,
        }
    }
}

/// Checks a new booth and turns it into an entity without storing it.
pub fn prepare_new_booth(new_booth: NewBooth) -> Result<Booth> {
    let NewBooth {
        name,
        category,
        description,
        area,
        operating_hours,
        contact,
        menu_items,
        price,
        webcam_url,
        max_capacity,
        tags,
    } = new_booth;
    let now = Timestamp::now();
    let booth = Booth {
        id: Id::new(),
        name,
        category,
        description,
        area,
        operating_hours,
        contact,
        menu_items,
        price,
        webcam_url,
        is_active: true,
        liveness: Liveness {
            max_capacity,
            ..Default::default()
        },
        tags,
        created_at: now,
        updated_at: now,
    }
    .auto_correct();
    booth.validate()?;
    Ok(booth)
}

pub fn create_booth<R: BoothRepo>(repo: &R, new_booth: NewBooth) -> Result<Booth> {
    let booth = prepare_new_booth(new_booth)?;
    log::debug!("Creating new booth: {} ({})", booth.id, booth.name);
    repo.create_booth(booth.clone())?;
    Ok(booth)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{tests::MockDb, *},
        *,
    };

    fn area(vertices: &[(f64, f64)]) -> MapPolygon {
        vertices
            .iter()
            .map(|&(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng))
            .collect()
    }

    #[test]
    fn create_booth_with_three_vertices() {
        let db = MockDb::default();
        let new_booth = NewBooth {
            name: " Churros ".into(),
            category: BoothCategory::Food,
            area: area(&[(37.30, 126.83), (37.30, 126.84), (37.31, 126.84)]),
            max_capacity: Some(20),
            ..Default::default()
        };
        let booth = create_booth(&db, new_booth).unwrap();
        assert_eq!(booth.name, "Churros");
        assert!(booth.is_active);
        assert_eq!(booth.liveness.max_capacity, Some(20));
        assert_eq!(db.get_booth(booth.id.as_str()).unwrap(), booth);
    }

    #[test]
    fn reject_two_vertices_without_touching_the_repo() {
        let db = MockDb::default();
        let new_booth = NewBooth {
            name: "Churros".into(),
            area: area(&[(37.30, 126.83), (37.30, 126.84)]),
            ..Default::default()
        };
        assert!(matches!(
            create_booth(&db, new_booth),
            Err(Error::TooFewVertices)
        ));
        assert_eq!(db.calls.get(), 0);
    }

    #[test]
    fn reject_empty_name() {
        let db = MockDb::default();
        let new_booth = NewBooth {
            name: "   ".into(),
            area: area(&[(37.30, 126.83), (37.30, 126.84), (37.31, 126.84)]),
            ..Default::default()
        };
        assert!(matches!(create_booth(&db, new_booth), Err(Error::Name)));
        assert_eq!(db.calls.get(), 0);
    }

    #[test]
    fn reject_invalid_positions() {
        let db = MockDb::default();
        let mut polygon = area(&[(37.30, 126.83), (37.30, 126.84)]);
        polygon.push(MapPoint::default());
        let new_booth = NewBooth {
            name: "Churros".into(),
            area: polygon,
            ..Default::default()
        };
        assert!(matches!(
            create_booth(&db, new_booth),
            Err(Error::InvalidPosition)
        ));
    }
}
