pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::booth_builder::*;

pub mod booth_builder {

    use super::*;
    use crate::{booth::*, category::*, geo::*, id::*, time::*};

    #[derive(Debug)]
    pub struct BoothBuild {
        booth: Booth,
    }

    impl BoothBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.booth.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.booth.name = name.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.booth.description = desc.into();
            self
        }
        pub fn category(mut self, category: BoothCategory) -> Self {
            self.booth.category = category;
            self
        }
        /// Area from `(lat, lng)` pairs in degrees.
        pub fn area(mut self, vertices: &[(f64, f64)]) -> Self {
            self.booth.area = vertices
                .iter()
                .map(|&(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng))
                .collect();
            self
        }
        /// Axis-aligned rectangular area.
        pub fn rect(self, south: f64, west: f64, north: f64, east: f64) -> Self {
            self.area(&[(south, west), (south, east), (north, east), (north, west)])
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.booth.tags = tags.into_iter().map(Into::into).collect();
            self
        }
        pub fn active(mut self, active: bool) -> Self {
            self.booth.is_active = active;
            self
        }
        pub fn congestion(mut self, level: CongestionLevel) -> Self {
            self.booth.liveness.congestion = Some(level);
            self
        }
        pub fn created_at(mut self, millis: i64) -> Self {
            let ts = Timestamp::from_millis(millis).unwrap();
            self.booth.created_at = ts;
            self.booth.updated_at = ts;
            self
        }
        pub fn finish(self) -> Booth {
            self.booth
        }
    }

    impl Builder for Booth {
        type Build = BoothBuild;
        fn build() -> BoothBuild {
            let now = Timestamp::now();
            BoothBuild {
                booth: Booth {
                    id: Id::new(),
                    name: "".into(),
                    category: BoothCategory::default(),
                    description: "".into(),
                    area: MapPolygon::default(),
                    operating_hours: "".into(),
                    contact: None,
                    menu_items: vec![],
                    price: None,
                    webcam_url: None,
                    is_active: true,
                    liveness: Liveness::default(),
                    tags: vec![],
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}
