pub mod prelude {

    pub use crate::feed::BoothFeed;
    pub use festmap_core::{entities::*, repositories::BoothRepo, usecases};
    pub use festmap_db_jfs::InMemoryBoothRepo;

    pub struct Fixture {
        pub db: InMemoryBoothRepo,
        pub feed: BoothFeed,
    }

    impl Fixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            Self {
                db: InMemoryBoothRepo::new(),
                feed: BoothFeed::default(),
            }
        }
    }

    /// A triangle near the main stage.
    pub fn triangle() -> MapPolygon {
        [(37.3000, 126.8300), (37.3000, 126.8310), (37.3010, 126.8305)]
            .into_iter()
            .map(|(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng))
            .collect()
    }

    pub fn new_booth(name: &str) -> usecases::NewBooth {
        usecases::NewBooth {
            name: name.into(),
            category: BoothCategory::Food,
            area: triangle(),
            ..Default::default()
        }
    }
}
