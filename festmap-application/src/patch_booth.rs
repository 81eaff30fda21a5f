use super::*;

use crate::{
    adapters::{from_json, json},
    booth_flows,
    feed::BoothFeed,
};
use std::io::Read;

/// Applies a partial JSON update to a single booth.
///
/// Absent fields keep their stored value.
pub fn patch_booth<R: BoothRepo>(
    repo: &R,
    feed: &BoothFeed,
    id: &str,
    reader: impl Read,
) -> Result<Booth> {
    let patch: json::BoothPatch = serde_json::from_reader(reader)?;
    let patch = from_json::booth_patch(patch);
    if patch.is_empty() {
        debug!("Empty patch for booth {id}");
    }
    booth_flows::update_booth(repo, feed, id, patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, tests::prelude::*};

    #[test]
    fn patch_name_and_congestion() {
        let fixture = Fixture::new();
        let booth = usecases::create_booth(&fixture.db, new_booth("Lemonade")).unwrap();
        let json = r#"{"name": "Iced Tea", "congestionLevel": "high", "waitingTime": 12}"#;
        let patched =
            patch_booth(&fixture.db, &fixture.feed, booth.id.as_str(), json.as_bytes()).unwrap();
        assert_eq!(patched.name, "Iced Tea");
        assert_eq!(patched.congestion(), Some(CongestionLevel::High));
        assert_eq!(patched.area, booth.area);
        assert_eq!(fixture.feed.current()[0].name, "Iced Tea");
    }

    #[test]
    fn patch_with_too_few_coordinates() {
        let fixture = Fixture::new();
        let booth = usecases::create_booth(&fixture.db, new_booth("Lemonade")).unwrap();
        let json = r#"{"coordinates": [{"lat": 37.3, "lng": 126.83}]}"#;
        let err = patch_booth(&fixture.db, &fixture.feed, booth.id.as_str(), json.as_bytes())
            .unwrap_err();
        assert!(matches!(err, AppError::Business(_)));
        assert_eq!(
            usecases::get_booth(&fixture.db, booth.id.as_str()).unwrap().area,
            booth.area
        );
        assert!(fixture.feed.current().is_empty());
    }

    #[test]
    fn patch_unknown_booth() {
        let fixture = Fixture::new();
        let err = patch_booth(&fixture.db, &fixture.feed, "missing", r#"{}"#.as_bytes())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn patch_with_malformed_json() {
        let fixture = Fixture::new();
        let err =
            patch_booth(&fixture.db, &fixture.feed, "missing", "{".as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Serialize(_)));
    }
}
