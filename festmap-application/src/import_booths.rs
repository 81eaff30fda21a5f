use super::*;

use crate::{
    adapters::{from_json, json},
    feed::BoothFeed,
};
use std::io::Read;

#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: Vec<Booth>,
    /// Position in the imported list and the reason for the rejection.
    pub rejected: Vec<(usize, usecases::Error)>,
}

/// Creates all booths of a JSON array.
///
/// Invalid entries are skipped and reported. The feed is notified
/// once after all entries have been processed.
pub fn import_booths<R: BoothRepo>(
    repo: &R,
    feed: &BoothFeed,
    reader: impl Read,
) -> Result<ImportReport> {
    let new_booths: Vec<json::NewBooth> = serde_json::from_reader(reader)?;
    let mut report = ImportReport::default();
    for (index, new_booth) in new_booths.into_iter().enumerate() {
        let name = new_booth.name.clone();
        match usecases::create_booth(repo, from_json::new_booth(new_booth)) {
            Ok(booth) => report.created.push(booth),
            Err(usecases::Error::Repo(err)) => {
                // The storage is broken, the remaining entries would fail as well
                error!("Failed to store imported booth '{name}': {err}");
                if !report.created.is_empty() {
                    crate::booth_flows::publish_booths(repo, feed);
                }
                return Err(err.into());
            }
            Err(err) => {
                warn!("Skipping invalid booth #{index} '{name}': {err}");
                report.rejected.push((index, err));
            }
        }
    }
    info!(
        "Imported {} booths, rejected {}",
        report.created.len(),
        report.rejected.len()
    );
    if !report.created.is_empty() {
        crate::booth_flows::publish_booths(repo, feed);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, tests::prelude::*};

    #[test]
    fn import_valid_and_skip_invalid() {
        let fixture = Fixture::new();
        let json = r#"[
            {
                "name": "Photo Zone",
                "category": "photo",
                "coordinates": [
                    {"lat": 37.30, "lng": 126.83},
                    {"lat": 37.30, "lng": 126.84},
                    {"lat": 37.31, "lng": 126.84}
                ]
            },
            {
                "name": "Half a booth",
                "category": "food",
                "coordinates": [
                    {"lat": 37.30, "lng": 126.83},
                    {"lat": 37.30, "lng": 126.84}
                ]
            },
            {
                "name": "  ",
                "category": "food",
                "coordinates": [
                    {"lat": 37.30, "lng": 126.83},
                    {"lat": 37.30, "lng": 126.84},
                    {"lat": 37.31, "lng": 126.84}
                ]
            }
        ]"#;
        let report = import_booths(&fixture.db, &fixture.feed, json.as_bytes()).unwrap();
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].category, BoothCategory::Photo);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(
            report.rejected[0],
            (1, usecases::Error::TooFewVertices)
        ));
        assert!(matches!(report.rejected[1], (2, usecases::Error::Name)));
        assert_eq!(fixture.feed.current().len(), 1);
    }

    #[test]
    fn reject_malformed_json() {
        let fixture = Fixture::new();
        let err = import_booths(&fixture.db, &fixture.feed, &b"{}"[..]).unwrap_err();
        assert!(matches!(err, AppError::Serialize(_)));
        assert_eq!(fixture.db.count_booths().unwrap(), 0);
    }
}
