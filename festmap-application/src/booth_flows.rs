use super::*;

use crate::feed::BoothFeed;

/// Publishes the current list of booths.
///
/// The preceding change has already been stored, so failures are
/// only logged.
pub fn publish_booths<R: BoothRepo>(repo: &R, feed: &BoothFeed) -> bool {
    match usecases::load_booths(repo) {
        Ok(booths) => feed.publish(booths),
        Err(err) => {
            error!("Failed to load booths for publishing: {err}");
            false
        }
    }
}

pub fn create_booth<R: BoothRepo>(
    repo: &R,
    feed: &BoothFeed,
    new_booth: usecases::NewBooth,
) -> Result<Booth> {
    let booth = usecases::create_booth(repo, new_booth).map_err(|err| {
        warn!("Failed to create booth: {err}");
        err
    })?;
    info!("Created booth {} ({})", booth.id, booth.name);
    publish_booths(repo, feed);
    Ok(booth)
}

pub fn update_booth<R: BoothRepo>(
    repo: &R,
    feed: &BoothFeed,
    id: &str,
    patch: usecases::BoothPatch,
) -> Result<Booth> {
    let booth = usecases::update_booth(repo, id, patch).map_err(|err| {
        warn!("Failed to update booth {id}: {err}");
        err
    })?;
    info!("Updated booth {}", booth.id);
    publish_booths(repo, feed);
    Ok(booth)
}

pub fn toggle_booth_active<R: BoothRepo>(repo: &R, feed: &BoothFeed, id: &str) -> Result<Booth> {
    let booth = usecases::toggle_booth_active(repo, id).map_err(|err| {
        warn!("Failed to toggle booth {id}: {err}");
        err
    })?;
    info!(
        "Booth {} is now {}",
        booth.id,
        if booth.is_active { "active" } else { "inactive" }
    );
    publish_booths(repo, feed);
    Ok(booth)
}

pub fn set_booth_congestion<R: BoothRepo>(
    repo: &R,
    feed: &BoothFeed,
    id: &str,
    congestion: CongestionLevel,
    waiting_minutes: Option<u32>,
) -> Result<Booth> {
    let booth = usecases::set_booth_congestion(repo, id, congestion, waiting_minutes)
        .map_err(|err| {
            warn!("Failed to set congestion of booth {id}: {err}");
            err
        })?;
    info!("Congestion of booth {} is now {congestion}", booth.id);
    publish_booths(repo, feed);
    Ok(booth)
}

pub fn delete_booth<R: BoothRepo>(repo: &R, feed: &BoothFeed, id: &str) -> Result<()> {
    usecases::delete_booth(repo, id).map_err(|err| {
        warn!("Failed to delete booth {id}: {err}");
        err
    })?;
    info!("Deleted booth {id}");
    publish_booths(repo, feed);
    Ok(())
}
