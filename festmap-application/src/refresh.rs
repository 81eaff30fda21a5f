use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{feed::BoothFeed, usecases, BoothRepo, Result};

/// Reloads all booths and publishes them if they changed.
pub fn refresh_once<R: BoothRepo>(repo: &R, feed: &BoothFeed) -> Result<bool> {
    let booths = usecases::load_booths(repo)?;
    Ok(feed.publish(booths))
}

/// Periodically republishes the stored booths.
///
/// Catches changes made by other processes sharing the same store.
#[derive(Debug, Clone, Copy)]
pub struct PollingRefresher {
    interval: Duration,
}

impl PollingRefresher {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3_000);

    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn run<R>(self, repo: Arc<R>, feed: BoothFeed)
    where
        R: BoothRepo + Send + Sync + 'static,
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let repo = Arc::clone(&repo);
            let feed_clone = feed.clone();
            let refreshed =
                tokio::task::spawn_blocking(move || refresh_once(&*repo, &feed_clone)).await;
            match refreshed {
                Ok(Ok(true)) => debug!("Booths changed since the last refresh"),
                Ok(Ok(false)) => {}
                Ok(Err(err)) => warn!("Failed to refresh booths: {err}"),
                Err(err) => error!("Booth refresh task failed: {err}"),
            }
        }
    }

    pub fn spawn<R>(self, repo: Arc<R>, feed: BoothFeed) -> JoinHandle<()>
    where
        R: BoothRepo + Send + Sync + 'static,
    {
        info!("Refreshing booths every {:?}", self.interval);
        tokio::spawn(self.run(repo, feed))
    }
}

impl Default for PollingRefresher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::prelude::*;

    #[test]
    fn refresh_publishes_external_changes() {
        let fixture = Fixture::new();
        assert!(!refresh_once(&fixture.db, &fixture.feed).unwrap());
        let booth = usecases::create_booth(&fixture.db, new_booth("Lemonade")).unwrap();
        assert!(fixture.feed.current().is_empty());
        assert!(refresh_once(&fixture.db, &fixture.feed).unwrap());
        assert_eq!(fixture.feed.current()[0].id, booth.id);
        assert!(!refresh_once(&fixture.db, &fixture.feed).unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn polling_picks_up_changes() {
        let Fixture { db, feed } = Fixture::new();
        let db = Arc::new(db);
        let mut subscription = feed.subscribe();
        let task = PollingRefresher::new(Duration::from_millis(10)).spawn(Arc::clone(&db), feed);
        usecases::create_booth(&*db, new_booth("Lemonade")).unwrap();
        let snapshot = tokio::time::timeout(Duration::from_secs(5), subscription.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.len(), 1);
        task.abort();
    }
}
