//! Realtime distribution of booth list snapshots.
//!
//! Every change is published as the complete list of booths. Consumers
//! that fall behind skip intermediate snapshots and only ever observe
//! the newest one.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};

use crate::Booth;

/// An immutable list of all booths at some point in time.
pub type Snapshot = Arc<Vec<Booth>>;

#[derive(Debug, Clone)]
pub struct BoothFeed {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl Default for BoothFeed {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BoothFeed {
    pub fn new(initial: Vec<Booth>) -> Self {
        let (tx, _) = watch::channel(Arc::new(initial));
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.tx.borrow())
    }

    /// Replaces the current snapshot.
    ///
    /// Returns `false` if the list did not change and nobody has
    /// been notified. Publishing without any subscriber is fine.
    pub fn publish(&self, booths: Vec<Booth>) -> bool {
        let count = booths.len();
        let modified = self.tx.send_if_modified(|current| {
            if current.as_slice() == booths.as_slice() {
                return false;
            }
            *current = Arc::new(booths);
            true
        });
        if modified {
            debug!(
                "Published {count} booths to {} subscriber(s)",
                self.tx.receiver_count()
            );
        }
        modified
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn subscribe(&self) -> BoothSubscription {
        BoothSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Invokes `handler` with every snapshot published from now on.
    ///
    /// The handler runs on a spawned task and must therefore be called
    /// within a tokio runtime. Delivery stops when the returned
    /// [`Subscription`] is unsubscribed or dropped.
    pub fn subscribe_with<F>(&self, mut handler: F) -> Subscription
    where
        F: FnMut(Snapshot) + Send + 'static,
    {
        let mut subscription = self.subscribe();
        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.changed().await {
                handler(snapshot);
            }
            debug!("Booth feed has been closed");
        });
        Subscription { task }
    }
}

/// Pull based access to the snapshots of a [`BoothFeed`].
#[derive(Debug)]
pub struct BoothSubscription {
    rx: watch::Receiver<Snapshot>,
}

impl BoothSubscription {
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.rx.borrow())
    }

    /// Whether a snapshot has been published that has not been seen yet.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next unseen snapshot.
    ///
    /// Returns `None` after the feed has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }
}

/// Handle of a push subscription, see [`BoothFeed::subscribe_with`].
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
