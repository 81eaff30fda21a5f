//! Rate limiting of pointer input while editing polygons.
//!
//! Both helpers are driven by explicitly passed [`Instant`]s and never
//! read the clock themselves.

use crate::entities::MapPoint;
use std::time::{Duration, Instant};

/// Roughly one update per frame at 60 Hz.
pub const DEFAULT_DRAG_INTERVAL: Duration = Duration::from_millis(16);

pub const DEFAULT_CLICK_DEBOUNCE: Duration = Duration::from_millis(300);

/// A position update for a single vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexMove {
    pub index: usize,
    pub point: MapPoint,
}

/// Coalesces a stream of drag events into at most one update per interval.
///
/// Moves that arrive too early are kept as pending and either emitted
/// by a later move, by [`DragThrottle::flush`] or by the final
/// [`DragThrottle::on_release`].
#[derive(Debug, Clone)]
pub struct DragThrottle {
    interval: Duration,
    last_emitted: Option<Instant>,
    pending: Option<VertexMove>,
}

impl Default for DragThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_INTERVAL)
    }
}

impl DragThrottle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emitted: None,
            pending: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    fn is_due(&self, now: Instant) -> bool {
        self.last_emitted
            .map(|last| now.saturating_duration_since(last) >= self.interval)
            .unwrap_or(true)
    }

    /// Records a move and returns the update to apply now, if any.
    pub fn on_move(&mut self, index: usize, point: MapPoint, now: Instant) -> Option<VertexMove> {
        let next = VertexMove { index, point };
        // A different vertex supersedes whatever was pending
        self.pending = Some(next);
        if self.is_due(now) {
            self.last_emitted = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Emits a pending update once the interval has elapsed.
    pub fn flush(&mut self, now: Instant) -> Option<VertexMove> {
        if self.pending.is_some() && self.is_due(now) {
            self.last_emitted = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    pub const fn pending(&self) -> Option<VertexMove> {
        self.pending
    }

    /// The authoritative update at the end of a drag.
    ///
    /// Always emitted, regardless of the interval, and resets the throttle.
    pub fn on_release(&mut self, index: usize, point: MapPoint) -> VertexMove {
        self.pending = None;
        self.last_emitted = None;
        VertexMove { index, point }
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emitted = None;
    }
}

/// Rejects clicks that follow a previous accepted click too closely.
#[derive(Debug, Clone)]
pub struct ClickDebounce {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Default for ClickDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_DEBOUNCE)
    }
}

impl ClickDebounce {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        let accepted = self
            .last_accepted
            .map(|last| now.saturating_duration_since(last) >= self.window)
            .unwrap_or(true);
        if accepted {
            self.last_accepted = Some(now);
        }
        accepted
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(i: usize) -> MapPoint {
        MapPoint::from_lat_lng_deg(37.3 + i as f64 * 1e-5, 126.83)
    }

    #[test]
    fn first_move_is_emitted_immediately() {
        let mut throttle = DragThrottle::default();
        let t0 = Instant::now();
        assert_eq!(
            throttle.on_move(1, pt(0), t0),
            Some(VertexMove {
                index: 1,
                point: pt(0)
            })
        );
        assert_eq!(throttle.pending(), None);
    }

    #[test]
    fn moves_within_interval_are_coalesced() {
        let mut throttle = DragThrottle::new(Duration::from_millis(16));
        let t0 = Instant::now();
        assert!(throttle.on_move(0, pt(0), t0).is_some());
        assert!(throttle.on_move(0, pt(1), t0 + Duration::from_millis(5)).is_none());
        assert!(throttle.on_move(0, pt(2), t0 + Duration::from_millis(10)).is_none());
        assert_eq!(throttle.pending().map(|m| m.point), Some(pt(2)));
        assert!(throttle.flush(t0 + Duration::from_millis(15)).is_none());
        assert_eq!(
            throttle.flush(t0 + Duration::from_millis(16)).map(|m| m.point),
            Some(pt(2))
        );
        assert_eq!(throttle.pending(), None);
        assert!(throttle.flush(t0 + Duration::from_millis(100)).is_none());
    }

    #[test]
    fn release_is_always_authoritative() {
        let mut throttle = DragThrottle::default();
        let t0 = Instant::now();
        let mut emitted = 0;
        for i in 0..100 {
            if throttle
                .on_move(3, pt(i), t0 + Duration::from_micros(100 * i as u64))
                .is_some()
            {
                emitted += 1;
            }
        }
        assert!(emitted < 100);
        let last = throttle.on_release(3, pt(99));
        assert_eq!(last.point, pt(99));
        assert_eq!(throttle.pending(), None);
    }

    #[test]
    fn debounce_window() {
        let mut debounce = ClickDebounce::new(Duration::from_millis(300));
        let t0 = Instant::now();
        assert!(debounce.accept(t0));
        assert!(!debounce.accept(t0 + Duration::from_millis(299)));
        assert!(debounce.accept(t0 + Duration::from_millis(300)));
        debounce.reset();
        assert!(debounce.accept(t0 + Duration::from_millis(301)));
    }
}
