//! Timed rotation through a list of slides.
//!
//! The carousel never owns a timer: the owner drives it by calling
//! `tick` from its render loop with the current instant, and the
//! carousel advances once whenever an interval has elapsed. Stopping
//! clears the phase; an empty list refuses to rotate at all.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Carousel {
    interval: Duration,
    len: usize,
    index: usize,
    /// Instant of the last advance while running, None when stopped
    last_advance: Option<Instant>,
}

impl Carousel {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            len: 0,
            index: 0,
            last_advance: None,
        }
    }

    /// Begin rotating. Has no effect while already running or when
    /// there is nothing to rotate.
    pub fn start(&mut self, now: Instant) {
        if self.len == 0 {
            return;
        }
        if self.last_advance.is_none() {
            self.last_advance = Some(now);
        }
    }

    /// Stop rotating. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.last_advance = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_advance.is_some()
    }

    /// Update the slide count after a data change. The position is
    /// kept when still valid; shrinking past it snaps back to the
    /// first slide, and an empty list stops the rotation.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
        if len == 0 {
            self.stop();
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slide, None when the list is empty.
    pub fn index(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.index)
        }
    }

    /// Advance when an interval has elapsed. Returns true if the
    /// carousel moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        let Some(last) = self.last_advance else {
            return false;
        };
        if now.duration_since(last) < self.interval {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        self.last_advance = Some(now);
        true
    }

    /// Manual step forward, restarting the interval from `now` so the
    /// next automatic advance is a full interval away.
    pub fn advance(&mut self, now: Instant) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        if self.last_advance.is_some() {
            self.last_advance = Some(now);
        }
    }

    /// Manual step backward, wrapping to the last slide.
    pub fn rewind(&mut self, now: Instant) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        if self.last_advance.is_some() {
            self.last_advance = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(4);

    fn running_carousel(len: usize, t0: Instant) -> Carousel {
        let mut carousel = Carousel::new(INTERVAL);
        carousel.set_len(len);
        carousel.start(t0);
        carousel
    }

    #[test]
    fn test_tick_advances_after_interval() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);

        assert!(!carousel.tick(t0 + Duration::from_millis(3900)));
        assert_eq!(carousel.index(), Some(0));

        assert!(carousel.tick(t0 + Duration::from_secs(4)));
        assert_eq!(carousel.index(), Some(1));
    }

    #[test]
    fn test_wraps_to_first_slide() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(2, t0);

        assert!(carousel.tick(t0 + Duration::from_secs(4)));
        assert_eq!(carousel.index(), Some(1));
        assert!(carousel.tick(t0 + Duration::from_secs(8)));
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_empty_list_refuses_to_rotate() {
        let t0 = Instant::now();
        let mut carousel = Carousel::new(INTERVAL);
        carousel.start(t0);
        assert!(!carousel.is_running());
        assert!(!carousel.tick(t0 + Duration::from_secs(10)));
        assert_eq!(carousel.index(), None);
    }

    #[test]
    fn test_start_is_idempotent() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);

        // A second start must not restart the interval
        carousel.start(t0 + Duration::from_secs(2));
        assert!(carousel.tick(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn test_stop_halts_and_is_idempotent() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);

        carousel.stop();
        carousel.stop();
        assert!(!carousel.is_running());
        assert!(!carousel.tick(t0 + Duration::from_secs(10)));
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_shrinking_list_snaps_back() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);
        carousel.tick(t0 + Duration::from_secs(4));
        carousel.tick(t0 + Duration::from_secs(8));
        assert_eq!(carousel.index(), Some(2));

        carousel.set_len(2);
        assert_eq!(carousel.index(), Some(0));

        // Same-size replacement keeps the position
        carousel.set_len(2);
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn test_emptying_list_stops_rotation() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);
        carousel.set_len(0);
        assert!(!carousel.is_running());
        assert_eq!(carousel.index(), None);
    }

    #[test]
    fn test_manual_advance_restarts_interval() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);

        carousel.advance(t0 + Duration::from_secs(1));
        assert_eq!(carousel.index(), Some(1));

        // Only 3s since the manual step
        assert!(!carousel.tick(t0 + Duration::from_secs(4)));
        assert!(carousel.tick(t0 + Duration::from_secs(5)));
        assert_eq!(carousel.index(), Some(2));
    }

    #[test]
    fn test_rewind_wraps_backward() {
        let t0 = Instant::now();
        let mut carousel = running_carousel(3, t0);

        carousel.rewind(t0 + Duration::from_secs(1));
        assert_eq!(carousel.index(), Some(2));
        carousel.rewind(t0 + Duration::from_secs(2));
        assert_eq!(carousel.index(), Some(1));
    }

    #[test]
    fn test_manual_step_while_stopped_keeps_it_stopped() {
        let t0 = Instant::now();
        let mut carousel = Carousel::new(INTERVAL);
        carousel.set_len(3);

        carousel.advance(t0);
        assert_eq!(carousel.index(), Some(1));
        assert!(!carousel.is_running());
    }
}
