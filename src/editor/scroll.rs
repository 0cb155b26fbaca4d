// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scroll offset and animated navigation.
//!
//! Offset 0 puts the first bar at the origin. More negative offsets reveal
//! later bars. Navigation targets are clamped to `[-N * bar_width, 0]` where
//! N is the bar count at the time of the request.

use tracing::debug;

use crate::config::NavigationConfig;
use crate::timing::{Easing, Tween};

/// Current scroll position plus any in-flight navigation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    offset: f64,
    target: f64,
    tween: Option<Tween>,
}

impl ScrollState {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Where the current (or last) navigation request will come to rest
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

/// Drives the scroll offset toward clamped navigation targets
#[derive(Debug, Clone)]
pub struct ScrollController {
    state: ScrollState,
    bar_width: f64,
    speed: f64,
    easing: Easing,
}

impl ScrollController {
    /// Create a controller at offset 0
    pub fn new(bar_width: f64, navigation: &NavigationConfig) -> Self {
        Self {
            state: ScrollState::default(),
            bar_width,
            speed: navigation.speed,
            easing: navigation.easing,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn target(&self) -> f64 {
        self.state.target
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Smallest valid offset for `bar_count` bars
    pub fn min_offset(&self, bar_count: usize) -> f64 {
        -(bar_count as f64) * self.bar_width
    }

    /// Clamp a raw target into the valid range
    pub fn clamp_target(&self, raw: f64, bar_count: usize) -> f64 {
        raw.clamp(self.min_offset(bar_count), 0.0)
    }

    /// Animate by `delta` from the current offset
    ///
    /// Any tween already in flight is dropped; the new one starts from
    /// wherever the offset is right now. Returns the clamped target.
    pub fn request_delta(&mut self, delta: f64, bar_count: usize) -> f64 {
        self.request_absolute(self.state.offset + delta, bar_count)
    }

    /// Animate to an absolute offset. Returns the clamped target.
    pub fn request_absolute(&mut self, offset: f64, bar_count: usize) -> f64 {
        let target = self.clamp_target(offset, bar_count);
        self.state.target = target;

        if target == self.state.offset {
            self.state.tween = None;
        } else {
            self.state.tween =
                Some(Tween::new(self.state.offset, target, self.speed).with_easing(self.easing));
        }

        debug!(from = self.state.offset, requested = offset, target, "navigation request");
        target
    }

    /// Advance the in-flight tween, if any
    ///
    /// Returns true when a tween was advanced this tick.
    pub fn tick(&mut self, delta_time: f64) -> bool {
        let Some(tween) = self.state.tween.as_mut() else {
            return false;
        };

        self.state.offset = tween.advance(delta_time);
        if tween.has_ended() {
            self.state.tween = None;
        }
        true
    }

    /// Jump to `offset` immediately, abandoning any tween
    pub fn snap_to(&mut self, offset: f64) {
        self.state.tween = None;
        self.state.offset = offset;
        self.state.target = offset;
    }

    /// Move the offset by `dx` without clamping or animation
    pub fn scroll_by(&mut self, dx: f64) {
        self.state.offset += dx;
        self.state.target = self.state.offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn controller() -> ScrollController {
        ScrollController::new(1200.0, &NavigationConfig::default())
    }

    fn settle(scroll: &mut ScrollController) {
        let mut frames = 0;
        while scroll.is_animating() {
            scroll.tick(FRAME);
            frames += 1;
            assert!(frames < 1000, "tween never finished");
        }
    }

    #[test]
    fn test_starts_at_origin() {
        let scroll = controller();
        assert_eq!(scroll.offset(), 0.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_request_delta_clamps_at_origin() {
        let mut scroll = controller();
        let target = scroll.request_delta(600.0, 3);
        assert_eq!(target, 0.0);
        // Already there, nothing to animate
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_request_delta_clamps_past_end() {
        let mut scroll = controller();
        let target = scroll.request_delta(-10_000.0, 3);
        assert_eq!(target, -3600.0);
        settle(&mut scroll);
        assert_eq!(scroll.offset(), -3600.0);
    }

    #[test]
    fn test_tick_moves_monotonically_to_target() {
        let mut scroll = controller();
        scroll.request_delta(-600.0, 3);
        let mut prev = scroll.offset();
        while scroll.is_animating() {
            assert!(scroll.tick(FRAME));
            assert!(scroll.offset() <= prev);
            assert!(scroll.offset() >= -600.0);
            prev = scroll.offset();
        }
        assert_eq!(scroll.offset(), -600.0);
        assert!(!scroll.tick(FRAME));
    }

    #[test]
    fn test_last_request_wins() {
        let mut scroll = controller();
        scroll.request_delta(-2400.0, 3);
        scroll.tick(FRAME);
        scroll.tick(FRAME);
        let midway = scroll.offset();
        assert!(midway < 0.0 && midway > -2400.0);

        let target = scroll.request_delta(-600.0, 3);
        assert_eq!(target, (midway - 600.0).max(-3600.0));
        settle(&mut scroll);
        assert_eq!(scroll.offset(), target);
    }

    #[test]
    fn test_request_absolute() {
        let mut scroll = controller();
        assert_eq!(scroll.request_absolute(-1800.0, 2), -1800.0);
        settle(&mut scroll);
        assert_eq!(scroll.offset(), -1800.0);
        assert_eq!(scroll.request_absolute(250.0, 2), 0.0);
        settle(&mut scroll);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_clamp_uses_bar_count_at_request() {
        let mut scroll = controller();
        scroll.request_absolute(-5000.0, 2);
        assert_eq!(scroll.target(), -2400.0);
        scroll.request_absolute(-5000.0, 4);
        assert_eq!(scroll.target(), -4800.0);
    }

    #[test]
    fn test_snap_to_cancels_tween() {
        let mut scroll = controller();
        scroll.request_delta(-1200.0, 3);
        scroll.tick(FRAME);
        scroll.snap_to(0.0);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn test_scroll_by_is_unclamped() {
        let mut scroll = controller();
        scroll.scroll_by(-9000.0);
        assert_eq!(scroll.offset(), -9000.0);
    }
}
