// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Time-based interpolation between two scroll positions.
//!
//! A tween is driven by explicit frame deltas rather than wall-clock time,
//! so the same sequence of `advance` calls always yields the same positions.

use super::easing::Easing;

/// Interpolator from `start` to `end` at a fixed rate
///
/// `speed` is measured in full distances per second: a speed of 2.5 covers
/// the whole span in 0.4 seconds regardless of its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f64,
    end: f64,
    speed: f64,
    elapsed: f64,
    easing: Easing,
    ended: bool,
}

impl Tween {
    /// Create a linear tween
    pub fn new(start: f64, end: f64, speed: f64) -> Self {
        Self {
            start,
            end,
            speed: speed.max(f64::EPSILON),
            elapsed: 0.0,
            easing: Easing::Linear,
            ended: start == end,
        }
    }

    /// Use a different easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Check whether the tween has reached `end`
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Progress through the tween in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.ended {
            1.0
        } else {
            (self.elapsed * self.speed).min(1.0)
        }
    }

    /// Advance by `delta_time` seconds and return the current position
    ///
    /// Once progress reaches 1 the exact `end` value is returned and the
    /// tween is marked ended. Further calls keep returning `end`.
    pub fn advance(&mut self, delta_time: f64) -> f64 {
        if self.ended {
            return self.end;
        }

        self.elapsed += delta_time.max(0.0);
        let t = self.elapsed * self.speed;
        if t >= 1.0 {
            self.ended = true;
            return self.end;
        }

        self.start + (self.end - self.start) * self.easing.apply(t)
    }
}
